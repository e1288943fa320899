use crate::options::CropZeros;
use crate::types::{NumberPart, PartType};

/// Strip trailing zeros from the fraction token
///
/// `zero` is the zero glyph of the engine's numbering system. A fraction that
/// ends up empty takes its decimal separator with it.
pub(crate) fn crop_trailing_zeros(parts: &mut Vec<NumberPart>, crop: CropZeros, zero: char) {
    let keep = match crop {
        CropZeros::Off => return,
        CropZeros::All => 0,
        CropZeros::KeepAtLeast(n) => usize::from(n),
    };
    let Some(index) = parts.iter().position(|p| p.kind == PartType::Fraction) else {
        return;
    };

    let fraction = &mut parts[index].value;
    let mut len = fraction.chars().count();
    while len > keep && fraction.ends_with(zero) {
        fraction.pop();
        len -= 1;
    }

    if fraction.is_empty() {
        parts.remove(index);
        if index > 0 && parts[index - 1].kind == PartType::Decimal {
            parts.remove(index - 1);
        }
    }
}
