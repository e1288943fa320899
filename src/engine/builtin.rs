//! Number engine backed by the embedded locale tables

use crate::engine::decimal::DecimalQuantity;
use crate::engine::{EngineError, EngineFormatter, EngineOptions, NumberEngine};
use crate::locale::{self, CurrencyPosition, LocaleSettings};
use crate::parser::parse_locale_tag;
use crate::types::{
    CompactDisplay, CurrencyDisplay, NumberPart, Notation, PartType, RoundingMode, Style,
};

const DEFAULT_LOCALE: &str = "en-US";
const NO_BREAK_SPACE: &str = "\u{a0}";

/// Engine that formats with the embedded locale and ISO currency data
///
/// Any well-formed three-letter currency code is accepted; codes without ISO
/// data render as the code itself in every display variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinEngine {
    default_locale: String,
}

impl Default for BuiltinEngine {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl BuiltinEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `locale` when the caller expresses no locale preference
    pub fn with_default_locale(locale: impl Into<String>) -> Self {
        Self {
            default_locale: locale.into(),
        }
    }
}

impl NumberEngine for BuiltinEngine {
    type Formatter = BuiltinFormatter;

    fn try_new(
        &self,
        locale: Option<&str>,
        options: &EngineOptions,
    ) -> Result<BuiltinFormatter, EngineError> {
        let locale = locale.unwrap_or(&self.default_locale);
        let tag =
            parse_locale_tag(locale).map_err(|_| EngineError::InvalidLocale(locale.to_string()))?;
        let settings = locale::settings_for_tag(&tag);

        let currency = match options.style {
            Style::Decimal => None,
            Style::Currency => {
                let code = options
                    .currency
                    .as_deref()
                    .ok_or(EngineError::MissingCurrency)?;
                Some(CurrencyMarker::resolve(code, &settings)?)
            }
        };

        let (default_min, default_max) = match &currency {
            Some(marker) => (marker.digits, marker.digits),
            None => (0, 3),
        };
        let minimum_integer_digits = check_range(
            "minimumIntegerDigits",
            options.minimum_integer_digits,
            1,
            21,
        )?
        .unwrap_or(1);
        let precision = Precision::resolve(options, default_min, default_max)?;

        Ok(BuiltinFormatter {
            settings,
            currency,
            display: options.currency_display,
            rounding_mode: options.rounding_mode,
            use_grouping: options.use_grouping,
            notation: options.notation,
            compact_display: options.compact_display,
            minimum_integer_digits: usize::from(minimum_integer_digits),
            precision,
        })
    }

    fn recognizes_currency(&self, code: &str) -> bool {
        locale::iso_currency(&code.to_ascii_uppercase()).is_some()
    }
}

fn check_range(name: &str, value: Option<u8>, min: u8, max: u8) -> Result<Option<u8>, EngineError> {
    match value {
        Some(v) if v < min || v > max => Err(EngineError::Range(format!(
            "{name} value {v} is out of range {min}..={max}"
        ))),
        other => Ok(other),
    }
}

/// How digits are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precision {
    Fraction { min: u8, max: u8 },
    Significant { min: u8, max: u8 },
    /// Integer when the scaled value has two or more integer digits, else two significant digits
    Compact,
}

impl Precision {
    fn resolve(options: &EngineOptions, default_min: u8, default_max: u8) -> Result<Self, EngineError> {
        let min_sig = check_range(
            "minimumSignificantDigits",
            options.minimum_significant_digits,
            1,
            21,
        )?;
        let max_sig = check_range(
            "maximumSignificantDigits",
            options.maximum_significant_digits,
            1,
            21,
        )?;
        let min_frac = check_range(
            "minimumFractionDigits",
            options.minimum_fraction_digits,
            0,
            100,
        )?;
        let max_frac = check_range(
            "maximumFractionDigits",
            options.maximum_fraction_digits,
            0,
            100,
        )?;

        if min_sig.is_some() || max_sig.is_some() {
            let min = min_sig.unwrap_or(1);
            let max = max_sig.unwrap_or(21);
            if min > max {
                return Err(EngineError::Range(format!(
                    "minimumSignificantDigits {min} exceeds maximumSignificantDigits {max}"
                )));
            }
            return Ok(Precision::Significant { min, max });
        }

        let (min, max) = match (min_frac, max_frac) {
            (Some(min), Some(max)) => (min, max),
            (Some(min), None) => (min, default_max.max(min)),
            (None, Some(max)) => (default_min.min(max), max),
            (None, None) if options.notation == Notation::Compact => {
                return Ok(Precision::Compact);
            }
            (None, None) => (default_min, default_max),
        };
        if min > max {
            return Err(EngineError::Range(format!(
                "minimumFractionDigits {min} exceeds maximumFractionDigits {max}"
            )));
        }
        Ok(Precision::Fraction { min, max })
    }
}

/// Every display variant of the configured currency, resolved for the locale
#[derive(Debug, Clone, PartialEq, Eq)]
struct CurrencyMarker {
    digits: u8,
    code: String,
    symbol: String,
    narrow: String,
    name_one: String,
    name_other: String,
}

impl CurrencyMarker {
    fn resolve(code: &str, settings: &LocaleSettings) -> Result<Self, EngineError> {
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(EngineError::InvalidCurrency(code.to_string()));
        }
        let code = code.to_ascii_uppercase();
        let iso = locale::iso_currency(&code);

        let symbol = settings
            .currency_symbol(&code)
            .or(iso.map(|c| c.symbol.as_str()))
            .unwrap_or(&code)
            .to_string();
        let narrow = iso.map_or_else(|| symbol.clone(), |c| c.narrow.clone());
        let name_one = settings
            .currency_name(&code, true)
            .or(iso.map(|c| c.one.as_str()))
            .unwrap_or(&code)
            .to_string();
        let name_other = settings
            .currency_name(&code, false)
            .or(iso.map(|c| c.other.as_str()))
            .unwrap_or(&code)
            .to_string();

        Ok(Self {
            digits: iso.map_or(2, |c| c.digits),
            symbol,
            narrow,
            name_one,
            name_other,
            code,
        })
    }

    fn text(&self, display: CurrencyDisplay, singular: bool) -> &str {
        match display {
            CurrencyDisplay::Symbol => &self.symbol,
            CurrencyDisplay::NarrowSymbol => &self.narrow,
            CurrencyDisplay::Code => &self.code,
            CurrencyDisplay::Name if singular => &self.name_one,
            CurrencyDisplay::Name => &self.name_other,
        }
    }
}

/// A formatter bound to one locale and one set of options
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinFormatter {
    settings: LocaleSettings,
    currency: Option<CurrencyMarker>,
    display: CurrencyDisplay,
    rounding_mode: RoundingMode,
    use_grouping: bool,
    notation: Notation,
    compact_display: CompactDisplay,
    minimum_integer_digits: usize,
    precision: Precision,
}

impl BuiltinFormatter {
    /// Settings of the resolved locale
    pub fn settings(&self) -> &LocaleSettings {
        &self.settings
    }

    fn compact_units(&self) -> &[String] {
        match self.compact_display {
            CompactDisplay::Short => &self.settings.compact_short,
            CompactDisplay::Long => &self.settings.compact_long,
        }
    }

    /// Apply the precision rule and return the minimum fraction digits to show
    fn round(&self, quantity: &mut DecimalQuantity) -> usize {
        match self.precision {
            Precision::Fraction { min, max } => {
                quantity.round_to_position(-i32::from(max), self.rounding_mode);
                usize::from(min)
            }
            Precision::Significant { min, max } => {
                quantity.round_to_significant(max, self.rounding_mode);
                let magnitude = if quantity.is_zero() {
                    0
                } else {
                    quantity.magnitude()
                };
                (i32::from(min) - 1 - magnitude).max(0) as usize
            }
            Precision::Compact => {
                if !quantity.is_zero() && quantity.magnitude() >= 1 {
                    quantity.round_to_position(0, self.rounding_mode);
                } else {
                    quantity.round_to_significant(2, self.rounding_mode);
                }
                0
            }
        }
    }

    /// Pick the compact exponent, scale and round the value
    fn scale_and_round(&self, value: f64) -> (DecimalQuantity, usize, i32) {
        let quantity = DecimalQuantity::from_f64(value);
        let units = self.compact_units().len() as i32;
        let mut exponent = 0;
        if self.notation == Notation::Compact && !quantity.is_zero() && quantity.magnitude() >= 3 {
            exponent = (quantity.magnitude() / 3 * 3).min(3 * units);
        }

        loop {
            let mut scaled = quantity.clone();
            scaled.scale_down(exponent);
            let min_fraction = self.round(&mut scaled);
            // 999.95K rounds up to 1000K and moves to the next unit.
            if self.notation == Notation::Compact
                && !scaled.is_zero()
                && scaled.magnitude() >= 3
                && exponent + 3 <= 3 * units
            {
                exponent += 3;
                continue;
            }
            return (scaled, min_fraction, exponent);
        }
    }

    fn group_integer<'a>(&self, digits: &'a str) -> Vec<&'a str> {
        if self.use_grouping {
            self.settings.group_digits(digits)
        } else {
            vec![digits]
        }
    }

    /// Digits, separators and compact suffix; the flag is true for exactly one unit
    fn number_body(&self, value: f64) -> (Vec<NumberPart>, bool) {
        if value.is_nan() {
            return (vec![NumberPart::new(PartType::Nan, "NaN")], false);
        }
        if value.is_infinite() {
            return (vec![NumberPart::new(PartType::Infinity, "∞")], false);
        }

        let (quantity, min_fraction, exponent) = self.scale_and_round(value);
        let integer = quantity.integer_digits(self.minimum_integer_digits);
        let fraction = quantity.fraction_digits(min_fraction);
        let singular = exponent == 0 && fraction.is_empty() && quantity.integer_digits(1) == "1";

        let mut parts = Vec::new();
        for (i, group) in self.group_integer(&integer).into_iter().enumerate() {
            if i > 0 {
                parts.push(NumberPart::new(PartType::Group, self.settings.group.clone()));
            }
            parts.push(NumberPart::new(
                PartType::Integer,
                self.settings.localize_digits(group),
            ));
        }
        if !fraction.is_empty() {
            parts.push(NumberPart::new(PartType::Decimal, self.settings.decimal.clone()));
            parts.push(NumberPart::new(
                PartType::Fraction,
                self.settings.localize_digits(&fraction),
            ));
        }
        if exponent > 0 {
            let suffix = &self.compact_units()[(exponent / 3 - 1) as usize];
            let label = suffix.trim_start();
            let spacing = &suffix[..suffix.len() - label.len()];
            if !spacing.is_empty() {
                parts.push(NumberPart::new(PartType::Literal, spacing));
            }
            parts.push(NumberPart::new(PartType::Compact, label));
        }
        (parts, singular)
    }

    /// Literal between a currency marker and the number, if any
    fn currency_spacing(&self, marker: &str) -> Option<String> {
        if !self.settings.currency_spacing.is_empty() {
            return Some(self.settings.currency_spacing.clone());
        }
        let adjacent = match self.settings.currency_position {
            CurrencyPosition::Prefix => marker.chars().last(),
            CurrencyPosition::Suffix => marker.chars().next(),
        };
        adjacent
            .filter(|c| c.is_alphabetic())
            .map(|_| NO_BREAK_SPACE.to_string())
    }
}

impl EngineFormatter for BuiltinFormatter {
    fn format_to_parts(&self, value: f64) -> Vec<NumberPart> {
        let (body, singular) = self.number_body(value);
        let mut parts = Vec::with_capacity(body.len() + 3);
        if value.is_sign_negative() && !value.is_nan() {
            parts.push(NumberPart::new(PartType::MinusSign, self.settings.minus.clone()));
        }

        let Some(currency) = &self.currency else {
            parts.extend(body);
            return parts;
        };
        let marker = currency.text(self.display, singular).to_string();

        if self.display == CurrencyDisplay::Name {
            parts.extend(body);
            parts.push(NumberPart::new(
                PartType::Literal,
                self.settings.name_separator.clone(),
            ));
            parts.push(NumberPart::new(PartType::Currency, marker));
            return parts;
        }

        let spacing = self.currency_spacing(&marker);
        match self.settings.currency_position {
            CurrencyPosition::Prefix => {
                parts.push(NumberPart::new(PartType::Currency, marker));
                if let Some(spacing) = spacing {
                    parts.push(NumberPart::new(PartType::Literal, spacing));
                }
                parts.extend(body);
            }
            CurrencyPosition::Suffix => {
                parts.extend(body);
                if let Some(spacing) = spacing {
                    parts.push(NumberPart::new(PartType::Literal, spacing));
                }
                parts.push(NumberPart::new(PartType::Currency, marker));
            }
        }
        parts
    }

    fn zero_digit(&self) -> char {
        self.settings.zero_digit
    }
}
