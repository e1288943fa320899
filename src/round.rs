//! Fixed-point rounding helper for display strings
//!
//! [`round_number`] is independent of the formatter: it rounds a value to a
//! fixed number of fraction digits and dresses the result up for display.

use serde::{Deserialize, Serialize};

use crate::engine::decimal::DecimalQuantity;
use crate::locale::{LocaleSettings, get_locale_settings};
use crate::types::RoundingMode;

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Options for [`round_number`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundNumberOptions {
    /// Fraction digits kept, always rendered in full
    pub decimals: u8,
    pub rounding_mode: RoundingMode,
    /// Use this locale's separators and grouping instead of a bare `1234.5`
    pub locale: Option<String>,
    /// Collapse at least this many leading fraction zeros into `0₅`
    pub zero_grouping: Option<usize>,
    /// Wrap trailing fraction zeros in a `<span>` with this class
    pub trailing_zeros_class: Option<String>,
    pub prefix: String,
    pub suffix: String,
}

impl Default for RoundNumberOptions {
    fn default() -> Self {
        Self {
            decimals: 2,
            rounding_mode: RoundingMode::HalfExpand,
            locale: None,
            zero_grouping: None,
            trailing_zeros_class: None,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl RoundNumberOptions {
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals,
            ..Self::default()
        }
    }

    pub fn with_rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.rounding_mode = mode;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_zero_grouping(mut self, threshold: usize) -> Self {
        self.zero_grouping = Some(threshold);
        self
    }

    pub fn with_trailing_zeros_class(mut self, class: impl Into<String>) -> Self {
        self.trailing_zeros_class = Some(class.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

/// Round `value` to a fixed number of fraction digits and decorate it
///
/// # Examples
/// ```
/// use exch_number_format::{RoundNumberOptions, RoundingMode, round_number};
///
/// let options = RoundNumberOptions::new(2).with_rounding_mode(RoundingMode::Floor);
/// assert_eq!(round_number(1.239, &options), "1.23");
///
/// let options = RoundNumberOptions::new(8).with_zero_grouping(4);
/// assert_eq!(round_number(0.00000123, &options), "0.0₅123");
/// ```
pub fn round_number(value: f64, options: &RoundNumberOptions) -> String {
    let settings = options.locale.as_deref().map(|locale| {
        get_locale_settings(locale).unwrap_or_else(|e| {
            tracing::warn!(locale, error = %e, "unknown locale for round_number");
            LocaleSettings::default()
        })
    });
    let minus = settings.as_ref().map_or("-", |s| s.minus.as_str());

    let body = if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value < 0.0 { minus } else { "" };
        format!("{sign}∞")
    } else {
        fixed_point(value, options, settings.as_ref(), minus)
    };
    format!("{}{body}{}", options.prefix, options.suffix)
}

fn fixed_point(
    value: f64,
    options: &RoundNumberOptions,
    settings: Option<&LocaleSettings>,
    minus: &str,
) -> String {
    let decimals = usize::from(options.decimals);
    let mut quantity = DecimalQuantity::from_f64(value);
    quantity.round_to_position(-i32::from(options.decimals), options.rounding_mode);

    let integer = quantity.integer_digits(1);
    let integer = match settings {
        Some(settings) => {
            let groups: Vec<String> = settings
                .group_digits(&integer)
                .into_iter()
                .map(|group| settings.localize_digits(group))
                .collect();
            groups.join(&settings.group)
        }
        None => integer,
    };

    let mut out = String::new();
    if quantity.is_negative() && !quantity.is_zero() {
        out.push_str(minus);
    }
    out.push_str(&integer);
    if decimals == 0 {
        return out;
    }

    out.push_str(settings.map_or(".", |s| s.decimal.as_str()));
    let fraction = quantity.fraction_digits(decimals);
    let significant_end = fraction.trim_end_matches('0').len();
    let (digits, trailing) = fraction.split_at(significant_end);

    let digits = match options.zero_grouping {
        Some(threshold) => collapse_leading_zeros(digits, threshold),
        None => digits.to_string(),
    };
    let localize = |s: &str| settings.map_or_else(|| s.to_string(), |st| st.localize_digits(s));
    out.push_str(&localize(&digits));

    match &options.trailing_zeros_class {
        Some(class) if !trailing.is_empty() => {
            out.push_str(&format!(
                r#"<span class="{class}">{}</span>"#,
                localize(trailing)
            ));
        }
        _ => out.push_str(&localize(trailing)),
    }
    out
}

/// `00000123` becomes `0₅123` when the run reaches `threshold`
fn collapse_leading_zeros(digits: &str, threshold: usize) -> String {
    let zeros = digits.len() - digits.trim_start_matches('0').len();
    if zeros == 0 || zeros < threshold {
        return digits.to_string();
    }
    let count: String = zeros
        .to_string()
        .bytes()
        .map(|b| SUBSCRIPT_DIGITS[usize::from(b - b'0')])
        .collect();
    format!("0{count}{}", &digits[zeros..])
}
