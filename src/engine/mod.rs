//! Locale-aware number engine
//!
//! The formatter never renders digits itself. It hands a locale and an
//! [`EngineOptions`] to a [`NumberEngine`] and post-processes the tokens the
//! engine returns. [`BuiltinEngine`] is the implementation backed by the
//! embedded locale data.

mod builtin;
pub mod decimal;

pub use builtin::{BuiltinEngine, BuiltinFormatter};

use thiserror::Error;

use crate::options::FormatOptions;
use crate::types::{
    CompactDisplay, CurrencyDisplay, NumberPart, Notation, RoundingMode, Style, join_parts,
};

/// Error raised by an engine while building a formatter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A digit option is out of range or inconsistent
    #[error("{0}")]
    Range(String),
    /// The currency identifier is not well formed
    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),
    /// The locale identifier could not be parsed
    #[error("invalid language tag: {0}")]
    InvalidLocale(String),
    /// Currency style was requested without a currency
    #[error("currency style requires a currency code")]
    MissingCurrency,
    /// Any other engine failure
    #[error("{0}")]
    Internal(String),
}

impl EngineError {
    /// Whether the formatter may recover by falling back to decimal style
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::Range(_) | EngineError::InvalidCurrency(_) | EngineError::InvalidLocale(_)
        )
    }
}

/// Configuration handed to the engine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineOptions {
    pub style: Style,
    pub currency: Option<String>,
    pub currency_display: CurrencyDisplay,
    pub rounding_mode: RoundingMode,
    pub use_grouping: bool,
    pub notation: Notation,
    pub compact_display: CompactDisplay,
    pub minimum_integer_digits: Option<u8>,
    pub minimum_fraction_digits: Option<u8>,
    pub maximum_fraction_digits: Option<u8>,
    pub minimum_significant_digits: Option<u8>,
    pub maximum_significant_digits: Option<u8>,
}

impl EngineOptions {
    /// Minimal configuration that only checks whether a currency code is accepted
    pub fn currency_probe(code: &str) -> Self {
        Self {
            style: Style::Currency,
            currency: Some(code.to_string()),
            use_grouping: true,
            ..Self::default()
        }
    }

    /// Whether the caller pinned the fraction digits explicitly
    pub fn has_fraction_override(&self) -> bool {
        self.minimum_fraction_digits.is_some() || self.maximum_fraction_digits.is_some()
    }
}

impl From<&FormatOptions> for EngineOptions {
    fn from(options: &FormatOptions) -> Self {
        Self {
            style: options.style,
            currency: options.currency.clone(),
            currency_display: options.currency_display,
            rounding_mode: options.rounding_mode,
            use_grouping: options.use_grouping,
            notation: options.notation,
            compact_display: options.compact_display,
            minimum_integer_digits: options.minimum_integer_digits,
            minimum_fraction_digits: options.minimum_fraction_digits,
            maximum_fraction_digits: options.maximum_fraction_digits,
            minimum_significant_digits: options.minimum_significant_digits,
            maximum_significant_digits: options.maximum_significant_digits,
        }
    }
}

/// A locale-aware numeric formatting engine
pub trait NumberEngine {
    type Formatter: EngineFormatter;

    /// Build a formatter for `locale` (or the engine default) and `options`
    fn try_new(
        &self,
        locale: Option<&str>,
        options: &EngineOptions,
    ) -> Result<Self::Formatter, EngineError>;

    /// Whether the engine carries display data for `code`
    ///
    /// An engine may accept any well-formed code in [`NumberEngine::try_new`]
    /// while only recognizing a subset of them.
    fn recognizes_currency(&self, code: &str) -> bool;
}

/// A configured formatter produced by a [`NumberEngine`]
pub trait EngineFormatter {
    /// Render `value` as an ordered token sequence
    fn format_to_parts(&self, value: f64) -> Vec<NumberPart>;

    /// Render `value` as a flat string
    fn format(&self, value: f64) -> String {
        join_parts(&self.format_to_parts(value))
    }

    /// The zero glyph of the numbering system in use
    fn zero_digit(&self) -> char {
        '0'
    }
}
