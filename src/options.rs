//! Formatter configuration
//!
//! [`FormatOptions`] carries both the options forwarded to the number engine
//! and the formatter's own switches (decoration, aliases, custom currencies,
//! zero cropping). It deserializes from the camelCase keys used by
//! configuration files, so a TOML or JSON document can describe a formatter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::currency::CurrencyDescriptor;
use crate::error::{Error, Result};
use crate::types::{CompactDisplay, CurrencyDisplay, Notation, RoundingMode, Style};

/// Trailing zero removal applied to the fraction token
///
/// In configuration files `true` maps to [`CropZeros::All`], `false` to
/// [`CropZeros::Off`] and an integer `n` to [`CropZeros::KeepAtLeast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "CropZerosRepr", into = "CropZerosRepr")]
pub enum CropZeros {
    /// Leave the fraction as the engine rendered it
    #[default]
    Off,
    /// Remove every trailing zero
    All,
    /// Remove trailing zeros while more than `n` fraction digits remain
    KeepAtLeast(u8),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CropZerosRepr {
    Flag(bool),
    Keep(u8),
}

impl From<CropZerosRepr> for CropZeros {
    fn from(repr: CropZerosRepr) -> Self {
        match repr {
            CropZerosRepr::Flag(false) => CropZeros::Off,
            CropZerosRepr::Flag(true) => CropZeros::All,
            CropZerosRepr::Keep(n) => CropZeros::KeepAtLeast(n),
        }
    }
}

impl From<CropZeros> for CropZerosRepr {
    fn from(crop: CropZeros) -> Self {
        match crop {
            CropZeros::Off => CropZerosRepr::Flag(false),
            CropZeros::All => CropZerosRepr::Flag(true),
            CropZeros::KeepAtLeast(n) => CropZerosRepr::Keep(n),
        }
    }
}

/// Options accepted by [`crate::ExchNumberFormat`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    pub style: Style,
    /// Requested currency code, matched case-insensitively after alias resolution
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

    /// Prefix the currency text with `wrapped_symbol`
    pub wrapped: bool,
    pub wrapped_symbol: String,
    /// Prefix the currency text with `digitized_symbol`
    pub digitized: bool,
    pub digitized_symbol: String,

    pub use_aliases: bool,
    /// Requested code to target code, matched exactly
    pub aliases: BTreeMap<String, String>,
    pub use_custom_currency: bool,
    /// Extra or replacement extended currencies keyed by code
    pub custom_currency: BTreeMap<String, CurrencyDescriptor>,

    pub crop_zeros: CropZeros,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            style: Style::Currency,
            currency: None,
            currency_display: CurrencyDisplay::Symbol,
            rounding_mode: RoundingMode::HalfExpand,
            use_grouping: true,
            notation: Notation::Standard,
            compact_display: CompactDisplay::Short,
            minimum_integer_digits: None,
            minimum_fraction_digits: None,
            maximum_fraction_digits: None,
            minimum_significant_digits: None,
            maximum_significant_digits: None,
            wrapped: false,
            wrapped_symbol: "w".to_string(),
            digitized: false,
            digitized_symbol: "d".to_string(),
            use_aliases: true,
            aliases: BTreeMap::new(),
            use_custom_currency: true,
            custom_currency: BTreeMap::new(),
            crop_zeros: CropZeros::Off,
        }
    }
}

impl FormatOptions {
    /// Options for formatting amounts of `code`
    pub fn currency(code: impl Into<String>) -> Self {
        Self::default().with_currency(code)
    }

    /// Options for plain decimal numbers
    pub fn decimal() -> Self {
        Self::default().with_style(Style::Decimal)
    }

    /// Read options from a TOML document
    ///
    /// # Examples
    /// ```
    /// use exch_number_format::{CropZeros, FormatOptions};
    ///
    /// let options = FormatOptions::from_toml_str(r#"
    ///     currency = "BTC"
    ///     maximumFractionDigits = 4
    ///     cropZeros = true
    /// "#).unwrap();
    /// assert_eq!(options.currency.as_deref(), Some("BTC"));
    /// assert_eq!(options.crop_zeros, CropZeros::All);
    /// assert!(options.use_grouping);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::Options(e.to_string()))
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.currency = Some(code.into());
        self
    }

    pub fn with_currency_display(mut self, display: CurrencyDisplay) -> Self {
        self.currency_display = display;
        self
    }

    pub fn with_rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.rounding_mode = mode;
        self
    }

    pub fn with_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = use_grouping;
        self
    }

    pub fn with_notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    pub fn with_compact_display(mut self, display: CompactDisplay) -> Self {
        self.compact_display = display;
        self
    }

    pub fn with_minimum_integer_digits(mut self, digits: u8) -> Self {
        self.minimum_integer_digits = Some(digits);
        self
    }

    pub fn with_minimum_fraction_digits(mut self, digits: u8) -> Self {
        self.minimum_fraction_digits = Some(digits);
        self
    }

    pub fn with_maximum_fraction_digits(mut self, digits: u8) -> Self {
        self.maximum_fraction_digits = Some(digits);
        self
    }

    /// Pin both fraction bounds
    pub fn with_fraction_digits(self, min: u8, max: u8) -> Self {
        self.with_minimum_fraction_digits(min)
            .with_maximum_fraction_digits(max)
    }

    pub fn with_minimum_significant_digits(mut self, digits: u8) -> Self {
        self.minimum_significant_digits = Some(digits);
        self
    }

    pub fn with_maximum_significant_digits(mut self, digits: u8) -> Self {
        self.maximum_significant_digits = Some(digits);
        self
    }

    pub fn wrapped(mut self) -> Self {
        self.wrapped = true;
        self
    }

    pub fn with_wrapped_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.wrapped_symbol = symbol.into();
        self
    }

    pub fn digitized(mut self) -> Self {
        self.digitized = true;
        self
    }

    pub fn with_digitized_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.digitized_symbol = symbol.into();
        self
    }

    pub fn with_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    pub fn with_aliases_enabled(mut self, enabled: bool) -> Self {
        self.use_aliases = enabled;
        self
    }

    pub fn with_custom_currency(
        mut self,
        code: impl Into<String>,
        descriptor: CurrencyDescriptor,
    ) -> Self {
        self.custom_currency.insert(code.into(), descriptor);
        self
    }

    pub fn with_custom_currency_enabled(mut self, enabled: bool) -> Self {
        self.use_custom_currency = enabled;
        self
    }

    pub fn with_crop_zeros(mut self, crop: CropZeros) -> Self {
        self.crop_zeros = crop;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FormatOptions::default();
        assert_eq!(options.style, Style::Currency);
        assert!(options.currency.is_none());
        assert!(options.use_grouping);
        assert!(options.use_aliases);
        assert!(options.use_custom_currency);
        assert_eq!(options.wrapped_symbol, "w");
        assert_eq!(options.digitized_symbol, "d");
        assert_eq!(options.crop_zeros, CropZeros::Off);
    }

    #[test]
    fn test_toml_document() {
        let options = FormatOptions::from_toml_str(
            r#"
            currency = "XOR"
            currencyDisplay = "narrowSymbol"
            roundingMode = "floor"
            wrapped = true
            wrappedSymbol = "W"
            cropZeros = 2

            [aliases]
            DOGGO = "XOR"

            [customCurrency.XOR]
            symbol = "x"
            name = "XorGate"
            defaultDecimals = 4
            "#,
        )
        .unwrap();

        assert_eq!(options.currency_display, CurrencyDisplay::NarrowSymbol);
        assert_eq!(options.rounding_mode, RoundingMode::Floor);
        assert!(options.wrapped);
        assert_eq!(options.wrapped_symbol, "W");
        assert_eq!(options.crop_zeros, CropZeros::KeepAtLeast(2));
        assert_eq!(options.aliases.get("DOGGO").map(String::as_str), Some("XOR"));
        let xor = &options.custom_currency["XOR"];
        assert_eq!(xor.symbol, "x");
        assert_eq!(xor.default_decimals, 4);
        assert!(xor.narrow_symbol.is_empty());
    }

    #[test]
    fn test_crop_zeros_flags() {
        let on = FormatOptions::from_toml_str("cropZeros = true").unwrap();
        assert_eq!(on.crop_zeros, CropZeros::All);
        let off = FormatOptions::from_toml_str("cropZeros = false").unwrap();
        assert_eq!(off.crop_zeros, CropZeros::Off);
    }

    #[test]
    fn test_rejects_unknown_values() {
        let err = FormatOptions::from_toml_str(r#"roundingMode = "sideways""#).unwrap_err();
        assert!(matches!(err, Error::Options(_)));
    }
}
