//! Type definitions shared by the engine and the formatter
//!
//! This module defines the option enums that select how a number is rendered
//! and the typed tokens produced by `format_to_parts`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Overall rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Style {
    /// Number with a currency marker
    #[default]
    Currency,
    /// Plain grouped decimal number
    Decimal,
}

/// Which textual representation is used for the currency marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrencyDisplay {
    /// Localized symbol, e.g. `US$` or `$`
    #[default]
    Symbol,
    /// Shortest symbol, e.g. `$`
    NarrowSymbol,
    /// Currency code, e.g. `USD`
    Code,
    /// Human-readable name, e.g. `US dollars`
    Name,
}

/// Rounding behaviour applied when digits are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundingMode {
    /// Toward positive infinity
    Ceil,
    /// Toward negative infinity
    Floor,
    /// Away from zero
    Expand,
    /// Toward zero
    Trunc,
    /// Nearest, ties toward positive infinity
    HalfCeil,
    /// Nearest, ties toward negative infinity
    HalfFloor,
    /// Nearest, ties away from zero
    #[default]
    HalfExpand,
    /// Nearest, ties toward zero
    HalfTrunc,
    /// Nearest, ties to the even digit
    HalfEven,
    /// Nearest, ties to the odd digit
    HalfOdd,
}

/// Position of the dropped digits relative to the halfway point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remainder {
    /// Dropped digits are non-zero but below one half
    BelowHalf,
    /// Dropped digits are exactly one half
    Half,
    /// Dropped digits are above one half
    AboveHalf,
}

impl RoundingMode {
    /// Decide whether the magnitude of a value grows after dropping a non-zero remainder
    ///
    /// # Arguments
    /// * `negative` - Sign of the value being rounded
    /// * `remainder` - How the dropped digits compare to one half
    /// * `odd` - Whether the last kept digit is odd
    pub fn rounds_away_from_zero(self, negative: bool, remainder: Remainder, odd: bool) -> bool {
        match self {
            RoundingMode::Ceil => !negative,
            RoundingMode::Floor => negative,
            RoundingMode::Expand => true,
            RoundingMode::Trunc => false,
            _ => match remainder {
                Remainder::BelowHalf => false,
                Remainder::AboveHalf => true,
                Remainder::Half => match self {
                    RoundingMode::HalfCeil => !negative,
                    RoundingMode::HalfFloor => negative,
                    RoundingMode::HalfTrunc => false,
                    RoundingMode::HalfEven => odd,
                    RoundingMode::HalfOdd => !odd,
                    _ => true,
                },
            },
        }
    }
}

/// Number notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Notation {
    /// Full digits, e.g. `1,234,567`
    #[default]
    Standard,
    /// Scaled with a magnitude suffix, e.g. `1.2M`
    Compact,
}

/// Length of the compact magnitude suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompactDisplay {
    /// `K`, `M`, `B`
    #[default]
    Short,
    /// `thousand`, `million`, `billion`
    Long,
}

/// Error returned when an option name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownOption {
    kind: &'static str,
    value: String,
}

macro_rules! option_names {
    ($ty:ident, $kind:literal, { $($name:literal => $variant:ident),+ $(,)? }) => {
        impl $ty {
            /// The option name as it appears in configuration files
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(UnknownOption { kind: $kind, value: s.to_string() }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

option_names!(Style, "style", { "currency" => Currency, "decimal" => Decimal });
option_names!(CurrencyDisplay, "currency display", {
    "symbol" => Symbol,
    "narrowSymbol" => NarrowSymbol,
    "code" => Code,
    "name" => Name,
});
option_names!(RoundingMode, "rounding mode", {
    "ceil" => Ceil,
    "floor" => Floor,
    "expand" => Expand,
    "trunc" => Trunc,
    "halfCeil" => HalfCeil,
    "halfFloor" => HalfFloor,
    "halfExpand" => HalfExpand,
    "halfTrunc" => HalfTrunc,
    "halfEven" => HalfEven,
    "halfOdd" => HalfOdd,
});
option_names!(Notation, "notation", { "standard" => Standard, "compact" => Compact });
option_names!(CompactDisplay, "compact display", { "short" => Short, "long" => Long });

/// Kind of a token in a formatted number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartType {
    Currency,
    Literal,
    Integer,
    Group,
    Decimal,
    Fraction,
    MinusSign,
    Compact,
    Nan,
    Infinity,
}

/// A single typed token of a formatted number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberPart {
    /// Token kind
    #[serde(rename = "type")]
    pub kind: PartType,
    /// Rendered text of the token
    pub value: String,
}

impl NumberPart {
    pub fn new(kind: PartType, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Concatenate token values into the flat rendering
pub fn join_parts(parts: &[NumberPart]) -> String {
    parts.iter().map(|part| part.value.as_str()).collect()
}

/// Locale request passed to the formatter constructor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocaleSelector {
    /// Use the engine's default locale
    #[default]
    Default,
    /// Ask the locale provider for the preferred language
    Auto,
    /// An explicit language tag such as `en-US`
    Tag(String),
}

impl From<&str> for LocaleSelector {
    fn from(value: &str) -> Self {
        if value == "auto" {
            LocaleSelector::Auto
        } else {
            LocaleSelector::Tag(value.to_string())
        }
    }
}

impl From<String> for LocaleSelector {
    fn from(value: String) -> Self {
        LocaleSelector::from(value.as_str())
    }
}

impl From<Option<&str>> for LocaleSelector {
    fn from(value: Option<&str>) -> Self {
        value.map_or(LocaleSelector::Default, LocaleSelector::from)
    }
}
