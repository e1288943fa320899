//! Locale-aware currency and number formatting
//!
//! [`ExchNumberFormat`] formats numbers through a [`NumberEngine`] and adds
//! display support for currencies the engine has no data for, such as
//! cryptocurrencies, stablecoins and commodities.
//!
//! ```
//! use exch_number_format::{CurrencyDisplay, ExchNumberFormat, FormatOptions};
//!
//! let usd = ExchNumberFormat::new("en-US", FormatOptions::currency("USD")).unwrap();
//! assert_eq!(usd.format(1234.5), "$1,234.50");
//!
//! let options = FormatOptions::currency("ETH").with_currency_display(CurrencyDisplay::Code);
//! let eth = ExchNumberFormat::new("en-US", options).unwrap();
//! assert_eq!(eth.format(0.5), "ETH\u{a0}0.50000000");
//! ```

pub mod currency;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod locale;
pub mod options;
pub mod parser;
pub mod round;
pub mod types;

pub use currency::{CurrencyDescriptor, CurrencyRegistry};
pub use engine::{BuiltinEngine, EngineError, EngineFormatter, EngineOptions, NumberEngine};
pub use error::{Error, Result};
pub use formatter::{CurrencyMode, ExchNumberFormat};
pub use locale::{FixedLocaleProvider, LocaleProvider, SystemLocaleProvider};
pub use options::{CropZeros, FormatOptions};
pub use round::{RoundNumberOptions, round_number};
pub use types::*;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests;
