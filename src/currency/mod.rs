//! Display metadata for currencies the number engine cannot render
//!
//! [`CurrencyRegistry`] merges the embedded builtin table with caller
//! overrides and resolves caller aliases. Each formatter owns its registry;
//! the builtin table itself is parsed once and never mutated.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::FormatOptions;
use crate::types::CurrencyDisplay;

/// Currency code handed to the engine in place of an extended currency
///
/// Lies in the ISO 4217 user-assigned range, so no engine carries data for it
/// and every display variant renders the code verbatim.
pub const PLACEHOLDER_CODE: &str = "QXQ";

/// Lookup key of the sentinel used for well-formed codes nobody recognizes
pub const UNKNOWN_CURRENCY: &str = "XXX";

/// Display metadata for one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDescriptor {
    /// Glyph for the `symbol` display
    pub symbol: String,
    /// Glyph for the `narrowSymbol` display; empty falls back to `symbol`
    #[serde(default)]
    pub narrow_symbol: String,
    /// Code for the `code` display; empty falls back to the lookup key
    #[serde(default)]
    pub code: String,
    /// Name for the `name` display; empty falls back to the code
    #[serde(default)]
    pub name: String,
    /// Fraction digits used when the caller does not pin them
    pub default_decimals: u8,
}

impl CurrencyDescriptor {
    pub fn new(
        symbol: impl Into<String>,
        narrow_symbol: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        default_decimals: u8,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            narrow_symbol: narrow_symbol.into(),
            code: code.into(),
            name: name.into(),
            default_decimals,
        }
    }

    /// Text shown for a display variant
    pub fn display(&self, variant: CurrencyDisplay) -> &str {
        match variant {
            CurrencyDisplay::NarrowSymbol => &self.narrow_symbol,
            CurrencyDisplay::Code => &self.code,
            CurrencyDisplay::Name => &self.name,
            CurrencyDisplay::Symbol => &self.symbol,
        }
    }

    /// Fill omitted fields from the lookup key and the symbol
    fn completed(mut self, key: &str) -> Self {
        if self.code.is_empty() {
            self.code = key.to_string();
        }
        if self.narrow_symbol.is_empty() {
            self.narrow_symbol = self.symbol.clone();
        }
        if self.name.is_empty() {
            self.name = self.code.clone();
        }
        self
    }
}

static BUILTIN_CURRENCIES: OnceLock<HashMap<String, CurrencyDescriptor>> = OnceLock::new();

/// The embedded seed table
pub fn builtin_currencies() -> &'static HashMap<String, CurrencyDescriptor> {
    BUILTIN_CURRENCIES.get_or_init(|| {
        match toml::from_str::<HashMap<String, CurrencyDescriptor>>(include_str!("builtin.toml")) {
            Ok(table) => table
                .into_iter()
                .map(|(key, descriptor)| {
                    let descriptor = descriptor.completed(&key);
                    (key, descriptor)
                })
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load builtin currency table");
                HashMap::new()
            }
        }
    })
}

/// Aliases every registry starts with unless aliasing is disabled
pub fn default_aliases() -> HashMap<String, String> {
    HashMap::from([("XBT".to_string(), "BTC".to_string())])
}

/// Per-instance currency table with alias redirection
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrencyRegistry {
    effective: HashMap<String, CurrencyDescriptor>,
    aliases: HashMap<String, String>,
}

impl CurrencyRegistry {
    /// Builtin table plus the default aliases
    pub fn builtin() -> Self {
        Self {
            effective: builtin_currencies().clone(),
            aliases: default_aliases(),
        }
    }

    /// Registry described by formatter options
    pub fn from_options(options: &FormatOptions) -> Self {
        let mut registry = Self::builtin();
        if options.use_custom_currency {
            registry = registry.with_overrides(
                options
                    .custom_currency
                    .iter()
                    .map(|(code, descriptor)| (code.as_str(), descriptor.clone())),
            );
        }
        if options.use_aliases {
            registry = registry.with_aliases(
                options
                    .aliases
                    .iter()
                    .map(|(from, to)| (from.as_str(), to.as_str())),
            );
        } else {
            registry.aliases.clear();
        }
        registry
    }

    /// Add or replace entries; keys are upper-cased
    pub fn with_overrides<I, K>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, CurrencyDescriptor)>,
        K: AsRef<str>,
    {
        for (key, descriptor) in overrides {
            let key = key.as_ref().to_ascii_uppercase();
            let descriptor = descriptor.completed(&key);
            self.effective.insert(key, descriptor);
        }
        self
    }

    /// Add aliases; keys match the requested code exactly
    pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.aliases
            .extend(aliases.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Rewrite a requested code through the alias table, one hop at most
    pub fn resolve_alias<'a>(&'a self, code: &'a str) -> &'a str {
        self.aliases.get(code).map_or(code, String::as_str)
    }

    /// Case-insensitive descriptor lookup
    pub fn lookup(&self, code: &str) -> Option<&CurrencyDescriptor> {
        if code.is_empty() {
            return None;
        }
        self.effective.get(&code.to_ascii_uppercase())
    }

    pub fn is_extended(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }

    /// Lookup keys in sorted order
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.effective.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

/// Reject caller codes that would make placeholder substitution ambiguous
///
/// `recognizes` answers whether the engine carries its own data for a code.
pub fn check_caller_codes(
    options: &FormatOptions,
    recognizes: impl Fn(&str) -> bool,
) -> Result<()> {
    if options.use_custom_currency {
        for key in options.custom_currency.keys() {
            let code = key.to_ascii_uppercase();
            if code == PLACEHOLDER_CODE {
                return Err(Error::ReservedCode(key.clone()));
            }
            if recognizes(&code) {
                return Err(Error::NativeCurrencyCollision(key.clone()));
            }
        }
    }
    if options.use_aliases {
        for (from, to) in &options.aliases {
            for code in [from, to] {
                if code.eq_ignore_ascii_case(PLACEHOLDER_CODE) {
                    return Err(Error::ReservedCode(code.clone()));
                }
            }
        }
    }
    Ok(())
}
