//! Locale support for number formatting
//!
//! This module loads the embedded locale and ISO currency tables, resolves a
//! language tag into [`LocaleSettings`], and provides the [`LocaleProvider`]
//! capability used to auto-detect the user's preferred language.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use crate::parser::{LocaleTag, parse_locale_tag};

/// Error type for locale operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The identifier is not a well-formed language tag
    #[error("invalid language tag: {0}")]
    InvalidTag(String),
    /// An error occurred while parsing locale data
    #[error("error parsing locale data: {0}")]
    ParseError(String),
}

type Result<T> = std::result::Result<T, LocaleError>;

/// Where the currency marker sits relative to the number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    #[default]
    Prefix,
    Suffix,
}

/// Singular and plural display names of a currency
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrencyName {
    pub one: String,
    pub other: String,
}

/// Display data for an ISO 4217 currency
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IsoCurrency {
    /// Minor unit digits
    pub digits: u8,
    pub symbol: String,
    pub narrow: String,
    pub one: String,
    pub other: String,
}

/// One entry of `locale_settings.toml`; absent fields inherit from the parent
#[derive(Debug, Clone, Default, Deserialize)]
struct RawLocale {
    decimal: Option<String>,
    group: Option<String>,
    minus: Option<String>,
    numbering: Option<String>,
    primary_group: Option<u8>,
    secondary_group: Option<u8>,
    min_grouping: Option<u8>,
    currency_position: Option<CurrencyPosition>,
    currency_spacing: Option<String>,
    name_separator: Option<String>,
    compact_short: Option<Vec<String>>,
    compact_long: Option<Vec<String>>,
    #[serde(default)]
    currency_symbols: HashMap<String, String>,
    #[serde(default)]
    currency_names: HashMap<String, CurrencyName>,
}

/// Number symbols and currency placement rules for one locale
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleSettings {
    /// Canonical identifier of the requested locale
    pub locale: String,
    pub decimal: String,
    pub group: String,
    pub minus: String,
    /// Glyph for zero in the numbering system; the other nine follow it
    pub zero_digit: char,
    pub primary_group: usize,
    pub secondary_group: usize,
    /// Minimum integer digits in the highest group before grouping kicks in
    pub min_grouping: usize,
    pub currency_position: CurrencyPosition,
    /// Literal placed between the currency marker and the number
    pub currency_spacing: String,
    /// Literal placed between the number and a currency name
    pub name_separator: String,
    /// Short compact suffixes for 10^3, 10^6, 10^9, 10^12
    pub compact_short: Vec<String>,
    /// Long compact suffixes for 10^3, 10^6, 10^9, 10^12
    pub compact_long: Vec<String>,
    currency_symbols: HashMap<String, String>,
    currency_names: HashMap<String, CurrencyName>,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            decimal: ".".to_string(),
            group: ",".to_string(),
            minus: "-".to_string(),
            zero_digit: '0',
            primary_group: 3,
            secondary_group: 3,
            min_grouping: 1,
            currency_position: CurrencyPosition::Prefix,
            currency_spacing: String::new(),
            name_separator: " ".to_string(),
            compact_short: Vec::new(),
            compact_long: Vec::new(),
            currency_symbols: HashMap::new(),
            currency_names: HashMap::new(),
        }
    }
}

impl LocaleSettings {
    fn apply(&mut self, raw: &RawLocale) {
        if let Some(decimal) = &raw.decimal {
            self.decimal = decimal.clone();
        }
        if let Some(group) = &raw.group {
            self.group = group.clone();
        }
        if let Some(minus) = &raw.minus {
            self.minus = minus.clone();
        }
        if let Some(zero) = raw.numbering.as_deref().and_then(zero_digit_for) {
            self.zero_digit = zero;
        }
        if let Some(size) = raw.primary_group {
            self.primary_group = usize::from(size.max(1));
        }
        if let Some(size) = raw.secondary_group {
            self.secondary_group = usize::from(size.max(1));
        }
        if let Some(min) = raw.min_grouping {
            self.min_grouping = usize::from(min.max(1));
        }
        if let Some(position) = raw.currency_position {
            self.currency_position = position;
        }
        if let Some(spacing) = &raw.currency_spacing {
            self.currency_spacing = spacing.clone();
        }
        if let Some(separator) = &raw.name_separator {
            self.name_separator = separator.clone();
        }
        if let Some(short) = &raw.compact_short {
            self.compact_short = short.clone();
        }
        if let Some(long) = &raw.compact_long {
            self.compact_long = long.clone();
        }
        self.currency_symbols.extend(
            raw.currency_symbols
                .iter()
                .map(|(code, symbol)| (code.clone(), symbol.clone())),
        );
        self.currency_names.extend(
            raw.currency_names
                .iter()
                .map(|(code, name)| (code.clone(), name.clone())),
        );
    }

    /// Locale-specific symbol override for a currency
    pub fn currency_symbol(&self, code: &str) -> Option<&str> {
        self.currency_symbols.get(code).map(String::as_str)
    }

    /// Locale-specific display name for a currency
    pub fn currency_name(&self, code: &str, singular: bool) -> Option<&str> {
        self.currency_names.get(code).map(|name| {
            if singular {
                name.one.as_str()
            } else {
                name.other.as_str()
            }
        })
    }

    /// Split integer digits into groups, most significant first
    ///
    /// Numbers shorter than the primary group plus the minimum grouping
    /// digits stay in one group.
    pub fn group_digits<'a>(&self, digits: &'a str) -> Vec<&'a str> {
        if digits.len() < self.primary_group + self.min_grouping {
            return vec![digits];
        }

        let mut groups = Vec::new();
        let mut end = digits.len();
        let mut size = self.primary_group;
        while end > size {
            groups.push(&digits[end - size..end]);
            end -= size;
            size = self.secondary_group;
        }
        groups.push(&digits[..end]);
        groups.reverse();
        groups
    }

    /// Replace ASCII digits with the glyphs of the locale's numbering system
    pub fn localize_digits(&self, ascii: &str) -> String {
        if self.zero_digit == '0' {
            return ascii.to_string();
        }
        let zero = u32::from(self.zero_digit);
        ascii
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => char::from_u32(zero + d).unwrap_or(c),
                None => c,
            })
            .collect()
    }
}

/// Zero glyph of a CLDR numbering system; the system's digits are contiguous
pub fn zero_digit_for(numbering: &str) -> Option<char> {
    match numbering {
        "latn" => Some('0'),
        "arab" => Some('\u{0660}'),
        "arabext" => Some('\u{06F0}'),
        "beng" => Some('\u{09E6}'),
        "deva" => Some('\u{0966}'),
        "thai" => Some('\u{0E50}'),
        "fullwide" => Some('\u{FF10}'),
        _ => None,
    }
}

/// Holds the embedded locale and currency tables
struct LocaleManager {
    locales: HashMap<String, RawLocale>,
    currencies: HashMap<String, IsoCurrency>,
}

// Global singleton for locale settings
static LOCALE_MANAGER: OnceLock<LocaleManager> = OnceLock::new();

impl LocaleManager {
    /// Create a new locale manager with the default locale data
    fn new() -> Self {
        let mut manager = Self {
            locales: HashMap::new(),
            currencies: HashMap::new(),
        };

        if let Err(e) = manager.load_embedded_data() {
            tracing::error!(error = %e, "failed to load embedded locale data");
        }

        manager
    }

    /// Load the embedded locale data from the TOML files
    fn load_embedded_data(&mut self) -> Result<()> {
        let locale_settings_toml = include_str!("locale/locale_settings.toml");
        self.locales = toml::from_str(locale_settings_toml)
            .map_err(|e| LocaleError::ParseError(e.to_string()))?;

        let currencies_toml = include_str!("locale/currencies.toml");
        self.currencies =
            toml::from_str(currencies_toml).map_err(|e| LocaleError::ParseError(e.to_string()))?;

        Ok(())
    }

    /// Get the global locale manager instance
    fn get() -> &'static Self {
        LOCALE_MANAGER.get_or_init(Self::new)
    }

    fn settings_for(&self, tag: &LocaleTag) -> LocaleSettings {
        let mut settings = LocaleSettings::default();
        if let Some(base) = self.locales.get("base") {
            settings.apply(base);
        }
        for key in tag.fallback_chain() {
            if let Some(raw) = self.locales.get(&key) {
                settings.apply(raw);
            }
        }
        if let Some(zero) = tag.numbering.as_deref().and_then(zero_digit_for) {
            settings.zero_digit = zero;
        }
        settings.locale = tag.to_string();
        settings
    }
}

/// Resolve settings for a parsed tag, layering base, language and region data
///
/// Locales without data of their own resolve to the base settings.
pub fn settings_for_tag(tag: &LocaleTag) -> LocaleSettings {
    LocaleManager::get().settings_for(tag)
}

/// Get locale settings by identifier (e.g. `en-US`, `de_CH`)
pub fn get_locale_settings(locale_id: &str) -> Result<LocaleSettings> {
    let tag = parse_locale_tag(locale_id)?;
    Ok(settings_for_tag(&tag))
}

/// Look up ISO display data for an upper-case currency code
pub fn iso_currency(code: &str) -> Option<&'static IsoCurrency> {
    LocaleManager::get().currencies.get(code)
}

/// List the locale identifiers that carry their own data
pub fn list_available_locales() -> Vec<String> {
    let mut locales: Vec<String> = LocaleManager::get()
        .locales
        .keys()
        .filter(|key| key.as_str() != "base")
        .cloned()
        .collect();
    locales.sort();
    locales
}

/// Source of the user's preferred languages
pub trait LocaleProvider {
    /// Preferred language tags, most preferred first
    fn preferred_locales(&self) -> Vec<String>;

    /// The most preferred language tag, if any
    fn preferred_locale(&self) -> Option<String> {
        self.preferred_locales().into_iter().next()
    }
}

/// Reads the POSIX locale environment (`LC_ALL`, `LC_MESSAGES`, `LANG`, `LANGUAGE`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocaleProvider;

impl LocaleProvider for SystemLocaleProvider {
    fn preferred_locales(&self) -> Vec<String> {
        preferred_from_env(|var| std::env::var(var).ok())
    }
}

/// First usable of `LC_ALL`, `LC_MESSAGES` and `LANG`, then each `LANGUAGE` entry, without repeats
fn preferred_from_env(var: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let mut locales: Vec<String> = Vec::new();
    let primary = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .find_map(|name| var(name).as_deref().and_then(normalize_posix_locale));
    let language = var("LANGUAGE").unwrap_or_default();
    for tag in primary
        .into_iter()
        .chain(language.split(':').filter_map(normalize_posix_locale))
    {
        if !locales.contains(&tag) {
            locales.push(tag);
        }
    }
    locales
}

/// A fixed list of preferred languages, for tests and embedding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedLocaleProvider(pub Vec<String>);

impl FixedLocaleProvider {
    pub fn new(locale: impl Into<String>) -> Self {
        Self(vec![locale.into()])
    }
}

impl LocaleProvider for FixedLocaleProvider {
    fn preferred_locales(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Convert a POSIX locale such as `de_DE.UTF-8@euro` into `de-DE`
///
/// `C`, `POSIX` and empty values carry no language preference.
pub fn normalize_posix_locale(value: &str) -> Option<String> {
    let base = value.split(['.', '@']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    parse_locale_tag(base).ok().map(|tag| tag.to_string())
}
