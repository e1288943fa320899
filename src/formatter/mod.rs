//! Currency-aware formatter facade
//!
//! [`ExchNumberFormat`] decides once, at construction, how a requested
//! currency is rendered:
//!
//! * [`CurrencyMode::Native`]: the engine knows the currency (or none is
//!   needed) and formats it itself.
//! * [`CurrencyMode::Extended`]: the currency only exists in the
//!   [`CurrencyRegistry`]. The engine formats with [`PLACEHOLDER_CODE`] and
//!   the placeholder is swapped for the descriptor's display text afterwards.
//! * [`CurrencyMode::DecimalFallback`]: no currency was given, or the engine
//!   rejected the configuration. Numbers are formatted as plain decimals.

mod crop;
mod decoration;

pub use decoration::Decoration;

use crate::currency::{
    CurrencyDescriptor, CurrencyRegistry, PLACEHOLDER_CODE, UNKNOWN_CURRENCY, check_caller_codes,
};
use crate::engine::{BuiltinEngine, EngineError, EngineFormatter, EngineOptions, NumberEngine};
use crate::error::Result;
use crate::locale::{LocaleProvider, SystemLocaleProvider};
use crate::options::{CropZeros, FormatOptions};
use crate::types::{LocaleSelector, NumberPart, PartType, Style, join_parts};

use self::crop::crop_trailing_zeros;

const FALLBACK_FRACTION_DIGITS: u8 = 2;

/// How the requested currency is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyMode {
    Native,
    Extended(CurrencyDescriptor),
    DecimalFallback,
}

/// Locale-aware number formatter with extended currency support
///
/// # Examples
/// ```
/// use exch_number_format::{ExchNumberFormat, FormatOptions, RoundingMode};
///
/// let options = FormatOptions::currency("BTC").with_rounding_mode(RoundingMode::Floor);
/// let formatter = ExchNumberFormat::new("en-US", options).unwrap();
/// assert_eq!(formatter.format(1234.1234567899), "₿\u{a0}1,234.12345678");
/// ```
#[derive(Debug)]
pub struct ExchNumberFormat<E: NumberEngine = BuiltinEngine> {
    engine: E,
    formatter: E::Formatter,
    locale: Option<String>,
    registry: CurrencyRegistry,
    mode: CurrencyMode,
    /// Decorated display text replacing the placeholder in extended mode
    currency_text: Option<String>,
    decoration: Decoration,
    crop_zeros: CropZeros,
}

impl ExchNumberFormat<BuiltinEngine> {
    /// Build a formatter on the builtin engine
    ///
    /// [`LocaleSelector::Auto`] asks the process environment for the preferred
    /// language.
    pub fn new(locale: impl Into<LocaleSelector>, options: FormatOptions) -> Result<Self> {
        Self::with_engine(BuiltinEngine::new(), &SystemLocaleProvider, locale, options)
    }
}

impl<E: NumberEngine> ExchNumberFormat<E> {
    /// Build a formatter on `engine`, resolving [`LocaleSelector::Auto`] through `provider`
    pub fn with_engine(
        engine: E,
        provider: &dyn LocaleProvider,
        locale: impl Into<LocaleSelector>,
        options: FormatOptions,
    ) -> Result<Self> {
        check_caller_codes(&options, |code| engine.recognizes_currency(code))?;

        let locale = match locale.into() {
            LocaleSelector::Tag(tag) => Some(tag),
            LocaleSelector::Auto => provider.preferred_locale(),
            LocaleSelector::Default => None,
        };
        let locale = usable_locale(&engine, locale);

        let registry = CurrencyRegistry::from_options(&options);
        let (mode, engine_options) = plan(&engine, locale.as_deref(), &registry, &options);

        let (mode, formatter) = match engine.try_new(locale.as_deref(), &engine_options) {
            Ok(formatter) => (mode, formatter),
            Err(err) if err.is_recoverable() && mode != CurrencyMode::DecimalFallback => {
                tracing::warn!(
                    error = %err,
                    currency = ?options.currency,
                    "engine rejected configuration, formatting as decimal"
                );
                let fallback = decimal_fallback(&options);
                let formatter = engine
                    .try_new(locale.as_deref(), &fallback)
                    .inspect_err(|err| {
                        tracing::error!(error = %err, "engine rejected decimal fallback");
                    })?;
                (CurrencyMode::DecimalFallback, formatter)
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to construct number engine");
                return Err(err.into());
            }
        };

        let decoration = Decoration::from_options(&options);
        let currency_text = match &mode {
            CurrencyMode::Extended(descriptor) => {
                Some(decoration.apply(descriptor.display(options.currency_display)))
            }
            _ => None,
        };
        tracing::debug!(locale = ?locale, mode = ?mode, "formatter ready");

        Ok(Self {
            engine,
            formatter,
            locale,
            registry,
            mode,
            currency_text,
            decoration,
            crop_zeros: options.crop_zeros,
        })
    }

    /// Format `value` as a flat string
    pub fn format(&self, value: f64) -> String {
        match (&self.mode, &self.currency_text) {
            (CurrencyMode::Extended(_), Some(text)) => {
                self.render(value).replacen(PLACEHOLDER_CODE, text, 1)
            }
            (CurrencyMode::Native, _) if self.decoration.is_active() => {
                join_parts(&self.format_to_parts(value))
            }
            _ => self.render(value),
        }
    }

    /// Format `value` as the engine's token sequence with currency tokens rewritten
    pub fn format_to_parts(&self, value: f64) -> Vec<NumberPart> {
        let mut parts = self.engine_parts(value);
        let currency_parts = parts.iter_mut().filter(|p| p.kind == PartType::Currency);
        match (&self.mode, &self.currency_text) {
            (CurrencyMode::Extended(_), Some(text)) => {
                for part in currency_parts {
                    part.value.clone_from(text);
                }
            }
            (CurrencyMode::Native, _) if self.decoration.is_active() => {
                for part in currency_parts {
                    part.value = self.decoration.apply(&part.value);
                }
            }
            _ => {}
        }
        parts
    }

    /// Whether the engine itself accepts `code`; the registry is not consulted
    pub fn is_currency_supported(&self, code: &str) -> bool {
        probe_currency(&self.engine, self.locale.as_deref(), code)
    }

    /// Crate version
    pub fn version(&self) -> &'static str {
        crate::VERSION
    }

    /// Locale handed to the engine, `None` for the engine default
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn mode(&self) -> &CurrencyMode {
        &self.mode
    }

    pub fn registry(&self) -> &CurrencyRegistry {
        &self.registry
    }

    fn render(&self, value: f64) -> String {
        match self.crop_zeros {
            CropZeros::Off => self.formatter.format(value),
            _ => join_parts(&self.engine_parts(value)),
        }
    }

    fn engine_parts(&self, value: f64) -> Vec<NumberPart> {
        let mut parts = self.formatter.format_to_parts(value);
        crop_trailing_zeros(&mut parts, self.crop_zeros, self.formatter.zero_digit());
        parts
    }
}

/// Drop a locale the engine cannot parse in favour of the engine default
fn usable_locale<E: NumberEngine>(engine: &E, locale: Option<String>) -> Option<String> {
    let tag = locale?;
    let probe = EngineOptions {
        style: Style::Decimal,
        ..EngineOptions::default()
    };
    match engine.try_new(Some(&tag), &probe) {
        Err(EngineError::InvalidLocale(_)) => {
            tracing::warn!(locale = %tag, "unusable locale, using engine default");
            None
        }
        _ => Some(tag),
    }
}

fn probe_currency<E: NumberEngine>(engine: &E, locale: Option<&str>, code: &str) -> bool {
    engine
        .try_new(locale, &EngineOptions::currency_probe(code))
        .is_ok()
}

/// Pick the currency mode and the options the engine is built with
fn plan<E: NumberEngine>(
    engine: &E,
    locale: Option<&str>,
    registry: &CurrencyRegistry,
    options: &FormatOptions,
) -> (CurrencyMode, EngineOptions) {
    let mut engine_options = EngineOptions::from(options);
    if options.style == Style::Decimal {
        engine_options.currency = None;
        return (CurrencyMode::Native, engine_options);
    }

    let Some(requested) = options.currency.as_deref().filter(|c| !c.trim().is_empty()) else {
        tracing::debug!("no currency requested, formatting as decimal");
        return (CurrencyMode::DecimalFallback, decimal_fallback(options));
    };
    let code = registry.resolve_alias(requested);

    let descriptor = match registry.lookup(code) {
        Some(descriptor) => descriptor,
        None if engine.recognizes_currency(code) => {
            engine_options.currency = Some(code.to_string());
            return (CurrencyMode::Native, engine_options);
        }
        None => match registry.lookup(UNKNOWN_CURRENCY) {
            Some(unknown) if probe_currency(engine, locale, code) => {
                tracing::debug!(currency = code, "unrecognized currency, using sentinel");
                unknown
            }
            // Malformed codes go to the engine as-is and fail over to decimal.
            _ => {
                engine_options.currency = Some(code.to_string());
                return (CurrencyMode::Native, engine_options);
            }
        },
    };

    engine_options.currency = Some(PLACEHOLDER_CODE.to_string());
    if !engine_options.has_fraction_override() {
        engine_options.minimum_fraction_digits = Some(descriptor.default_decimals);
        engine_options.maximum_fraction_digits = Some(descriptor.default_decimals);
    }
    (CurrencyMode::Extended(descriptor.clone()), engine_options)
}

/// Decimal-style options with two fraction digits unless the caller set them
fn decimal_fallback(options: &FormatOptions) -> EngineOptions {
    let (min, max) = match (
        options.minimum_fraction_digits,
        options.maximum_fraction_digits,
    ) {
        (Some(min), Some(max)) => (min, max),
        (Some(min), None) => (min, min.max(FALLBACK_FRACTION_DIGITS)),
        (None, Some(max)) => (max.min(FALLBACK_FRACTION_DIGITS), max),
        (None, None) => (FALLBACK_FRACTION_DIGITS, FALLBACK_FRACTION_DIGITS),
    };
    EngineOptions {
        style: Style::Decimal,
        currency: None,
        minimum_fraction_digits: Some(min),
        maximum_fraction_digits: Some(max),
        ..EngineOptions::from(options)
    }
}
