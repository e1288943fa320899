use crate::engine::{EngineError, EngineFormatter, EngineOptions, NumberEngine};
use crate::formatter::CurrencyMode;
use crate::locale::FixedLocaleProvider;
use crate::types::*;
use crate::{BuiltinEngine, CurrencyDescriptor, Error, ExchNumberFormat, FormatOptions};

/// Engine double rendering `<code> <value:.2>` with a configurable failure
#[derive(Debug, Default)]
struct StubEngine {
    currency_error: Option<EngineError>,
    decimal_error: Option<EngineError>,
}

#[derive(Debug)]
struct StubFormatter {
    currency: Option<String>,
}

impl NumberEngine for StubEngine {
    type Formatter = StubFormatter;

    fn try_new(
        &self,
        _locale: Option<&str>,
        options: &EngineOptions,
    ) -> Result<StubFormatter, EngineError> {
        match options.style {
            Style::Decimal => match &self.decimal_error {
                Some(err) => Err(err.clone()),
                None => Ok(StubFormatter { currency: None }),
            },
            Style::Currency => {
                let code = options.currency.clone().ok_or(EngineError::MissingCurrency)?;
                if let Some(err) = &self.currency_error {
                    return Err(err.clone());
                }
                if code.len() != 3 {
                    return Err(EngineError::InvalidCurrency(code));
                }
                Ok(StubFormatter {
                    currency: Some(code),
                })
            }
        }
    }

    fn recognizes_currency(&self, code: &str) -> bool {
        code.eq_ignore_ascii_case("USD")
    }
}

impl EngineFormatter for StubFormatter {
    fn format_to_parts(&self, value: f64) -> Vec<NumberPart> {
        let rendered = format!("{value:.2}");
        let (integer, fraction) = rendered.split_once('.').unwrap_or((&rendered, ""));
        let mut parts = Vec::new();
        if let Some(code) = &self.currency {
            parts.push(NumberPart::new(PartType::Currency, code.clone()));
            parts.push(NumberPart::new(PartType::Literal, " "));
        }
        parts.push(NumberPart::new(PartType::Integer, integer));
        parts.push(NumberPart::new(PartType::Decimal, "."));
        parts.push(NumberPart::new(PartType::Fraction, fraction));
        parts
    }
}

fn stub_formatter(
    engine: StubEngine,
    options: FormatOptions,
) -> crate::Result<ExchNumberFormat<StubEngine>> {
    ExchNumberFormat::with_engine(
        engine,
        &FixedLocaleProvider::new("en-US"),
        LocaleSelector::Default,
        options,
    )
}

#[test]
fn test_extended_currency_swaps_placeholder() {
    let formatter = stub_formatter(StubEngine::default(), FormatOptions::currency("btc")).unwrap();
    assert!(matches!(formatter.mode(), CurrencyMode::Extended(d) if d.code == "BTC"));
    assert_eq!(formatter.format(1.5), "₿ 1.50");
    assert_eq!(
        formatter.format_to_parts(1.5)[0],
        NumberPart::new(PartType::Currency, "₿")
    );
}

#[test]
fn test_native_currency_passes_through() {
    let formatter = stub_formatter(StubEngine::default(), FormatOptions::currency("USD")).unwrap();
    assert_eq!(formatter.mode(), &CurrencyMode::Native);
    assert_eq!(formatter.format(2.0), "USD 2.00");

    let decorated = FormatOptions::currency("USD").wrapped().digitized();
    let formatter = stub_formatter(StubEngine::default(), decorated).unwrap();
    assert_eq!(formatter.format(2.0), "wdUSD 2.00");
}

#[test]
fn test_missing_currency_formats_decimal() {
    let formatter = stub_formatter(StubEngine::default(), FormatOptions::default()).unwrap();
    assert_eq!(formatter.mode(), &CurrencyMode::DecimalFallback);
    assert_eq!(formatter.format(3.25), "3.25");
}

#[test]
fn test_recoverable_rejection_falls_back_once() {
    let engine = StubEngine {
        currency_error: Some(EngineError::Range("maximumFractionDigits".into())),
        ..StubEngine::default()
    };
    let formatter = stub_formatter(engine, FormatOptions::currency("USD")).unwrap();
    assert_eq!(formatter.mode(), &CurrencyMode::DecimalFallback);
    assert_eq!(formatter.format(7.0), "7.00");
}

#[test]
fn test_malformed_code_falls_back() {
    let formatter =
        stub_formatter(StubEngine::default(), FormatOptions::currency("XPOP")).unwrap();
    assert_eq!(formatter.mode(), &CurrencyMode::DecimalFallback);
    assert!(!formatter.is_currency_supported("XPOP"));
    assert!(formatter.is_currency_supported("usd"));
}

#[test]
fn test_fatal_engine_error_fails_construction() {
    let engine = StubEngine {
        currency_error: Some(EngineError::Internal("data unavailable".into())),
        ..StubEngine::default()
    };
    let err = stub_formatter(engine, FormatOptions::currency("USD")).unwrap_err();
    assert_eq!(
        err,
        Error::Engine(EngineError::Internal("data unavailable".into()))
    );
}

#[test]
fn test_rejected_fallback_is_an_error() {
    let engine = StubEngine {
        currency_error: Some(EngineError::InvalidCurrency("USD".into())),
        decimal_error: Some(EngineError::Range("minimumFractionDigits".into())),
    };
    let err = stub_formatter(engine, FormatOptions::currency("USD")).unwrap_err();
    assert!(matches!(err, Error::Engine(EngineError::Range(_))));
}

#[test]
fn test_reserved_and_colliding_codes() {
    let reserved = FormatOptions::currency("BTC")
        .with_custom_currency("QXQ", CurrencyDescriptor::new("q", "q", "QXQ", "Q", 2));
    assert!(matches!(
        stub_formatter(StubEngine::default(), reserved),
        Err(Error::ReservedCode(_))
    ));

    let colliding = FormatOptions::currency("USD")
        .with_custom_currency("usd", CurrencyDescriptor::new("u", "u", "USD", "U", 2));
    assert!(matches!(
        stub_formatter(StubEngine::default(), colliding),
        Err(Error::NativeCurrencyCollision(_))
    ));
}

#[test]
fn test_auto_locale_uses_provider() {
    let formatter = ExchNumberFormat::with_engine(
        BuiltinEngine::new(),
        &FixedLocaleProvider::new("de-DE"),
        "auto",
        FormatOptions::currency("EUR"),
    )
    .unwrap();
    assert_eq!(formatter.locale(), Some("de-DE"));
    assert_eq!(formatter.format(1234.5), "1.234,50\u{a0}€");
}

#[test]
fn test_unusable_locale_uses_engine_default() {
    let formatter = ExchNumberFormat::new("not a locale", FormatOptions::currency("USD")).unwrap();
    assert_eq!(formatter.locale(), None);
    assert_eq!(formatter.mode(), &CurrencyMode::Native);
    assert_eq!(formatter.format(1.0), "$1.00");
}

#[test]
fn test_flat_and_token_output_agree() {
    let configs = [
        FormatOptions::currency("USD"),
        FormatOptions::currency("BTC").wrapped(),
        FormatOptions::currency("XAU").with_currency_display(CurrencyDisplay::Name),
        FormatOptions::currency("EUR").digitized().with_crop_zeros(crate::CropZeros::All),
        FormatOptions::decimal(),
    ];
    for options in configs {
        let formatter = ExchNumberFormat::new("en-US", options).unwrap();
        for value in [0.0, -12.5, 1234.1234567899, 1e9] {
            assert_eq!(
                formatter.format(value),
                join_parts(&formatter.format_to_parts(value))
            );
        }
    }
}

#[test]
fn test_formatter_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ExchNumberFormat>();
}

#[test]
fn test_version() {
    let formatter = ExchNumberFormat::new(LocaleSelector::Default, FormatOptions::default()).unwrap();
    assert_eq!(formatter.version(), "1.1.4");
    assert_eq!(crate::VERSION, "1.1.4");
}
