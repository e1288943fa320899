use exch_number_format::{
    CropZeros, CurrencyDisplay, CurrencyMode, EngineError, Error, ExchNumberFormat, FormatOptions,
    RoundingMode, Style,
};
use serde_json::json;

#[test]
fn test_options_from_json() {
    let options: FormatOptions = serde_json::from_value(json!({
        "style": "currency",
        "currency": "XOR",
        "currencyDisplay": "symbol",
        "roundingMode": "halfEven",
        "wrapped": true,
        "customCurrency": {
            "XOR": {
                "symbol": "x",
                "narrowSymbol": "x",
                "code": "XOR",
                "name": "XorGate",
                "defaultDecimals": 2
            }
        }
    }))
    .unwrap();

    assert_eq!(options.rounding_mode, RoundingMode::HalfEven);
    assert_eq!(options.currency_display, CurrencyDisplay::Symbol);
    assert!(options.use_grouping);
    let formatter = ExchNumberFormat::new("en-US", options).unwrap();
    assert_eq!(formatter.format(2.125), "wx\u{a0}2.12");
}

#[test]
fn test_options_from_toml() {
    let options = FormatOptions::from_toml_str(
        r#"
        style = "decimal"
        maximumFractionDigits = 1
        useGrouping = false
        "#,
    )
    .unwrap();
    assert_eq!(options.style, Style::Decimal);
    let formatter = ExchNumberFormat::new("de-DE", options).unwrap();
    assert_eq!(formatter.format(12345.67), "12345,7");
}

#[test]
fn test_crop_zeros_values() {
    let all: FormatOptions = serde_json::from_value(json!({ "cropZeros": true })).unwrap();
    assert_eq!(all.crop_zeros, CropZeros::All);
    let keep: FormatOptions = serde_json::from_value(json!({ "cropZeros": 3 })).unwrap();
    assert_eq!(keep.crop_zeros, CropZeros::KeepAtLeast(3));

    let value = serde_json::to_value(&keep).unwrap();
    assert_eq!(value["cropZeros"], json!(3));
    assert_eq!(value["wrappedSymbol"], json!("w"));
}

#[test]
fn test_option_names_parse() {
    assert_eq!("halfOdd".parse::<RoundingMode>(), Ok(RoundingMode::HalfOdd));
    assert_eq!(RoundingMode::HalfExpand.to_string(), "halfExpand");
    assert!("narrow".parse::<CurrencyDisplay>().is_err());
}

#[test]
fn test_invalid_toml_is_reported() {
    let err = FormatOptions::from_toml_str("currencyDisplay = 3").unwrap_err();
    assert!(matches!(err, Error::Options(_)));
}

#[test]
fn test_out_of_range_digits_are_rejected() {
    // The decimal fallback keeps the caller's digit options, so it is rejected too.
    let options = FormatOptions::currency("USD").with_maximum_fraction_digits(120);
    assert!(matches!(
        ExchNumberFormat::new("en-US", options),
        Err(Error::Engine(EngineError::Range(_)))
    ));

    // A bad currency with valid digits recovers as a decimal.
    let options = FormatOptions::currency("US-D").with_maximum_fraction_digits(3);
    let formatter = ExchNumberFormat::new("en-US", options).unwrap();
    assert_eq!(formatter.mode(), &CurrencyMode::DecimalFallback);
    assert_eq!(formatter.format(1.23456), "1.235");
}
