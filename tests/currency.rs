use exch_number_format::currency::PLACEHOLDER_CODE;
use exch_number_format::{
    CurrencyDescriptor, CurrencyDisplay, CurrencyMode, Error, ExchNumberFormat, FormatOptions,
    LocaleSelector,
};

const VALUE: f64 = 1234.1234567899;

fn formatter(options: FormatOptions) -> ExchNumberFormat {
    ExchNumberFormat::new(LocaleSelector::Default, options).unwrap()
}

#[test]
fn test_added_new_coin() {
    let options = FormatOptions::currency("XOR").with_custom_currency(
        "XOR",
        CurrencyDescriptor::new("x", "x", "XOR", "XorGate", 2),
    );
    let xor = formatter(options);
    assert_eq!(xor.format(VALUE), "x\u{a0}1,234.12");
    assert!(xor.registry().is_extended("xor"));
}

#[test]
fn test_replaced_existing_coin() {
    let options = FormatOptions::currency("ETH").with_custom_currency(
        "ETH",
        CurrencyDescriptor::new("e", "e", "ETH", "Ether", 2),
    );
    assert_eq!(formatter(options).format(VALUE), "e\u{a0}1,234.12");

    // Overrides stay with the instance that received them.
    assert_eq!(
        formatter(FormatOptions::currency("ETH")).format(VALUE),
        "Ξ\u{a0}1,234.12345679"
    );
}

#[test]
fn test_custom_currency_switched_off() {
    let options = FormatOptions::currency("ETH")
        .with_custom_currency("ETH", CurrencyDescriptor::new("e", "e", "ETH", "Ether", 2))
        .with_custom_currency_enabled(false);
    assert_eq!(formatter(options).format(VALUE), "Ξ\u{a0}1,234.12345679");
}

#[test]
fn test_aliases() {
    let doggo = FormatOptions::currency("DOGGO").with_alias("DOGGO", "BTC");
    assert_eq!(formatter(doggo).format(VALUE), "₿\u{a0}1,234.12345679");

    let xbt = FormatOptions::currency("XBT");
    assert_eq!(formatter(xbt).format(VALUE), "₿\u{a0}1,234.12345679");

    // Aliases rewrite the requested key exactly as given.
    let lower = FormatOptions::currency("xbt");
    assert!(matches!(formatter(lower).mode(), CurrencyMode::Extended(d) if d.code == "XXX"));

    // Alias targets are not resolved again.
    let chained = FormatOptions::currency("AAA")
        .with_alias("AAA", "BBB")
        .with_alias("BBB", "BTC");
    assert!(matches!(formatter(chained).mode(), CurrencyMode::Extended(d) if d.code == "XXX"));
}

#[test]
fn test_aliases_switched_off() {
    let options = FormatOptions::currency("XBT").with_aliases_enabled(false);
    assert!(matches!(formatter(options).mode(), CurrencyMode::Extended(d) if d.code == "XXX"));
}

#[test]
fn test_alias_to_native_currency() {
    let options = FormatOptions::currency("BUCK").with_alias("BUCK", "USD");
    let buck = formatter(options);
    assert_eq!(buck.mode(), &CurrencyMode::Native);
    assert_eq!(buck.format(VALUE), "$1,234.12");
}

#[test]
fn test_placeholder_is_never_rendered() {
    let registry = formatter(FormatOptions::default()).registry().clone();
    for code in registry.codes() {
        for display in [
            CurrencyDisplay::Symbol,
            CurrencyDisplay::NarrowSymbol,
            CurrencyDisplay::Code,
            CurrencyDisplay::Name,
        ] {
            let options = FormatOptions::currency(code).with_currency_display(display);
            let instance = formatter(options);
            for value in [0.0, -1.0, VALUE, 1e12] {
                assert!(
                    !instance.format(value).contains(PLACEHOLDER_CODE),
                    "{code} rendered the placeholder"
                );
            }
        }
    }
}

#[test]
fn test_default_decimals_are_exact() {
    let registry = formatter(FormatOptions::default()).registry().clone();
    for code in registry.codes() {
        let decimals = usize::from(registry.lookup(code).unwrap().default_decimals);
        let options = FormatOptions::currency(code).with_currency_display(CurrencyDisplay::Code);
        let parts = formatter(options).format_to_parts(VALUE);
        let fraction = parts
            .iter()
            .find(|p| p.kind == exch_number_format::PartType::Fraction)
            .map_or(0, |p| p.value.chars().count());
        assert_eq!(fraction, decimals, "{code}");
    }
}

#[test]
fn test_configuration_errors() {
    let reserved = FormatOptions::currency("BTC").with_alias(PLACEHOLDER_CODE, "BTC");
    assert!(matches!(
        ExchNumberFormat::new("en-US", reserved),
        Err(Error::ReservedCode(_))
    ));

    let shadow = FormatOptions::currency("EUR")
        .with_custom_currency("eur", CurrencyDescriptor::new("E", "E", "EUR", "Euro", 2));
    assert!(matches!(
        ExchNumberFormat::new("en-US", shadow),
        Err(Error::NativeCurrencyCollision(code)) if code == "eur"
    ));
}
