use locale_number_format::{
    FormatOptions, LocaleContext, NumberFormatPreference, SignDisplay, Style, UseGrouping,
    format_number,
};

#[test]
fn test_context_from_json() {
    let locale: LocaleContext =
        serde_json::from_str(r#"{"language": "en", "number_format": "decimal_comma"}"#).unwrap();
    assert_eq!(locale.language, "en");
    assert_eq!(locale.number_format, Some(NumberFormatPreference::DecimalComma));
    assert_eq!(format_number(1234.5, Some(&locale), None), "1.234,5");
}

#[test]
fn test_builder_matches_deserialized_context() {
    let built = LocaleContext::new("da").with_number_format(NumberFormatPreference::System);
    let parsed: LocaleContext =
        serde_json::from_str(r#"{"language": "da", "number_format": "system"}"#).unwrap();
    assert_eq!(built, parsed);
    assert_eq!(LocaleContext::new("da").number_format, None);
}

#[test]
fn test_context_without_preference() {
    let locale: LocaleContext = serde_json::from_str(r#"{"language": "fr"}"#).unwrap();
    assert_eq!(locale.number_format, None);
    assert_eq!(format_number(0.5, Some(&locale), None), "0,5");
}

#[test]
fn test_every_preference_name() {
    for (name, preference) in [
        ("comma_decimal", NumberFormatPreference::CommaDecimal),
        ("decimal_comma", NumberFormatPreference::DecimalComma),
        ("space_comma", NumberFormatPreference::SpaceComma),
        ("system", NumberFormatPreference::System),
        ("none", NumberFormatPreference::None),
    ] {
        let parsed: NumberFormatPreference = serde_json::from_str(&format!("\"{name}\"")).unwrap();
        assert_eq!(parsed, preference);
        assert_eq!(serde_json::to_string(&preference).unwrap(), format!("\"{name}\""));
    }
}

#[test]
fn test_unknown_preference_rejected() {
    let result: Result<LocaleContext, _> =
        serde_json::from_str(r#"{"language": "en", "number_format": "dot_dot"}"#);
    assert!(result.is_err());
}

#[test]
fn test_options_accept_camel_case() {
    let options: FormatOptions = serde_json::from_str(
        r#"{"style": "percent", "maximumFractionDigits": 1, "useGrouping": "false", "signDisplay": "exceptZero"}"#,
    )
    .unwrap();
    assert_eq!(options.style, Some(Style::Percent));
    assert_eq!(options.maximum_fraction_digits, Some(1));
    assert_eq!(options.minimum_fraction_digits, None);
    assert_eq!(options.use_grouping, Some(UseGrouping::Off));
    assert_eq!(options.sign_display, Some(SignDisplay::ExceptZero));

    let locale = LocaleContext::new("en").with_number_format(NumberFormatPreference::CommaDecimal);
    assert_eq!(format_number(123.456, Some(&locale), Some(&options)), "+12345.6%");
}

#[test]
fn test_context_from_toml() {
    let locale: LocaleContext = toml::from_str(
        r#"
        language = "de"
        number_format = "space_comma"
        "#,
    )
    .unwrap();
    assert_eq!(format_number(1234.5, Some(&locale), None), "1\u{202f}234,5");
}

#[test]
fn test_currency_options_pass_through() {
    let locale = LocaleContext::new("en").with_number_format(NumberFormatPreference::DecimalComma);
    let options = FormatOptions::default().with_currency("EUR");
    assert_eq!(format_number(1234.5, Some(&locale), Some(&options)), "1.234,50\u{a0}€");
    assert_eq!(format_number("1234.5", Some(&locale), Some(&options)), "1.234,5\u{a0}€");
}
