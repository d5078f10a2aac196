use rust_decimal_macros::dec;
use serde_json::json;
use tcg_invoice::core::*;

#[test]
fn formats_numbers_and_numeric_text() {
    assert_eq!(format_money(&AmountInput::from(125000.0), None).unwrap(), "$125,000.00");
    assert_eq!(format_money(&AmountInput::from(450), None).unwrap(), "$450.00");
    assert_eq!(format_money(&AmountInput::from("1234.5"), None).unwrap(), "$1,234.50");
    assert_eq!(format_money(&AmountInput::from(dec!(0.125)), None).unwrap(), "$0.13");
}

#[test]
fn rounds_half_up_to_cents() {
    assert_eq!(format_money(&AmountInput::from(10.005), None).unwrap(), "$10.01");
    assert_eq!(format_money(&AmountInput::from("2.345"), None).unwrap(), "$2.35");
    assert_eq!(format_money(&AmountInput::from("-2.345"), None).unwrap(), "$-2.35");
}

#[test]
fn non_numeric_text_is_invalid_amount() {
    let err = format_money(&AmountInput::from("twelve dollars"), None).unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidAmount(ref v) if v == "twelve dollars"));
    assert_eq!(err.to_string(), "amount must be numeric, got twelve dollars");
}

#[test]
fn non_numeric_json_is_invalid_amount() {
    for bad in [json!(null), json!(false), json!([]), json!({})] {
        assert!(matches!(
            format_money(&AmountInput::from(bad), Some("en_US")),
            Err(InvoiceError::InvalidAmount(_))
        ));
    }
}

#[test]
fn locale_aware_tier() {
    let amount = AmountInput::from("126250");
    assert_eq!(format_money(&amount, Some("en_US.UTF-8")).unwrap(), "$126,250.00");
    assert_eq!(format_money(&amount, Some("de_DE")).unwrap(), "126.250,00 €");
    assert_eq!(format_money(&amount, Some("fr-FR")).unwrap(), "126 250,00 €");
    assert_eq!(format_money(&amount, Some("de_CH")).unwrap(), "CHF 126'250.00");
}

#[test]
fn fallback_tier_never_fails() {
    let amount = AmountInput::from("126250");
    for locale in [None, Some("C"), Some("POSIX"), Some("zz_ZZ"), Some("")] {
        assert_eq!(format_money(&amount, locale).unwrap(), "$126,250.00");
    }
}

#[test]
fn format_decimal_matches_format_money() {
    let value = dec!(800);
    assert_eq!(
        format_decimal(value, None),
        format_money(&AmountInput::from(value), None).unwrap()
    );
}

#[test]
fn out_of_range_numbers_are_arithmetic_errors() {
    let err = format_money(&AmountInput::from(1e300), None).unwrap_err();
    assert!(matches!(err, InvoiceError::Arithmetic(_)), "got {err:?}");

    let err = format_money(&AmountInput::from("-1e29"), Some("en_US")).unwrap_err();
    assert!(matches!(err, InvoiceError::Arithmetic(_)), "got {err:?}");
}

#[test]
fn infinite_text_is_invalid_amount() {
    assert!(matches!(
        format_money(&AmountInput::from("inf"), None),
        Err(InvoiceError::InvalidAmount(_))
    ));
}
