use serde_json::{Value, json};
use tcg_invoice::core::*;

fn record() -> Value {
    json!({
        "invoice_number": "CTCG-2025-0100",
        "date": "2025-06-15",
        "bill_to": {
            "name": "Ms. Jane Doe",
            "address": ["742 Evergreen Terrace", "Springfield, USA"]
        },
        "items": [
            {"description": "Black Lotus (Alpha) — Vintage", "qty": 1, "unit_price": 125000.00}
        ]
    })
}

fn without(field: &str) -> Value {
    let mut raw = record();
    raw.as_object_mut().unwrap().remove(field);
    raw
}

fn missing_field(raw: Value) -> &'static str {
    match validate(raw) {
        Err(InvoiceError::MissingField { field }) => field,
        other => panic!("expected MissingField, got {other:?}"),
    }
}

// --- Required fields ---

#[test]
fn each_required_field_is_reported() {
    assert_eq!(missing_field(without("invoice_number")), "invoice_number");
    assert_eq!(missing_field(without("date")), "date");
    assert_eq!(missing_field(without("bill_to")), "bill_to");
    assert_eq!(missing_field(without("items")), "items");
}

#[test]
fn first_missing_field_wins() {
    let raw = json!({"bill_to": {"name": "x"}});
    assert_eq!(missing_field(raw), "invoice_number");

    let raw = json!({"invoice_number": "A", "items": []});
    assert_eq!(missing_field(raw), "date");

    let raw = json!({"invoice_number": "A", "date": "2025-01-01"});
    assert_eq!(missing_field(raw), "bill_to");
}

#[test]
fn missing_field_message() {
    let err = validate(without("date")).unwrap_err();
    assert_eq!(err.to_string(), "missing required invoice field: date");
}

#[test]
fn missing_field_is_checked_before_items_shape() {
    let mut raw = without("date");
    raw["items"] = json!({"description": "not a list"});
    assert_eq!(missing_field(raw), "date");
}

// --- Items shape ---

#[test]
fn items_as_single_record_is_type_mismatch() {
    let mut raw = record();
    raw["items"] = json!({"description": "Sol Ring", "qty": 1, "unit_price": 5});
    let err = validate(raw).unwrap_err();
    assert!(matches!(
        err,
        InvoiceError::TypeMismatch { field: "items", .. }
    ));
    assert_eq!(err.to_string(), "items must be a list");
}

#[test]
fn items_as_string_or_null_is_type_mismatch() {
    for bad in [json!("Sol Ring"), Value::Null, json!(3)] {
        let mut raw = record();
        raw["items"] = bad;
        assert!(matches!(
            validate(raw),
            Err(InvoiceError::TypeMismatch { field: "items", .. })
        ));
    }
}

#[test]
fn empty_items_are_allowed() {
    let mut raw = record();
    raw["items"] = json!([]);
    let rec = validate(raw).unwrap();
    assert!(rec.items.is_empty());
}

// --- Defaults ---

#[test]
fn optional_fields_get_defaults() {
    let rec = validate(record()).unwrap();
    assert_eq!(rec.tax_rate.to_decimal(), Ok(rust_decimal::Decimal::ZERO));
    assert_eq!(rec.due_date, None);
    assert_eq!(rec.notes, "");
}

#[test]
fn explicit_zero_tax_rate_is_preserved() {
    let mut raw = record();
    raw["tax_rate"] = json!(0);
    let rec = validate(raw).unwrap();
    assert_eq!(rec.tax_rate, AmountInput::from(0));
    assert_ne!(rec.tax_rate, AmountInput::from(0.0));
}

#[test]
fn present_values_are_not_overwritten() {
    let mut raw = record();
    raw["tax_rate"] = json!("0.0825");
    raw["due_date"] = json!("net 30");
    raw["notes"] = json!("Handle with sleeves");
    let rec = validate(raw).unwrap();
    assert_eq!(rec.tax_rate, AmountInput::Text("0.0825".into()));
    assert_eq!(rec.due_date, Some(DateInput::Text("net 30".into())));
    assert_eq!(rec.notes, "Handle with sleeves");
}

#[test]
fn tax_rate_range_is_not_checked() {
    let mut raw = record();
    raw["tax_rate"] = json!(1.5);
    assert!(validate(raw).is_ok());
}

// --- Items are not inspected ---

#[test]
fn item_contents_are_not_validated() {
    let mut raw = record();
    raw["items"] = json!([
        {"description": "Mystery", "qty": "lots", "unit_price": "ask"},
        {}
    ]);
    let rec = validate(raw).unwrap();
    assert_eq!(rec.items.len(), 2);
    assert_eq!(rec.items[0].qty, Some(AmountInput::Text("lots".into())));
    assert_eq!(rec.items[1], LineItem::default());
}

#[test]
fn item_order_is_preserved() {
    let mut raw = record();
    raw["items"] = json!([
        {"description": "first"},
        {"description": "second"},
        {"description": "third"}
    ]);
    let rec = validate(raw).unwrap();
    let names: Vec<&str> = rec.items.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(names, ["first", "second", "third"]);
}

// --- Addresses ---

#[test]
fn address_as_list_or_string() {
    let rec = validate(record()).unwrap();
    assert_eq!(
        rec.bill_to.address.lines(),
        vec!["742 Evergreen Terrace", "Springfield, USA"]
    );

    let mut raw = record();
    raw["bill_to"]["address"] = json!("1 Main St, Springfield");
    let rec = validate(raw).unwrap();
    assert_eq!(rec.bill_to.address.lines(), vec!["1 Main St, Springfield"]);
}

#[test]
fn missing_name_and_address_default_to_empty() {
    let mut raw = record();
    raw["bill_to"] = json!({});
    let rec = validate(raw).unwrap();
    assert_eq!(rec.bill_to.name, "");
    assert!(rec.bill_to.address.lines().is_empty());
}

#[test]
fn null_notes_and_bill_to_parts_read_as_empty() {
    let mut raw = record();
    raw["notes"] = Value::Null;
    raw["bill_to"]["name"] = Value::Null;
    raw["bill_to"]["address"] = Value::Null;
    let rec = validate(raw).unwrap();
    assert_eq!(rec.notes, "");
    assert_eq!(rec.bill_to.name, "");
    assert!(rec.bill_to.address.lines().is_empty());
}

#[test]
fn null_amounts_are_kept_for_the_calculator() {
    let mut raw = record();
    raw["items"] = json!([{"description": "Sol Ring", "qty": null, "unit_price": null}, {"description": "Bulk"}]);
    let rec = validate(raw).unwrap();
    assert_eq!(rec.items[0].qty, Some(AmountInput::from(Value::Null)));
    assert_eq!(rec.items[0].unit_price, Some(AmountInput::from(Value::Null)));
    assert_eq!(rec.items[1].qty, None);
    assert_eq!(rec.items[1].unit_price, None);
}

// --- JSON text entry point ---

#[test]
fn validate_str_round_trips_demo_fixture() {
    let text = demo_invoice().to_string();
    let rec = validate_str(&text).unwrap();
    assert_eq!(rec.invoice_number, "CTCG-2025-0001");
    assert_eq!(rec.items.len(), 3);
}

// --- Builders produce the same record as validation ---

#[test]
fn builder_matches_validated_json() {
    let date = chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let built = InvoiceRecordBuilder::new("CTCG-2025-0100", date)
        .bill_to(
            BillToBuilder::new("Ms. Jane Doe")
                .line("742 Evergreen Terrace")
                .line("Springfield, USA")
                .build(),
        )
        .add_item(
            LineItemBuilder::new("Black Lotus (Alpha) — Vintage")
                .qty(1)
                .unit_price(125000.00)
                .build(),
        )
        .build();

    assert_eq!(built, validate(record()).unwrap());
}
