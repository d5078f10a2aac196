use serde_json::Value;
use tracing::debug;

use super::error::InvoiceError;
use super::types::InvoiceRecord;

/// Required top-level keys in check order, with their accepted camelCase spelling.
const REQUIRED_FIELDS: [(&str, &str); 4] = [
    ("invoice_number", "invoiceNumber"),
    ("date", "date"),
    ("bill_to", "billTo"),
    ("items", "items"),
];

/// Validate a raw invoice record and return it normalized.
///
/// Checks that `invoice_number`, `date`, `bill_to` and `items` are present (in
/// that order, first missing wins) and that `items` is a list. Absent
/// `tax_rate`, `due_date` and `notes` default to `0.0`, `None` and `""`;
/// values already present are kept as-is, including an explicit `0` tax rate.
///
/// Item contents and the tax rate range are not checked here.
pub fn validate(record: Value) -> Result<InvoiceRecord, InvoiceError> {
    let Value::Object(fields) = &record else {
        return Err(InvoiceError::TypeMismatch {
            field: "invoice",
            expected: "an object",
        });
    };

    for (key, alias) in REQUIRED_FIELDS {
        if !fields.contains_key(key) && !fields.contains_key(alias) {
            return Err(InvoiceError::MissingField { field: key });
        }
    }

    if !fields.get("items").is_some_and(Value::is_array) {
        return Err(InvoiceError::TypeMismatch {
            field: "items",
            expected: "a list",
        });
    }

    let record: InvoiceRecord =
        serde_json::from_value(record).map_err(|e| InvoiceError::Malformed(e.to_string()))?;

    debug!(
        invoice_number = %record.invoice_number,
        items = record.items.len(),
        "validated invoice record"
    );
    Ok(record)
}

/// Parse JSON text and [`validate`] it.
pub fn validate_str(json: &str) -> Result<InvoiceRecord, InvoiceError> {
    let value: Value = serde_json::from_str(json)?;
    validate(value)
}
