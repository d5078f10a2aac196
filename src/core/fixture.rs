use chrono::{Local, NaiveDate};
use serde_json::{Value, json};

/// The canonical sample invoice: three vintage cards, no tax, a payment note.
///
/// Subtotal and total are both 126,250.00. The due date equals the issue date.
pub fn demo_invoice_on(date: NaiveDate) -> Value {
    let date = date.format("%Y-%m-%d").to_string();
    json!({
        "invoice_number": "CTCG-2025-0001",
        "date": date,
        "due_date": date,
        "bill_to": {
            "name": "Ms. Jane Doe",
            "address": ["742 Evergreen Terrace", "Springfield, USA"]
        },
        "items": [
            {"description": "Black Lotus (Alpha) — Vintage", "qty": 1, "unit_price": 125000.00},
            {"description": "Tarmogoyf (Legacy playset) — set of 4", "qty": 4, "unit_price": 200.00},
            {"description": "Force of Will (Legacy) — single", "qty": 1, "unit_price": 450.00}
        ],
        "tax_rate": 0.00,
        "notes": "Payment via bank transfer. All cards sold as-is. Contact us for shipping options."
    })
}

/// [`demo_invoice_on`] dated today.
pub fn demo_invoice() -> Value {
    demo_invoice_on(Local::now().date_naive())
}
