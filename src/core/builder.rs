use super::types::*;

/// Builder for invoice records assembled in code rather than parsed from JSON.
///
/// ```
/// use tcg_invoice::core::*;
/// use chrono::NaiveDate;
///
/// let record = InvoiceRecordBuilder::new("CTCG-2025-0042", NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
///     .bill_to(BillToBuilder::new("Ms. Jane Doe").line("742 Evergreen Terrace").build())
///     .add_item(LineItemBuilder::new("Force of Will (Legacy) — single").qty(1).unit_price("450.00").build())
///     .tax_rate(0.08)
///     .build();
///
/// assert_eq!(record.items.len(), 1);
/// ```
pub struct InvoiceRecordBuilder {
    invoice_number: String,
    date: DateInput,
    due_date: Option<DateInput>,
    bill_to: BillTo,
    items: Vec<LineItem>,
    tax_rate: AmountInput,
    notes: String,
}

impl InvoiceRecordBuilder {
    pub fn new(invoice_number: impl Into<String>, date: impl Into<DateInput>) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            date: date.into(),
            due_date: None,
            bill_to: BillTo::default(),
            items: Vec::new(),
            tax_rate: AmountInput::zero_rate(),
            notes: String::new(),
        }
    }

    pub fn due_date(mut self, date: impl Into<DateInput>) -> Self {
        self.due_date = Some(date.into());
        self
    }

    pub fn bill_to(mut self, bill_to: BillTo) -> Self {
        self.bill_to = bill_to;
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn tax_rate(mut self, rate: impl Into<AmountInput>) -> Self {
        self.tax_rate = rate.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn build(self) -> InvoiceRecord {
        InvoiceRecord {
            invoice_number: self.invoice_number,
            date: self.date,
            due_date: self.due_date,
            bill_to: self.bill_to,
            items: self.items,
            tax_rate: self.tax_rate,
            notes: self.notes,
        }
    }
}

/// Builder for the billing party.
pub struct BillToBuilder {
    name: String,
    lines: Vec<String>,
}

impl BillToBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    /// Append an address line.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn build(self) -> BillTo {
        let address = match self.lines.len() {
            0 => BillingAddress::default(),
            1 => BillingAddress::Line(self.lines.concat()),
            _ => BillingAddress::Lines(self.lines),
        };
        BillTo {
            name: self.name,
            address,
        }
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    description: String,
    qty: Option<AmountInput>,
    unit_price: Option<AmountInput>,
}

impl LineItemBuilder {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            qty: None,
            unit_price: None,
        }
    }

    pub fn qty(mut self, qty: impl Into<AmountInput>) -> Self {
        self.qty = Some(qty.into());
        self
    }

    pub fn unit_price(mut self, price: impl Into<AmountInput>) -> Self {
        self.unit_price = Some(price.into());
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            description: self.description,
            qty: self.qty,
            unit_price: self.unit_price,
        }
    }
}
