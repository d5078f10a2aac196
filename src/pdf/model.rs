use crate::core::{Letterhead, PricedInvoice, RenderConfig, format_decimal, tax_label};

/// Everything printed on the invoice, in reading order, as display strings.
///
/// Building the model is the last step that touches numbers; the PDF writer
/// only places text.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentModel {
    /// Document title for the PDF info dictionary.
    pub title: String,
    pub letterhead: Letterhead,
    /// Label/value pairs: `Invoice #:`, `Date:` and, if set, `Due Date:`.
    pub metadata: Vec<[String; 4]>,
    pub bill_to: Vec<String>,
    pub header: [String; 4],
    pub rows: Vec<ItemRow>,
    pub summary: Vec<SummaryRow>,
    pub notes: Option<String>,
    pub footer: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub description: String,
    pub qty: String,
    pub unit_price: String,
    pub line_total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub amount: String,
    pub bold: bool,
}

impl DocumentModel {
    pub fn build(invoice: &PricedInvoice, config: &RenderConfig) -> Self {
        let locale = config.locale();
        let money = |value| format_decimal(value, locale);

        let mut metadata = vec![[
            "Invoice #:".to_string(),
            invoice.invoice_number.clone(),
            "Date:".to_string(),
            invoice.date.to_string(),
        ]];
        if let Some(due) = invoice.due_date.as_ref().filter(|d| !d.is_blank()) {
            metadata.push([
                "Due Date:".to_string(),
                due.to_string(),
                String::new(),
                String::new(),
            ]);
        }

        let mut bill_to = Vec::new();
        if !invoice.bill_to.name.is_empty() {
            bill_to.push(invoice.bill_to.name.clone());
        }
        bill_to.extend(invoice.bill_to.address.lines().into_iter().map(String::from));

        let rows = invoice
            .lines
            .iter()
            .map(|line| ItemRow {
                description: line.item.description.clone(),
                qty: line
                    .item
                    .qty
                    .as_ref()
                    .map_or_else(|| "0".to_string(), ToString::to_string),
                unit_price: money(line.unit_price),
                line_total: money(line.line_total),
            })
            .collect();

        let summary = vec![
            SummaryRow {
                label: "Subtotal:".into(),
                amount: money(invoice.subtotal),
                bold: false,
            },
            SummaryRow {
                label: tax_label(invoice.tax_rate),
                amount: money(invoice.tax),
                bold: false,
            },
            SummaryRow {
                label: "Total:".into(),
                amount: money(invoice.total),
                bold: true,
            },
        ];

        Self {
            title: format!("Invoice {}", invoice.invoice_number),
            letterhead: config.letterhead.clone(),
            metadata,
            bill_to,
            header: ["Description", "Qty", "Unit price", "Line total"].map(String::from),
            rows,
            summary,
            notes: Some(invoice.notes.clone()).filter(|n| !n.is_empty()),
            footer: config.footer.clone(),
        }
    }

    /// Plain-text rendering of the model, one block element per line.
    pub fn outline(&self) -> String {
        let mut out = Vec::new();
        out.push(format!("# {}", self.letterhead.company));
        out.push(self.letterhead.tagline.clone());
        for row in &self.metadata {
            let cells: Vec<&str> = row.iter().map(String::as_str).filter(|c| !c.is_empty()).collect();
            out.push(cells.join(" "));
        }
        out.push(format!("Bill To: {}", self.bill_to.join(" / ")));
        out.push(format!("| {} |", self.header.join(" | ")));
        for row in &self.rows {
            out.push(format!(
                "| {} | {} | {} | {} |",
                row.description, row.qty, row.unit_price, row.line_total
            ));
        }
        for row in &self.summary {
            if row.bold {
                out.push(format!("**{}** {}", row.label, row.amount));
            } else {
                out.push(format!("{} {}", row.label, row.amount));
            }
        }
        if let Some(notes) = &self.notes {
            out.push(format!("Notes: {notes}"));
        }
        out.extend(self.footer.iter().cloned());
        out.join("\n")
    }
}
