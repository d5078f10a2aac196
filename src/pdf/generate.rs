use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use super::layout::render_pdf;
use super::model::DocumentModel;
use crate::core::{InvoiceError, PricedInvoice, RenderConfig, price, validate};

/// Validate `invoice_data`, compute its totals and write the PDF to `output_path`.
///
/// The parent directory is created if it does not exist. On error nothing is
/// cleaned up; a failed call may or may not leave a file behind.
pub fn generate_invoice(
    invoice_data: Value,
    output_path: impl AsRef<Path>,
) -> Result<(), InvoiceError> {
    generate_invoice_with(invoice_data, output_path, &RenderConfig::default())
}

/// [`generate_invoice`] with a custom letterhead, footer, locale or page size.
pub fn generate_invoice_with(
    invoice_data: Value,
    output_path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<(), InvoiceError> {
    let record = validate(invoice_data)?;
    let invoice = price(record)?;
    let bytes = render_invoice(&invoice, config)?;

    let path = output_path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes)?;

    info!(
        path = %path.display(),
        invoice_number = %invoice.invoice_number,
        total = %invoice.total,
        bytes = bytes.len(),
        "wrote invoice"
    );
    Ok(())
}

/// Render an already-priced invoice to PDF bytes.
pub fn render_invoice(invoice: &PricedInvoice, config: &RenderConfig) -> Result<Vec<u8>, InvoiceError> {
    let model = DocumentModel::build(invoice, config);
    render_pdf(&model, &config.page)
}
