//! PDF rendering of priced invoices.
//!
//! The invoice is first reduced to a [`DocumentModel`] of display strings, then
//! laid out on A4 pages with the base-14 Helvetica fonts:
//!
//! | Block | Content |
//! |-------|---------|
//! | Letterhead | company name, tagline |
//! | Metadata | invoice number, issue date, optional due date |
//! | Bill To | name and address lines |
//! | Items | description, qty, unit price, line total; subtotal, tax, total |
//! | Notes | optional free text |
//! | Footer | fixed contact lines |

mod fonts;
mod generate;
mod layout;
mod model;

pub use fonts::Face;
pub use generate::{generate_invoice, generate_invoice_with, render_invoice};
pub use layout::render_pdf;
pub use model::{DocumentModel, ItemRow, SummaryRow};
