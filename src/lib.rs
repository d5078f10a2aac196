//! # tcg-invoice
//!
//! Invoice generation for Contoso TCG: validate an invoice record, compute its
//! totals, and render a printable PDF.
//!
//! All monetary values use [`rust_decimal::Decimal`] rather than floating point,
//! and every step rounds half-up to cents before the next one uses it.
//!
//! ## Quick Start
//!
//! ```rust
//! use tcg_invoice::core::*;
//! use rust_decimal_macros::dec;
//! use serde_json::json;
//!
//! let record = validate(json!({
//!     "invoice_number": "CTCG-2025-0002",
//!     "date": "2025-03-01",
//!     "bill_to": {"name": "Ms. Jane Doe", "address": "742 Evergreen Terrace"},
//!     "items": [{"description": "Sol Ring", "qty": 3, "unit_price": 10.005}],
//!     "tax_rate": 0.1
//! }))
//! .unwrap();
//!
//! let totals = compute_totals(&record.items, &record.tax_rate).unwrap();
//! assert_eq!(totals.line_totals, vec![dec!(30.02)]);
//! assert_eq!(totals.tax, dec!(3.00));
//! assert_eq!(totals.total, dec!(33.02));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `pdf` (default) | PDF rendering and [`generate_invoice`](pdf::generate_invoice) |

pub mod core;

#[cfg(feature = "pdf")]
pub mod pdf;

// Re-export core types at crate root for convenience
pub use crate::core::*;

#[cfg(feature = "pdf")]
pub use crate::pdf::{generate_invoice, generate_invoice_with};
