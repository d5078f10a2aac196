use thiserror::Error;

/// Errors that can occur while validating, pricing or rendering an invoice.
///
/// Every variant is terminal for the current generation call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// A required top-level field is absent from the input record.
    #[error("missing required invoice field: {field}")]
    MissingField { field: &'static str },

    /// A field is present but has the wrong shape (e.g. `items` is not a list).
    #[error("{field} must be {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    /// A quantity, unit price or tax rate cannot be read as a decimal number.
    #[error("{field} is not a numeric amount: {value}")]
    NonNumericAmount { field: String, value: String },

    /// The currency formatter was handed something that is not a number.
    #[error("amount must be numeric, got {0}")]
    InvalidAmount(String),

    /// Decimal overflow while computing totals.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// The record has the required keys but a value does not fit the invoice model.
    #[error("malformed invoice record: {0}")]
    Malformed(String),

    /// The input text is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PDF assembly failed.
    #[error("render error: {0}")]
    Render(String),

    /// Writing the output artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InvoiceError {
    pub(crate) fn non_numeric(field: impl Into<String>, value: impl ToString) -> Self {
        Self::NonNumericAmount {
            field: field.into(),
            value: value.to_string(),
        }
    }
}
