use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// The top-level invoice record, after validation has filled in defaults.
///
/// JSON keys are snake_case; the camelCase spellings are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Opaque invoice identifier, e.g. "CTCG-2025-0001".
    #[serde(alias = "invoiceNumber")]
    pub invoice_number: String,
    /// Issue date, kept exactly as supplied.
    pub date: DateInput,
    /// Optional payment due date.
    #[serde(default, alias = "dueDate")]
    pub due_date: Option<DateInput>,
    /// Billing party.
    #[serde(alias = "billTo")]
    pub bill_to: BillTo,
    /// Invoice lines, in display order.
    pub items: Vec<LineItem>,
    /// Tax rate as a fraction (0.19 = 19%). Not range-checked.
    #[serde(default = "AmountInput::zero_rate", alias = "taxRate")]
    pub tax_rate: AmountInput,
    /// Free text printed under the totals. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

/// Billing party: a name and a postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillTo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: BillingAddress,
}

/// Postal address, either one line of text or an ordered list of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BillingAddress {
    Line(String),
    Lines(Vec<String>),
}

impl Default for BillingAddress {
    fn default() -> Self {
        Self::Line(String::new())
    }
}

impl BillingAddress {
    /// Address lines as they should be printed. A blank single line yields nothing;
    /// list entries are passed through untouched.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Line(line) if line.is_empty() => Vec::new(),
            Self::Line(line) => vec![line.as_str()],
            Self::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

/// One row of the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    /// Quantity; absent means 0. An explicit `null` is kept and is not a number.
    #[serde(
        default,
        deserialize_with = "present_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub qty: Option<AmountInput>,
    /// Price per unit; absent means 0.00.
    #[serde(
        default,
        alias = "unitPrice",
        deserialize_with = "present_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<AmountInput>,
}

/// A key that is present always yields `Some`, even when its value is `null`.
fn present_amount<'de, D>(deserializer: D) -> Result<Option<AmountInput>, D::Error>
where
    D: Deserializer<'de>,
{
    AmountInput::deserialize(deserializer).map(Some)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A calendar date as supplied by the caller: either a real date or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
}

impl DateInput {
    /// True when there is nothing to print.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A numeric value exactly as the caller supplied it.
///
/// Conversion to [`Decimal`] is deferred to the totals calculator and the
/// currency formatter, which reject anything non-numeric. Numbers convert via
/// their shortest decimal text, so `10.005` stays `10.005` rather than picking
/// up binary floating-point noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl AmountInput {
    pub(crate) fn zero_rate() -> Self {
        Self::from(0.0)
    }

    /// Exact decimal value of the input.
    ///
    /// Numbers whose magnitude exceeds what [`Decimal`] holds (about 7.9e28)
    /// are [`AmountError::OutOfRange`]; magnitudes below its smallest step
    /// read as zero.
    pub fn to_decimal(&self) -> Result<Decimal, AmountError> {
        match self {
            Self::Number(number) => {
                if let Some(i) = number.as_i64() {
                    Ok(Decimal::from(i))
                } else if let Some(u) = number.as_u64() {
                    Ok(Decimal::from(u))
                } else {
                    parse_decimal(&number.to_string())
                }
            }
            Self::Text(text) => parse_decimal(text.trim()),
            Self::Other(_) => Err(AmountError::NotNumeric),
        }
    }
}

/// Why an [`AmountInput`] has no decimal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("not a number")]
    NotNumeric,
    #[error("outside the decimal range")]
    OutOfRange,
}

fn parse_decimal(text: &str) -> Result<Decimal, AmountError> {
    if let Ok(value) = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
        return Ok(value);
    }
    // Rust's float grammar also accepts "inf" and "NaN"; those stay non-numeric.
    match text.parse::<f64>() {
        Ok(float) if float.is_finite() && float.abs() >= 1.0 => Err(AmountError::OutOfRange),
        Ok(float) if float.is_finite() => Ok(Decimal::ZERO),
        _ => Err(AmountError::NotNumeric),
    }
}

impl fmt::Display for AmountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<serde_json::Value> for AmountInput {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::String(text) => Self::Text(text),
            other => Self::Other(other),
        }
    }
}

impl From<AmountInput> for serde_json::Value {
    fn from(amount: AmountInput) -> Self {
        match amount {
            AmountInput::Number(number) => Self::Number(number),
            AmountInput::Text(text) => Self::String(text),
            AmountInput::Other(value) => value,
        }
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for AmountInput {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for AmountInput {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(number) => Self::Number(number),
            None => Self::Text(value.to_string()),
        }
    }
}

impl From<&str> for AmountInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Totals for a list of line items.
///
/// All amounts are rounded half-up to two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Per-item `qty × unit_price`, in item order.
    pub line_totals: Vec<Decimal>,
    /// Sum of the rounded line totals.
    pub subtotal: Decimal,
    /// `subtotal × tax_rate`.
    pub tax: Decimal,
    /// `subtotal + tax`.
    pub total: Decimal,
    /// The tax rate as an exact decimal fraction.
    pub tax_rate: Decimal,
}

/// A line item paired with its exact amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLine {
    pub item: LineItem,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// A validated invoice with every derived amount computed, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedInvoice {
    pub invoice_number: String,
    pub date: DateInput,
    pub due_date: Option<DateInput>,
    pub bill_to: BillTo,
    pub notes: String,
    pub lines: Vec<PricedLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub tax_rate: Decimal,
}
