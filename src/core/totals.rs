use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::error::InvoiceError;
use super::types::*;

/// Compute line totals, subtotal, tax and grand total for `items`.
///
/// Each line total is rounded before it is added to the subtotal, so the
/// subtotal can differ by a cent from rounding the raw sum. Missing quantities
/// count as 0 and missing unit prices as 0.00.
pub fn compute_totals(items: &[LineItem], tax_rate: &AmountInput) -> Result<Totals, InvoiceError> {
    let line_totals = items
        .iter()
        .enumerate()
        .map(|(i, item)| line_amounts(i, item).map(|amounts| amounts.line_total))
        .collect::<Result<Vec<_>, _>>()?;

    let summary = summarize(&line_totals, tax_rate)?;
    Ok(Totals {
        line_totals,
        subtotal: summary.subtotal,
        tax: summary.tax,
        total: summary.total,
        tax_rate: summary.tax_rate,
    })
}

/// Price a validated record: every item gets its exact amounts attached and
/// the aggregate figures are computed once for the renderer.
pub fn price(record: InvoiceRecord) -> Result<PricedInvoice, InvoiceError> {
    let amounts = record
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| line_amounts(i, item))
        .collect::<Result<Vec<_>, _>>()?;

    let line_totals: Vec<Decimal> = amounts.iter().map(|a| a.line_total).collect();
    let summary = summarize(&line_totals, &record.tax_rate)?;

    let lines = record
        .items
        .into_iter()
        .zip(amounts)
        .map(|(item, a)| PricedLine {
            item,
            quantity: a.quantity,
            unit_price: a.unit_price,
            line_total: a.line_total,
        })
        .collect();

    Ok(PricedInvoice {
        invoice_number: record.invoice_number,
        date: record.date,
        due_date: record.due_date,
        bill_to: record.bill_to,
        notes: record.notes,
        lines,
        subtotal: summary.subtotal,
        tax: summary.tax,
        total: summary.total,
        tax_rate: summary.tax_rate,
    })
}

/// Label for the tax summary row, e.g. `Tax (8.3%):`.
pub fn tax_label(rate: Decimal) -> String {
    let mut percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    percent.rescale(1);
    format!("Tax ({percent}%):")
}

/// Round half away from zero to `dp` decimal places.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to cents and pin the scale to exactly two places.
pub(crate) fn to_cents(value: Decimal) -> Decimal {
    let mut cents = round_half_up(value, 2);
    if cents.is_zero() {
        cents = Decimal::ZERO;
    }
    cents.rescale(2);
    cents
}

struct LineAmounts {
    quantity: Decimal,
    unit_price: Decimal,
    line_total: Decimal,
}

struct Summary {
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
    tax_rate: Decimal,
}

fn line_amounts(index: usize, item: &LineItem) -> Result<LineAmounts, InvoiceError> {
    let quantity = coerce(item.qty.as_ref(), Decimal::ZERO, || format!("items[{index}].qty"))?;
    let unit_price = coerce(item.unit_price.as_ref(), Decimal::new(0, 2), || {
        format!("items[{index}].unit_price")
    })?;
    let product = quantity.checked_mul(unit_price).ok_or_else(|| {
        InvoiceError::Arithmetic(format!("items[{index}]: {quantity} x {unit_price} overflows"))
    })?;
    Ok(LineAmounts {
        quantity,
        unit_price,
        line_total: to_cents(product),
    })
}

fn summarize(line_totals: &[Decimal], tax_rate: &AmountInput) -> Result<Summary, InvoiceError> {
    let sum = line_totals
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(*line))
        .ok_or_else(|| InvoiceError::Arithmetic("subtotal overflows".into()))?;
    let subtotal = to_cents(sum);

    let rate = coerce(Some(tax_rate), Decimal::ZERO, || "tax_rate".to_string())?;
    let tax = subtotal
        .checked_mul(rate)
        .map(to_cents)
        .ok_or_else(|| InvoiceError::Arithmetic(format!("{subtotal} x {rate} overflows")))?;
    let total = subtotal
        .checked_add(tax)
        .map(to_cents)
        .ok_or_else(|| InvoiceError::Arithmetic("total overflows".into()))?;

    debug!(%subtotal, %tax, %total, lines = line_totals.len(), "computed invoice totals");
    Ok(Summary {
        subtotal,
        tax,
        total,
        tax_rate: rate,
    })
}

fn coerce(
    value: Option<&AmountInput>,
    default: Decimal,
    field: impl FnOnce() -> String,
) -> Result<Decimal, InvoiceError> {
    let Some(amount) = value else {
        return Ok(default);
    };
    amount.to_decimal().map_err(|e| match e {
        AmountError::NotNumeric => InvoiceError::non_numeric(field(), amount),
        AmountError::OutOfRange => {
            InvoiceError::Arithmetic(format!("{} = {amount} is {e}", field()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round_half_up_ties_go_away_from_zero() {
        assert_eq!(round_half_up(dec!(30.015), 2), dec!(30.02));
        assert_eq!(round_half_up(dec!(-30.015), 2), dec!(-30.02));
        assert_eq!(round_half_up(dec!(30.014), 2), dec!(30.01));
    }

    #[test]
    fn to_cents_pins_scale() {
        assert_eq!(to_cents(dec!(125000)).to_string(), "125000.00");
        assert_eq!(to_cents(dec!(1.5)).to_string(), "1.50");
        assert_eq!(to_cents(dec!(-0.001)).to_string(), "0.00");
    }

    #[test]
    fn tax_label_uses_one_decimal() {
        assert_eq!(tax_label(dec!(0)), "Tax (0.0%):");
        assert_eq!(tax_label(dec!(0.19)), "Tax (19.0%):");
        assert_eq!(tax_label(dec!(0.0825)), "Tax (8.3%):");
    }

    #[test]
    fn missing_amounts_default_to_zero() {
        let items = vec![LineItem {
            description: "Mystery booster".into(),
            qty: None,
            unit_price: Some(AmountInput::from(12)),
        }];
        let totals = compute_totals(&items, &AmountInput::from(0.0)).unwrap();
        assert_eq!(totals.line_totals, vec![dec!(0)]);
        assert_eq!(totals.total, dec!(0));
    }
}
