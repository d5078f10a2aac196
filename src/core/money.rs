use rust_decimal::Decimal;
use tracing::debug;

use super::error::InvoiceError;
use super::locales::{self, LocaleUnavailable, MoneyConventions};
use super::totals::to_cents;
use super::types::{AmountError, AmountInput};

/// Format an amount for display, rounded half-up to cents.
///
/// With a known `locale` the amount uses that locale's symbol and separators;
/// otherwise it falls back to `$` with comma grouping (`$126,250.00`).
/// Non-numeric input is an error, never a default string; a number too large
/// for [`Decimal`] is an arithmetic error.
pub fn format_money(amount: &AmountInput, locale: Option<&str>) -> Result<String, InvoiceError> {
    let value = amount.to_decimal().map_err(|e| match e {
        AmountError::NotNumeric => InvoiceError::InvalidAmount(amount.to_string()),
        AmountError::OutOfRange => InvoiceError::Arithmetic(format!("amount {amount} is {e}")),
    })?;
    Ok(format_decimal(value, locale))
}

/// Format an exact decimal amount. See [`format_money`].
pub fn format_decimal(value: Decimal, locale: Option<&str>) -> String {
    let cents = to_cents(value);
    match localized(cents, locale) {
        Ok(text) => text,
        Err(reason) => {
            debug!(%reason, "using plain currency format");
            plain(cents)
        }
    }
}

fn localized(cents: Decimal, locale: Option<&str>) -> Result<String, LocaleUnavailable> {
    let conventions = locales::conventions_for(locale.ok_or(LocaleUnavailable::NotSet)?)?;
    Ok(apply(cents, &conventions))
}

fn apply(cents: Decimal, conv: &MoneyConventions) -> String {
    let number = group(cents.abs(), conv.thousands, conv.decimal);
    let gap = if conv.separated { " " } else { "" };
    let body = if conv.symbol_first {
        format!("{}{gap}{number}", conv.symbol)
    } else {
        format!("{number}{gap}{}", conv.symbol)
    };
    if cents.is_sign_negative() {
        format!("-{body}")
    } else {
        body
    }
}

/// Fixed fallback: `$` followed by the comma-grouped signed amount.
fn plain(cents: Decimal) -> String {
    let number = group(cents.abs(), ",", ".");
    if cents.is_sign_negative() {
        format!("$-{number}")
    } else {
        format!("${number}")
    }
}

/// Group the integer digits of a non-negative two-place amount.
fn group(cents: Decimal, thousands: &str, decimal: &str) -> String {
    let text = cents.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push_str(thousands);
        }
        grouped.push(digit);
    }
    format!("{grouped}{decimal}{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn plain_fallback() {
        assert_eq!(format_decimal(dec!(126250), None), "$126,250.00");
        assert_eq!(format_decimal(dec!(0), None), "$0.00");
        assert_eq!(format_decimal(dec!(999.999), None), "$1,000.00");
        assert_eq!(format_decimal(dec!(1234567.891), None), "$1,234,567.89");
    }

    #[test]
    fn negative_fallback_keeps_sign_after_symbol() {
        assert_eq!(format_decimal(dec!(-1234.5), None), "$-1,234.50");
    }

    #[test]
    fn grouping_boundaries() {
        assert_eq!(group(dec!(100.00), ",", "."), "100.00");
        assert_eq!(group(dec!(1000.00), ",", "."), "1,000.00");
        assert_eq!(group(dec!(100000.00), ",", "."), "100,000.00");
    }

    #[test]
    fn locale_aware() {
        assert_eq!(format_decimal(dec!(1234.5), Some("en_US")), "$1,234.50");
        assert_eq!(format_decimal(dec!(1234.5), Some("de_DE")), "1.234,50 €");
        assert_eq!(format_decimal(dec!(1234.5), Some("en_GB")), "£1,234.50");
        assert_eq!(format_decimal(dec!(-1234.5), Some("nl_NL")), "-€ 1.234,50");
    }

    #[test]
    fn unusable_locale_falls_back() {
        assert_eq!(format_decimal(dec!(1234.5), Some("C")), "$1,234.50");
        assert_eq!(format_decimal(dec!(1234.5), Some("tlh_QO")), "$1,234.50");
    }
}
