//! Monetary formatting conventions for the locales the formatter knows about.
//!
//! Lookup is by normalized tag (`en_US`), so `en-US` and `en_US.UTF-8` resolve
//! to the same entry.

use thiserror::Error;

/// How a locale writes a currency amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyConventions {
    pub symbol: &'static str,
    /// Symbol before the number (`$1.00`) rather than after (`1,00 €`).
    pub symbol_first: bool,
    /// Space between symbol and number.
    pub separated: bool,
    pub thousands: &'static str,
    pub decimal: &'static str,
}

/// Why locale-aware formatting was not possible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleUnavailable {
    #[error("no locale configured")]
    NotSet,
    #[error("locale '{0}' has no currency conventions")]
    NoCurrency(String),
    #[error("unknown locale '{0}'")]
    Unknown(String),
}

/// Look up the currency conventions for a locale tag.
pub fn conventions_for(tag: &str) -> Result<MoneyConventions, LocaleUnavailable> {
    let normalized = normalize_tag(tag);
    if normalized == "C" || normalized == "POSIX" {
        return Err(LocaleUnavailable::NoCurrency(tag.to_string()));
    }
    LOCALES
        .binary_search_by_key(&normalized.as_str(), |(name, _)| *name)
        .map(|idx| LOCALES[idx].1)
        .map_err(|_| LocaleUnavailable::Unknown(tag.to_string()))
}

/// `en-us.UTF-8` → `en_US`. Tags without a region are returned as given.
pub fn normalize_tag(tag: &str) -> String {
    let base = tag
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('-', "_");
    match base.split_once('_') {
        Some((lang, region)) => format!("{}_{}", lang.to_lowercase(), region.to_uppercase()),
        None => base,
    }
}

const fn conv(
    symbol: &'static str,
    symbol_first: bool,
    separated: bool,
    thousands: &'static str,
    decimal: &'static str,
) -> MoneyConventions {
    MoneyConventions {
        symbol,
        symbol_first,
        separated,
        thousands,
        decimal,
    }
}

/// Sorted by tag for binary search.
static LOCALES: &[(&str, MoneyConventions)] = &[
    ("de_AT", conv("€", true, true, ".", ",")),
    ("de_CH", conv("CHF", true, true, "'", ".")),
    ("de_DE", conv("€", false, true, ".", ",")),
    ("en_AU", conv("$", true, false, ",", ".")),
    ("en_CA", conv("$", true, false, ",", ".")),
    ("en_GB", conv("£", true, false, ",", ".")),
    ("en_IE", conv("€", true, false, ",", ".")),
    ("en_NZ", conv("$", true, false, ",", ".")),
    ("en_US", conv("$", true, false, ",", ".")),
    ("es_ES", conv("€", false, true, ".", ",")),
    ("fr_CA", conv("$", false, true, " ", ",")),
    ("fr_FR", conv("€", false, true, " ", ",")),
    ("it_IT", conv("€", false, true, ".", ",")),
    ("nl_NL", conv("€", true, true, ".", ",")),
    ("sv_SE", conv("kr", false, true, " ", ",")),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_normalization() {
        assert_eq!(normalize_tag("en_US"), "en_US");
        assert_eq!(normalize_tag("en-us"), "en_US");
        assert_eq!(normalize_tag("de_DE.UTF-8"), "de_DE");
        assert_eq!(normalize_tag("fr_FR@euro"), "fr_FR");
        assert_eq!(normalize_tag("C"), "C");
    }

    #[test]
    fn known_locales() {
        assert_eq!(conventions_for("en_US").unwrap().symbol, "$");
        assert_eq!(conventions_for("en-GB").unwrap().symbol, "£");
        assert!(!conventions_for("de_DE.UTF-8").unwrap().symbol_first);
    }

    #[test]
    fn c_locale_has_no_currency() {
        assert_eq!(
            conventions_for("C"),
            Err(LocaleUnavailable::NoCurrency("C".into()))
        );
        assert!(matches!(
            conventions_for("POSIX"),
            Err(LocaleUnavailable::NoCurrency(_))
        ));
    }

    #[test]
    fn unknown_locale() {
        assert!(matches!(
            conventions_for("xx_YY"),
            Err(LocaleUnavailable::Unknown(_))
        ));
        assert!(matches!(
            conventions_for(""),
            Err(LocaleUnavailable::Unknown(_))
        ));
    }

    #[test]
    fn list_is_sorted() {
        for window in LOCALES.windows(2) {
            assert!(
                window[0].0 < window[1].0,
                "locales not sorted: {} >= {}",
                window[0].0,
                window[1].0
            );
        }
    }
}
