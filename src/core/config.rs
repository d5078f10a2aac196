use serde::{Deserialize, Serialize};

use super::error::InvoiceError;

/// Rendering configuration: letterhead, footer, currency locale and page geometry.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```
/// use tcg_invoice::core::RenderConfig;
///
/// let config = RenderConfig::from_json_str(r#"{"locale": "en_US"}"#).unwrap();
/// assert_eq!(config.letterhead.company, "Contoso TCG");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub letterhead: Letterhead,
    /// Lines printed in small type at the end of the document.
    pub footer: Vec<String>,
    /// Locale tag for currency formatting (e.g. "en_US"). `None` uses the `$` fallback.
    pub locale: Option<String>,
    pub page: PageSetup,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            letterhead: Letterhead::default(),
            footer: vec![
                "Contoso TCG — Thank you for buying vintage & legacy Magic cards!".into(),
                "Contact: sales@contosotcg.example | www.contosotcg.example".into(),
            ],
            locale: None,
            page: PageSetup::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, InvoiceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

/// Company block at the top of the first page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Letterhead {
    pub company: String,
    pub tagline: String,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            company: "Contoso TCG".into(),
            tagline: "Vintage & Legacy Magic: cards, singles, graded".into(),
        }
    }
}

/// Page size in points and uniform margin in millimetres. Defaults to A4 with 20 mm margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_mm: f32,
}

impl PageSetup {
    pub const A4: PageSetup = PageSetup {
        width_pt: 595.28,
        height_pt: 841.89,
        margin_mm: 20.0,
    };

    pub fn margin_pt(&self) -> f32 {
        mm_to_pt(self.margin_mm)
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::A4
    }
}

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}
