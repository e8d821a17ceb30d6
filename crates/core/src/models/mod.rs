//! Shared domain models.

use serde::{Deserialize, Serialize};

/// Image shown when a deal carries no thumbnail.
pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/300x200?text=No+Image";

/// Purchase redirect endpoint of the deals site.
pub const REDIRECT_URL: &str = "https://www.cheapshark.com/redirect";

/// A deal normalized into the uniform shape used by the catalog,
/// regardless of whether it came from the deals feed or a title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Game id, or the deal id when the source has no game id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Current price.
    pub sale_price: f64,
    /// List price; equal to `sale_price` when the source omits it.
    pub normal_price: f64,
    /// Discount percentage in `[0, 100]`.
    pub savings_percent: f64,
    /// Cover thumbnail, if the source provided a non-empty one.
    pub thumbnail_url: Option<String>,
    /// Key into the store table.
    pub store_id: String,
    /// Deal id used for the purchase link, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<String>,
}

impl GameRecord {
    /// Rounded discount for a badge, `None` when there is no discount.
    pub fn discount_badge(&self) -> Option<u32> {
        let rounded = self.savings_percent.round();
        if rounded > 0.0 {
            Some(rounded as u32)
        } else {
            None
        }
    }

    /// Whether the list price is above the sale price.
    pub fn has_markdown(&self) -> bool {
        self.normal_price > self.sale_price
    }

    /// Money saved against the list price, rounded to cents.
    pub fn savings_amount(&self) -> f64 {
        round_cents((self.normal_price - self.sale_price).max(0.0))
    }

    /// Thumbnail to display, falling back to the placeholder image.
    pub fn thumbnail_or_placeholder(&self) -> &str {
        self.thumbnail_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(PLACEHOLDER_THUMBNAIL)
    }

    /// Purchase link; uses the deal id when present, else the record id.
    pub fn redirect_url(&self) -> String {
        let target = self.deal_id.as_deref().unwrap_or(&self.id);
        format!("{REDIRECT_URL}?dealID={target}")
    }
}

/// Round a price to two decimals.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a price the way the storefront shows it.
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}
