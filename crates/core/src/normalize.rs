//! Conversion of raw API records into [`GameRecord`]s.
//!
//! Deal records already carry sale price, list price and discount, so they
//! only need numeric coercion. Search records only know the cheapest price
//! observed; their list price and discount come from [`SearchPricePolicy`].

use tracing::debug;

use crate::{
    api::{DealRecord, SearchRecord},
    models::{round_cents, GameRecord},
    stores::SEARCH_STORE_ID,
};

/// Fixed pricing approximation applied to title-search results.
///
/// The discount is a flat placeholder and is not derived from the synthetic
/// list price (a 1.5x markup would imply 33.3%).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPricePolicy {
    /// Multiplier applied to the cheapest price to fake a list price.
    pub list_price_markup: f64,
    /// Discount reported for every search result.
    pub savings_percent: f64,
    /// Store the search endpoint represents.
    pub store_id: String,
}

impl Default for SearchPricePolicy {
    fn default() -> Self {
        Self {
            list_price_markup: 1.5,
            savings_percent: 33.0,
            store_id: SEARCH_STORE_ID.to_string(),
        }
    }
}

impl SearchPricePolicy {
    /// Synthetic list price for a cheapest observed price.
    pub fn list_price(&self, cheapest: f64) -> f64 {
        round_cents(cheapest * self.list_price_markup)
    }
}

/// Normalize an entry of the deals feed.
pub fn from_deal(record: DealRecord) -> GameRecord {
    let sale_price = parse_price(record.sale_price.as_deref(), "salePrice");
    let normal_price = match record.normal_price.as_deref() {
        Some(raw) if !raw.trim().is_empty() => parse_price(Some(raw), "normalPrice"),
        _ => sale_price,
    };
    let savings_percent = parse_price(record.savings.as_deref(), "savings").min(100.0);
    let deal_id = non_empty(record.deal_id);
    let id = non_empty(record.game_id)
        .or_else(|| deal_id.clone())
        .unwrap_or_default();

    GameRecord {
        id,
        title: record.title.unwrap_or_default().trim().to_string(),
        sale_price,
        normal_price,
        savings_percent,
        thumbnail_url: non_empty(record.thumb),
        store_id: non_empty(record.store_id).unwrap_or_default(),
        deal_id,
    }
}

/// Normalize a title-search entry using the given pricing policy.
pub fn from_search(record: SearchRecord, policy: &SearchPricePolicy) -> GameRecord {
    let cheapest = parse_price(record.cheapest.as_deref(), "cheapest");
    let deal_id = non_empty(record.cheapest_deal_id);
    let id = non_empty(record.game_id)
        .or_else(|| deal_id.clone())
        .unwrap_or_default();

    GameRecord {
        id,
        title: record.external.unwrap_or_default().trim().to_string(),
        sale_price: cheapest,
        normal_price: policy.list_price(cheapest),
        savings_percent: policy.savings_percent,
        thumbnail_url: non_empty(record.thumb),
        store_id: policy.store_id.clone(),
        deal_id,
    }
}

/// Parse a numeric API field; anything unusable becomes `0.0`.
pub fn parse_price(raw: Option<&str>, field: &str) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        Ok(value) => {
            debug!(field, value, "out of range numeric field, using 0");
            0.0
        }
        Err(_) => {
            debug!(field, raw, "unparseable numeric field, using 0");
            0.0
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(cheapest: &str) -> SearchRecord {
        SearchRecord {
            game_id: Some("167613".to_string()),
            cheapest_deal_id: Some("deal-1".to_string()),
            external: Some("Batman: Arkham Knight".to_string()),
            cheapest: Some(cheapest.to_string()),
            thumb: Some(String::new()),
        }
    }

    #[test]
    fn search_records_use_price_policy() {
        let game = from_search(search("10.00"), &SearchPricePolicy::default());
        assert_eq!(game.sale_price, 10.0);
        assert_eq!(game.normal_price, 15.0);
        assert_eq!(game.savings_percent, 33.0);
        assert_eq!(game.store_id, "1");
        assert_eq!(game.id, "167613");
        assert_eq!(game.deal_id.as_deref(), Some("deal-1"));
        assert_eq!(game.thumbnail_url, None);
    }

    #[test]
    fn synthetic_list_price_is_rounded() {
        let game = from_search(search("0.1"), &SearchPricePolicy::default());
        assert_eq!(game.normal_price, 0.15);
    }

    #[test]
    fn policy_is_replaceable() {
        let policy = SearchPricePolicy {
            list_price_markup: 2.0,
            savings_percent: 50.0,
            store_id: "7".to_string(),
        };
        let game = from_search(search("4"), &policy);
        assert_eq!(game.normal_price, 8.0);
        assert_eq!(game.savings_percent, 50.0);
        assert_eq!(game.store_id, "7");
    }

    #[test]
    fn deal_records_are_coerced() {
        let game = from_deal(DealRecord {
            game_id: Some("A".to_string()),
            deal_id: Some("d-A".to_string()),
            title: Some(" Half-Life ".to_string()),
            sale_price: Some("10".to_string()),
            normal_price: Some("20".to_string()),
            savings: Some("50.000000".to_string()),
            thumb: Some("https://img/1.jpg".to_string()),
            store_id: Some("1".to_string()),
        });
        assert_eq!(game.id, "A");
        assert_eq!(game.title, "Half-Life");
        assert_eq!(game.sale_price, 10.0);
        assert_eq!(game.normal_price, 20.0);
        assert_eq!(game.savings_percent, 50.0);
        assert_eq!(game.thumbnail_url.as_deref(), Some("https://img/1.jpg"));
    }

    #[test]
    fn deal_defaults_fill_missing_fields() {
        let game = from_deal(DealRecord {
            deal_id: Some("only-deal".to_string()),
            sale_price: Some("4.5".to_string()),
            savings: Some("n/a".to_string()),
            ..DealRecord::default()
        });
        assert_eq!(game.id, "only-deal");
        assert_eq!(game.normal_price, 4.5);
        assert_eq!(game.savings_percent, 0.0);
        assert_eq!(game.store_id, "");
        assert_eq!(game.thumbnail_url, None);
    }

    #[test]
    fn bad_numbers_become_zero() {
        assert_eq!(parse_price(Some("abc"), "salePrice"), 0.0);
        assert_eq!(parse_price(Some("NaN"), "salePrice"), 0.0);
        assert_eq!(parse_price(Some("-3"), "salePrice"), 0.0);
        assert_eq!(parse_price(None, "salePrice"), 0.0);
        assert_eq!(parse_price(Some(" 2.50 "), "salePrice"), 2.5);
    }
}
