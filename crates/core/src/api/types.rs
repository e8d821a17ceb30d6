#![allow(missing_docs)]

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Entry of the storewide deals feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRecord {
    #[serde(default, rename = "gameID", deserialize_with = "string_or_number")]
    pub game_id: Option<String>,
    #[serde(default, rename = "dealID", deserialize_with = "string_or_number")]
    pub deal_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub sale_price: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub normal_price: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub savings: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default, rename = "storeID", deserialize_with = "string_or_number")]
    pub store_id: Option<String>,
}

/// Entry of the title-search endpoint; carries no discount metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRecord {
    #[serde(default, rename = "gameID", deserialize_with = "string_or_number")]
    pub game_id: Option<String>,
    #[serde(default, rename = "cheapestDealID", deserialize_with = "string_or_number")]
    pub cheapest_deal_id: Option<String>,
    #[serde(default)]
    pub external: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub cheapest: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
}

/// The API quotes numbers as strings, but tolerate bare numbers too.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_quoted_and_bare_numbers() -> anyhow::Result<()> {
        let deal: DealRecord = serde_json::from_value(json!({
            "gameID": 93503,
            "dealID": "X8sebHhbc1Ga0dTkgg59WgyM506af9oNZZJLU9uSrX8%3D",
            "title": "BioShock Infinite",
            "salePrice": "7.49",
            "normalPrice": 29.99,
            "savings": "75.025008",
            "storeID": "1",
            "thumb": null
        }))?;
        assert_eq!(deal.game_id.as_deref(), Some("93503"));
        assert_eq!(deal.sale_price.as_deref(), Some("7.49"));
        assert_eq!(deal.normal_price.as_deref(), Some("29.99"));
        assert_eq!(deal.thumb, None);
        Ok(())
    }

    #[test]
    fn missing_fields_default_to_none() -> anyhow::Result<()> {
        let search: SearchRecord = serde_json::from_value(json!({ "external": "Batman" }))?;
        assert_eq!(search.external.as_deref(), Some("Batman"));
        assert!(search.cheapest.is_none());
        assert!(search.game_id.is_none());
        Ok(())
    }
}
