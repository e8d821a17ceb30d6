//! Store id lookup table.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Label used for ids missing from the table.
pub const UNKNOWN_STORE: &str = "Unknown store";

/// Store the title-search endpoint represents.
pub const SEARCH_STORE_ID: &str = "1";

static STORES: Lazy<BTreeMap<u32, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        (1, "Steam"),
        (2, "GamersGate"),
        (3, "GreenManGaming"),
        (7, "GOG"),
        (8, "Origin"),
        (11, "Humble Store"),
        (13, "Uplay"),
        (15, "Fanatical"),
        (21, "WinGameStore"),
        (23, "GameBillet"),
        (25, "Epic Games Store"),
        (27, "Gamesplanet"),
        (28, "Voidu"),
    ])
});

/// Human-readable store name for an id such as `"7"`.
pub fn store_name(store_id: &str) -> &'static str {
    store_id
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|id| STORES.get(&id).copied())
        .unwrap_or(UNKNOWN_STORE)
}

/// Every known store as `(id, name)`, ordered by numeric id.
pub fn known_stores() -> Vec<(String, &'static str)> {
    STORES
        .iter()
        .map(|(id, name)| (id.to_string(), *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_and_unknown_ids() {
        assert_eq!(store_name("1"), "Steam");
        assert_eq!(store_name("25"), "Epic Games Store");
        assert_eq!(store_name("4"), UNKNOWN_STORE);
        assert_eq!(store_name("steam"), UNKNOWN_STORE);
        assert_eq!(store_name(""), UNKNOWN_STORE);
    }

    #[test]
    fn lists_stores_in_id_order() {
        let stores = known_stores();
        assert_eq!(stores.len(), 13);
        assert_eq!(stores[0], ("1".to_string(), "Steam"));
        assert_eq!(stores.last().map(|(id, _)| id.as_str()), Some("28"));
    }
}
