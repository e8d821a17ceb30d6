//! Pure filter → sort → paginate stages.

use serde::{Deserialize, Serialize};

use crate::{models::GameRecord, stores};

use super::sort::SortMode;

/// Store restriction applied before sorting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StoreFilter {
    /// No filtering.
    #[default]
    All,
    /// Keep only records whose store id equals this one.
    Store(String),
}

impl StoreFilter {
    /// Build a filter from a store id; blank ids mean no filter.
    pub fn from_id(store_id: &str) -> Self {
        let trimmed = store_id.trim();
        if trimmed.is_empty() {
            StoreFilter::All
        } else {
            StoreFilter::Store(trimmed.to_string())
        }
    }

    /// Selected store id, if any.
    pub fn store_id(&self) -> Option<&str> {
        match self {
            StoreFilter::All => None,
            StoreFilter::Store(id) => Some(id),
        }
    }

    /// Exact store id match.
    pub fn matches(&self, game: &GameRecord) -> bool {
        match self {
            StoreFilter::All => true,
            StoreFilter::Store(id) => game.store_id == *id,
        }
    }

    /// Label for the store picker.
    pub fn label(&self) -> String {
        match self {
            StoreFilter::All => "All stores".to_string(),
            StoreFilter::Store(id) => stores::store_name(id).to_string(),
        }
    }
}

/// Records passing `filter`, in their original relative order.
pub fn filter_by_store(games: &[GameRecord], filter: &StoreFilter) -> Vec<GameRecord> {
    games
        .iter()
        .filter(|game| filter.matches(game))
        .cloned()
        .collect()
}

/// Stable in-place sort; ties keep their incoming order.
pub fn sort_records(games: &mut [GameRecord], mode: SortMode) {
    if mode == SortMode::Default {
        return;
    }
    games.sort_by(|a, b| mode.compare(a, b));
}

/// Filter then sort `games`.
pub fn derive(games: &[GameRecord], filter: &StoreFilter, mode: SortMode) -> Vec<GameRecord> {
    let mut filtered = filter_by_store(games, filter);
    sort_records(&mut filtered, mode);
    filtered
}

/// Length of the cumulative prefix shown after `page` extra pages.
pub fn visible_prefix(len: usize, page: usize, page_size: usize) -> usize {
    page.saturating_add(1).saturating_mul(page_size).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::DealRecord, normalize};

    fn game(id: &str, store: &str, sale: f64, normal: f64, savings: f64) -> GameRecord {
        GameRecord {
            id: id.to_string(),
            title: format!("Game {id}"),
            sale_price: sale,
            normal_price: normal,
            savings_percent: savings,
            thumbnail_url: None,
            store_id: store.to_string(),
            deal_id: None,
        }
    }

    fn ids(games: &[GameRecord]) -> Vec<&str> {
        games.iter().map(|game| game.id.as_str()).collect()
    }

    fn sample() -> Vec<GameRecord> {
        vec![
            game("a", "1", 10.0, 20.0, 50.0),
            game("b", "2", 5.0, 5.0, 0.0),
            game("c", "1", 5.0, 30.0, 83.3),
            game("d", "7", 20.0, 25.0, 20.0),
            game("e", "1", 10.0, 10.0, 0.0),
        ]
    }

    #[test]
    fn filter_keeps_order_and_exact_matches() {
        let games = sample();
        assert_eq!(ids(&filter_by_store(&games, &StoreFilter::All)), ["a", "b", "c", "d", "e"]);
        assert_eq!(
            ids(&filter_by_store(&games, &StoreFilter::from_id("1"))),
            ["a", "c", "e"]
        );
        assert!(filter_by_store(&games, &StoreFilter::from_id("11")).is_empty());
        assert!(filter_by_store(&games, &StoreFilter::from_id("01")).is_empty());
        assert_eq!(StoreFilter::from_id("  "), StoreFilter::All);
    }

    #[test]
    fn sorts_each_mode() {
        let games = sample();
        let sorted = |mode| ids(&derive(&games, &StoreFilter::All, mode)).join("");
        assert_eq!(sorted(SortMode::Default), "abcde");
        assert_eq!(sorted(SortMode::SaleAscending), "bcaed");
        assert_eq!(sorted(SortMode::SaleDescending), "daebc");
        assert_eq!(sorted(SortMode::NormalAscending), "beadc");
        assert_eq!(sorted(SortMode::NormalDescending), "cdaeb");
        assert_eq!(sorted(SortMode::DiscountDescending), "cadbe");
    }

    #[test]
    fn ties_keep_filtered_order() {
        let games = vec![
            game("x", "1", 3.0, 3.0, 10.0),
            game("y", "2", 3.0, 3.0, 10.0),
            game("z", "1", 3.0, 3.0, 10.0),
        ];
        for mode in SortMode::ALL {
            assert_eq!(ids(&derive(&games, &StoreFilter::All, mode)), ["x", "y", "z"]);
        }
    }

    #[test]
    fn filtered_view_is_subset_permutation() {
        let games = sample();
        let filters = [
            StoreFilter::All,
            StoreFilter::from_id("1"),
            StoreFilter::from_id("2"),
            StoreFilter::from_id("99"),
        ];
        for filter in &filters {
            for mode in SortMode::ALL {
                let view = derive(&games, filter, mode);
                let subset = filter_by_store(&games, filter);
                let mut expected = ids(&subset);
                let mut actual = ids(&view);
                expected.sort_unstable();
                actual.sort_unstable();
                assert_eq!(actual, expected);
                if let Some(store) = filter.store_id() {
                    assert!(view.iter().all(|game| game.store_id == store));
                }
            }
        }
    }

    #[test]
    fn unparseable_list_price_sorts_as_zero() {
        let bad = normalize::from_deal(DealRecord {
            game_id: Some("bad".to_string()),
            sale_price: Some("8".to_string()),
            normal_price: Some("abc".to_string()),
            store_id: Some("1".to_string()),
            ..DealRecord::default()
        });
        let good = normalize::from_deal(DealRecord {
            game_id: Some("good".to_string()),
            sale_price: Some("6".to_string()),
            normal_price: Some("7".to_string()),
            store_id: Some("1".to_string()),
            ..DealRecord::default()
        });
        assert_eq!(bad.normal_price, 0.0);
        let games = vec![good, bad];
        assert_eq!(
            ids(&derive(&games, &StoreFilter::All, SortMode::NormalAscending)),
            ["bad", "good"]
        );
        assert_eq!(
            ids(&derive(&games, &StoreFilter::All, SortMode::NormalDescending)),
            ["good", "bad"]
        );
    }

    #[test]
    fn visible_prefix_is_capped() {
        assert_eq!(visible_prefix(30, 0, 12), 12);
        assert_eq!(visible_prefix(30, 1, 12), 24);
        assert_eq!(visible_prefix(30, 2, 12), 30);
        assert_eq!(visible_prefix(0, 0, 12), 0);
        assert_eq!(visible_prefix(5, usize::MAX, 12), 5);
    }

    #[test]
    fn filter_labels_use_store_names() {
        assert_eq!(StoreFilter::All.label(), "All stores");
        assert_eq!(StoreFilter::from_id("7").label(), "GOG");
        assert_eq!(StoreFilter::from_id("99").label(), stores::UNKNOWN_STORE);
    }
}
