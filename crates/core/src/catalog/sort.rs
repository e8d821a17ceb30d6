use std::{cmp::Ordering, fmt, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::models::GameRecord;

/// Ordering applied to the filtered catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Source order.
    #[default]
    Default,
    /// Cheapest sale price first.
    SaleAscending,
    /// Most expensive sale price first.
    SaleDescending,
    /// Cheapest list price first.
    NormalAscending,
    /// Most expensive list price first.
    NormalDescending,
    /// Biggest discount first.
    DiscountDescending,
}

impl SortMode {
    /// Every mode, in the order the UI cycles through them.
    pub const ALL: [SortMode; 6] = [
        SortMode::Default,
        SortMode::SaleAscending,
        SortMode::SaleDescending,
        SortMode::NormalAscending,
        SortMode::NormalDescending,
        SortMode::DiscountDescending,
    ];

    /// Short key, e.g. `sale-asc`.
    pub fn key(self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::SaleAscending => "sale-asc",
            SortMode::SaleDescending => "sale-desc",
            SortMode::NormalAscending => "normal-asc",
            SortMode::NormalDescending => "normal-desc",
            SortMode::DiscountDescending => "discount",
        }
    }

    /// Label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Default => "Default order",
            SortMode::SaleAscending => "Sale price: low to high",
            SortMode::SaleDescending => "Sale price: high to low",
            SortMode::NormalAscending => "Normal price: low to high",
            SortMode::NormalDescending => "Normal price: high to low",
            SortMode::DiscountDescending => "Best discount",
        }
    }

    /// Next mode, wrapping around.
    pub fn next(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous mode, wrapping around.
    pub fn previous(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|mode| *mode == self)
            .unwrap_or(0)
    }

    /// Compare two records under this mode. `Default` treats all as equal.
    pub fn compare(self, a: &GameRecord, b: &GameRecord) -> Ordering {
        match self {
            SortMode::Default => Ordering::Equal,
            SortMode::SaleAscending => cmp_f64(a.sale_price, b.sale_price),
            SortMode::SaleDescending => cmp_f64(b.sale_price, a.sale_price),
            SortMode::NormalAscending => cmp_f64(a.normal_price, b.normal_price),
            SortMode::NormalDescending => cmp_f64(b.normal_price, a.normal_price),
            SortMode::DiscountDescending => cmp_f64(b.savings_percent, a.savings_percent),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(SortMode::Default),
            "sale-asc" | "sale-ascending" => Ok(SortMode::SaleAscending),
            "sale-desc" | "sale-descending" => Ok(SortMode::SaleDescending),
            "normal-asc" | "normal-ascending" => Ok(SortMode::NormalAscending),
            "normal-desc" | "normal-descending" => Ok(SortMode::NormalDescending),
            "discount" | "discount-descending" => Ok(SortMode::DiscountDescending),
            other => Err(anyhow!("unknown sort mode '{other}'")),
        }
    }
}

// NaN and -0.0 compare as 0 so ties stay ties under `total_cmp`.
fn sort_key(value: f64) -> f64 {
    if value.is_nan() || value == 0.0 {
        0.0
    } else {
        value
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    sort_key(a).total_cmp(&sort_key(b))
}
