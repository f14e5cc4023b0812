//! # Inventory Planner
//!
//! How many retail packs the current chicken stock could fill.
//!
//! ```text
//! stock = 250 g
//!
//!   single denomination          mixed (per 200 g block, heaviest first)
//!   ───────────────────          ───────────────────────────────────────
//!   100 g packs : 2              100 g packs : 250 / 200        = 1
//!    20 g packs : 12              20 g packs : (250 % 200) / 20 = 2
//!    75 g packs : 3
//! ```
//!
//! The mixed split is a single greedy pass, not an optimum over arbitrary
//! stock.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Two-denomination split of the stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MixedPacks {
    pub packs_100g: i64,
    pub packs_20g: i64,
}

/// Pack counts for the current stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PackSuggestions {
    pub packs_100g: i64,
    pub packs_20g: i64,
    pub packs_75g: i64,
    pub mixed: MixedPacks,
}

/// Computes pack suggestions for `stock_grams`.
///
/// Negative stock counts as zero.
pub fn pack_suggestions(stock_grams: i64) -> PackSuggestions {
    let stock = stock_grams.max(0);

    PackSuggestions {
        packs_100g: stock / 100,
        packs_20g: stock / 20,
        packs_75g: stock / 75,
        mixed: MixedPacks {
            packs_100g: stock / 200,
            packs_20g: (stock % 200) / 20,
        },
    }
}

/// Stock in kilograms, for display.
pub fn stock_kg(stock_grams: i64) -> f64 {
    stock_grams as f64 / 1000.0
}
