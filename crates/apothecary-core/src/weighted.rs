//! Rarity-weighted roulette selection.
//!
//! Effective weight is `max(0, weight) * rarity multiplier`. A draw in
//! `[0, total)` picks the first entry whose running total reaches it.

use crate::fixed::Fixed64;
use crate::rng::SimRng;
use serde::{Deserialize, Serialize};

/// Rarity tier of a weighted entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    /// Common = 1.0, Uncommon = 0.6, Rare = 0.3.
    pub fn multiplier(self) -> Fixed64 {
        match self {
            Rarity::Common => Fixed64::ONE,
            Rarity::Uncommon => Fixed64::from_num(0.6),
            Rarity::Rare => Fixed64::from_num(0.3),
        }
    }
}

/// Anything that can take part in a weighted draw.
pub trait Weighted {
    fn weight(&self) -> Fixed64;
    fn rarity(&self) -> Rarity;

    fn effective_weight(&self) -> Fixed64 {
        self.weight()
            .max(Fixed64::ZERO)
            .saturating_mul(self.rarity().multiplier())
    }
}

/// A plain value with a weight and rarity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEntry<T> {
    pub value: T,
    pub weight: Fixed64,
    #[serde(default)]
    pub rarity: Rarity,
}

impl<T> WeightedEntry<T> {
    pub fn new(value: T, weight: Fixed64, rarity: Rarity) -> Self {
        Self {
            value,
            weight,
            rarity,
        }
    }
}

impl<T> Weighted for WeightedEntry<T> {
    fn weight(&self) -> Fixed64 {
        self.weight
    }

    fn rarity(&self) -> Rarity {
        self.rarity
    }
}

/// Sum of effective weights.
pub fn total_weight<W: Weighted>(entries: &[W]) -> Fixed64 {
    entries
        .iter()
        .fold(Fixed64::ZERO, |acc, e| acc.saturating_add(e.effective_weight()))
}

/// Index of the entry selected by `draw`, a value in `[0, total)`.
///
/// Entries with zero effective weight are never selected.
pub fn select_index_with_draw<W: Weighted>(entries: &[W], draw: Fixed64) -> Option<usize> {
    let mut cumulative = Fixed64::ZERO;
    let mut last_positive = None;
    for (i, entry) in entries.iter().enumerate() {
        let w = entry.effective_weight();
        if w <= Fixed64::ZERO {
            continue;
        }
        cumulative = cumulative.saturating_add(w);
        last_positive = Some(i);
        if cumulative >= draw {
            return Some(i);
        }
    }
    // Only reachable when `draw` sits at or past the total.
    last_positive
}

/// Draw one index. `None` when `entries` is empty or the total weight is
/// not positive.
pub fn select_index<W: Weighted>(entries: &[W], rng: &mut SimRng) -> Option<usize> {
    let total = total_weight(entries);
    if total <= Fixed64::ZERO {
        return None;
    }
    let draw = rng.next_fixed_below(total);
    select_index_with_draw(entries, draw)
}

/// Draw one entry.
pub fn select<'a, W: Weighted>(entries: &'a [W], rng: &mut SimRng) -> Option<&'a W> {
    select_index(entries, rng).map(|i| &entries[i])
}
