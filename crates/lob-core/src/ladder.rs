//! One side of the book: price-indexed levels for bids or asks.
//!
//! Levels live in a `BTreeMap` keyed by price, so keys are always sorted
//! ascending. What "best" means depends on the side:
//! - Bids: best = highest key, sweep order is descending.
//! - Asks: best = lowest key, sweep order is ascending.
//!
//! A level present in the map must hold at least one order once a
//! mutating operation has completed; [`Ladder::prune_empty_levels`] is
//! what restores that after a sweep.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::EngineError;
use crate::order::Order;
use crate::price_level::PriceLevel;
use crate::side::BookSide;

/// Aggregated view of one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    pub price: Decimal,
    pub quantity: u64,
    pub orders: usize,
}

/// Price-ordered collection of [`PriceLevel`]s for one [`BookSide`].
#[derive(Debug, Clone)]
pub struct Ladder {
    side: BookSide,
    levels: BTreeMap<Decimal, PriceLevel>,
}

impl Ladder {
    pub fn new(side: BookSide) -> Self {
        Ladder {
            side,
            levels: BTreeMap::new(),
        }
    }

    pub fn side(&self) -> BookSide {
        self.side
    }

    /// Append `order` to the level at its price, creating the level if absent.
    pub fn insert(&mut self, order: Order) {
        debug_assert_eq!(order.side, self.side);
        self.levels
            .entry(order.price)
            .or_insert_with(|| PriceLevel::new(order.price))
            .push_back(order);
    }

    /// Best price on this side, or [`EngineError::NoLiquidity`] if empty.
    pub fn best_price(&self) -> Result<Decimal, EngineError> {
        let best = match self.side {
            BookSide::Bid => self.levels.keys().next_back(),
            BookSide::Ask => self.levels.keys().next(),
        };
        best.copied().ok_or(EngineError::NoLiquidity(self.side))
    }

    pub fn best_level(&self) -> Option<&PriceLevel> {
        self.levels_best_first().next()
    }

    /// Remove every level whose queue is empty. Returns how many were removed.
    pub fn prune_empty_levels(&mut self) -> usize {
        let before = self.levels.len();
        self.levels.retain(|_, level| !level.is_empty());
        before - self.levels.len()
    }

    /// Levels from most to least competitive.
    pub fn levels_best_first(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            BookSide::Bid => Box::new(self.levels.values().rev()),
            BookSide::Ask => Box::new(self.levels.values()),
        }
    }

    /// Mutable levels in sweep order: the order most favourable to an
    /// incoming order on the other side.
    pub fn levels_best_first_mut(&mut self) -> Box<dyn Iterator<Item = &mut PriceLevel> + '_> {
        match self.side {
            BookSide::Bid => Box::new(self.levels.values_mut().rev()),
            BookSide::Ask => Box::new(self.levels.values_mut()),
        }
    }

    pub fn level(&self, price: Decimal) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Top `depth` levels, best first.
    pub fn depth(&self, depth: usize) -> Vec<LevelSummary> {
        self.levels_best_first()
            .take(depth)
            .map(|level| LevelSummary {
                price: level.price(),
                quantity: level.total_quantity(),
                orders: level.len(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::len).sum()
    }

    pub fn total_quantity(&self) -> u64 {
        self.levels.values().map(PriceLevel::total_quantity).sum()
    }
}
