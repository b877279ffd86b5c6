// crates/lob-console/src/seed.rs

//! Random demo order flow.
//!
//! Orders go in through `MatchingEngine::add_order` like any other
//! caller's; the engine knows nothing about where they came from. The
//! RNG is passed in, so a seeded `StdRng` reproduces the same book.

use lob_core::{BookSide, EngineError, MatchingEngine};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::DemoConfig;

/// Populate both sides of `engine`. Returns the number of orders added.
pub fn seed_book<R: Rng + ?Sized>(
    engine: &mut MatchingEngine,
    config: &DemoConfig,
    rng: &mut R,
) -> Result<usize, EngineError> {
    let mut added = 0;

    for (side, base) in [
        (BookSide::Bid, config.bid_base_cents),
        (BookSide::Ask, config.ask_base_cents),
    ] {
        for _ in 0..config.levels_per_side {
            let cents = base + rng.gen_range(0..=config.price_span_cents);
            let price = Decimal::new(cents, 2);

            for _ in 0..config.orders_per_level {
                let quantity = rng.gen_range(config.min_quantity..=config.max_quantity);
                engine.add_order(quantity, price, side)?;
                added += 1;
            }
        }
    }

    debug!(
        added,
        bid_levels = engine.bids().level_count(),
        ask_levels = engine.asks().level_count(),
        "seeded demo book"
    );
    Ok(added)
}
