//! Helper types for representing top-of-book state.
//!
//! This is separate from the [`OutputMessage::TopOfBook`](crate::messages::TopOfBook)
//! event type so that the engine can use a small, internal snapshot
//! type for queries and comparisons.

use rust_decimal::Decimal;

/// A simple snapshot of the touch on both sides.
///
/// Used to:
/// - answer `QueryTopOfBook` requests,
/// - compare against previous state to decide if a `TopOfBook`
///   output event should be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopOfBookSnapshot {
    /// Best bid price (`None` if no bid).
    pub bid_price: Option<Decimal>,
    /// Total quantity at best bid (0 if no bid).
    pub bid_quantity: u64,

    /// Best ask price (`None` if no ask).
    pub ask_price: Option<Decimal>,
    /// Total quantity at best ask (0 if no ask).
    pub ask_quantity: u64,
}

impl TopOfBookSnapshot {
    /// `ask - bid`, when both sides are present.
    ///
    /// Every derived price is `None` on overflow.
    pub fn spread(&self) -> Option<Decimal> {
        self.ask_price?.checked_sub(self.bid_price?)
    }

    pub fn mid_price(&self) -> Option<Decimal> {
        self.ask_price?
            .checked_add(self.bid_price?)?
            .checked_div(Decimal::TWO)
    }

    /// Spread in basis points of the best bid: `10_000 * (ask - bid) / bid`.
    pub fn spread_bps(&self) -> Option<Decimal> {
        let bid = self.bid_price?;
        if bid.is_zero() {
            return None;
        }
        self.spread()?
            .checked_mul(Decimal::from(10_000))?
            .checked_div(bid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn derived_prices_need_both_sides() {
        let one_sided = TopOfBookSnapshot {
            bid_price: Some(dec!(99)),
            bid_quantity: 5,
            ..Default::default()
        };
        assert_eq!(one_sided.spread(), None);
        assert_eq!(one_sided.mid_price(), None);
        assert_eq!(one_sided.spread_bps(), None);
        assert_eq!(TopOfBookSnapshot::default().spread_bps(), None);
    }

    #[test]
    fn spread_mid_and_bps() {
        let tob = TopOfBookSnapshot {
            bid_price: Some(dec!(100)),
            bid_quantity: 5,
            ask_price: Some(dec!(100.5)),
            ask_quantity: 7,
        };
        assert_eq!(tob.spread(), Some(dec!(0.5)));
        assert_eq!(tob.mid_price(), Some(dec!(100.25)));
        assert_eq!(tob.spread_bps(), Some(dec!(50)));
    }

    #[test]
    fn extreme_touches_give_none_instead_of_overflowing() {
        let near_max = TopOfBookSnapshot {
            bid_price: Some(Decimal::MAX / Decimal::TWO),
            bid_quantity: 1,
            ask_price: Some(Decimal::MAX),
            ask_quantity: 1,
        };
        assert_eq!(near_max.mid_price(), None);
        assert_eq!(near_max.spread_bps(), None);
        assert!(near_max.spread().is_some());

        let tiny_bid = TopOfBookSnapshot {
            bid_price: Some(Decimal::new(1, 28)),
            bid_quantity: 1,
            ask_price: Some(dec!(1000000)),
            ask_quantity: 1,
        };
        assert_eq!(tiny_bid.spread_bps(), None);
    }
}
