//! A single resting order.
//!
//! Orders carry no external identity: the book only needs the remaining
//! quantity, the resting price, the side, and an arrival sequence that
//! gives time priority within a price level.

use rust_decimal::Decimal;

use crate::side::BookSide;

/// A resting order in one [`PriceLevel`](crate::PriceLevel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Remaining quantity; the order leaves its level when this hits zero.
    pub quantity: u32,
    pub price: Decimal,
    pub side: BookSide,

    /// Arrival marker assigned by the engine at insertion. Strictly
    /// increasing across insertions, so no two orders tie on priority.
    pub sequence: u64,
}

impl Order {
    pub fn new(quantity: u32, price: Decimal, side: BookSide, sequence: u64) -> Self {
        Order {
            quantity,
            price,
            side,
            sequence,
        }
    }

    /// Returns `true` if the order is fully filled.
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    /// Fill the order by up to `qty` units.
    ///
    /// Returns the quantity that was actually filled (which will be
    /// `<= qty` and `<= quantity`).
    pub fn fill(&mut self, qty: u32) -> u32 {
        let filled = qty.min(self.quantity);
        self.quantity -= filled;
        filled
    }
}
