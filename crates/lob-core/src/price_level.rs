//! Price level: a FIFO queue of orders resting at one price.
//!
//! Orders are appended at the back on arrival and consumed from the
//! front, so the queue is always in time-priority order and never needs
//! re-sorting.

use std::collections::vec_deque;
use std::collections::VecDeque;

use rust_decimal::Decimal;

use crate::order::Order;

#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Decimal,
    orders: VecDeque<Order>,
}

impl PriceLevel {
    pub fn new(price: Decimal) -> Self {
        PriceLevel {
            price,
            orders: VecDeque::new(),
        }
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Append an order at the back of the queue (time priority).
    pub fn push_back(&mut self, order: Order) {
        debug_assert_eq!(order.price, self.price);
        self.orders.push_back(order);
    }

    /// The oldest order at this level.
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    pub fn pop_front(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of resting orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Sum of remaining quantity across all orders at this level.
    pub fn total_quantity(&self) -> u64 {
        self.orders.iter().map(|o| u64::from(o.quantity)).sum()
    }

    /// Orders oldest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, Order> {
        self.orders.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side::BookSide;
    use rust_decimal_macros::dec;

    #[test]
    fn fifo_order_is_kept() {
        let mut level = PriceLevel::new(dec!(101.25));
        level.push_back(Order::new(5, dec!(101.25), BookSide::Ask, 7));
        level.push_back(Order::new(9, dec!(101.25), BookSide::Ask, 8));

        assert_eq!(level.len(), 2);
        assert_eq!(level.total_quantity(), 14);
        assert_eq!(level.front().map(|o| o.sequence), Some(7));

        let first = level.pop_front().unwrap();
        assert_eq!(first.sequence, 7);
        assert_eq!(level.front().map(|o| o.sequence), Some(8));

        level.pop_front();
        assert!(level.is_empty());
        assert_eq!(level.total_quantity(), 0);
    }
}
