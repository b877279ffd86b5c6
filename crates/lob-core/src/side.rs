//! Sides: the direction of an incoming order and the side of the book
//! an order rests on.

use std::fmt;

use rust_decimal::Decimal;

/// Direction of an incoming order: Buy or Sell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_char(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }

    /// Try to parse from a char (`'B'` / `'S'`, case-sensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Side::Buy),
            'S' => Some(Side::Sell),
            _ => None,
        }
    }

    /// The side an unfilled limit remainder rests on.
    pub fn resting_side(self) -> BookSide {
        match self {
            Side::Buy => BookSide::Bid,
            Side::Sell => BookSide::Ask,
        }
    }

    /// The side whose liquidity this order consumes.
    pub fn contra_side(self) -> BookSide {
        match self {
            Side::Buy => BookSide::Ask,
            Side::Sell => BookSide::Bid,
        }
    }

    /// Whether a resting level at `level_price` satisfies a `limit`.
    ///
    /// Buy: `level_price <= limit`. Sell: `level_price >= limit`.
    pub fn accepts(self, level_price: Decimal, limit: Decimal) -> bool {
        match self {
            Side::Buy => level_price <= limit,
            Side::Sell => level_price >= limit,
        }
    }
}

/// Side of the book a resting order lives on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BookSide {
    Bid,
    Ask,
}

impl BookSide {
    pub fn as_char(self) -> char {
        match self {
            BookSide::Bid => 'B',
            BookSide::Ask => 'A',
        }
    }

    /// Try to parse from a char (`'B'` / `'A'`, case-sensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(BookSide::Bid),
            'A' => Some(BookSide::Ask),
            _ => None,
        }
    }
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookSide::Bid => f.write_str("bid"),
            BookSide::Ask => f.write_str("ask"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn buy_rests_on_bid_and_consumes_asks() {
        assert_eq!(Side::Buy.resting_side(), BookSide::Bid);
        assert_eq!(Side::Buy.contra_side(), BookSide::Ask);
        assert_eq!(Side::Sell.resting_side(), BookSide::Ask);
        assert_eq!(Side::Sell.contra_side(), BookSide::Bid);
    }

    #[test]
    fn limit_acceptance_is_directional() {
        assert!(Side::Buy.accepts(dec!(99.5), dec!(100)));
        assert!(Side::Buy.accepts(dec!(100), dec!(100)));
        assert!(!Side::Buy.accepts(dec!(100.01), dec!(100)));

        assert!(Side::Sell.accepts(dec!(100.5), dec!(100)));
        assert!(Side::Sell.accepts(dec!(100), dec!(100)));
        assert!(!Side::Sell.accepts(dec!(99.99), dec!(100)));
    }

    #[test]
    fn char_codes() {
        assert_eq!(Side::from_char('S'), Some(Side::Sell));
        assert_eq!(Side::from_char('A'), None);
        assert_eq!(BookSide::from_char('A'), Some(BookSide::Ask));
        assert_eq!(BookSide::Bid.as_char(), 'B');
    }
}
