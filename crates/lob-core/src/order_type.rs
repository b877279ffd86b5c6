//! Order type (Market vs Limit).

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// How an incoming order treats the contra side.
///
/// - `Market`: sweeps whatever liquidity exists; never rests.
/// - `Limit`: only trades at or through its limit price; the unfilled
///   remainder rests on the book.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub fn as_char(self) -> char {
        match self {
            OrderType::Market => 'M',
            OrderType::Limit => 'L',
        }
    }

    /// Parse from the single-letter code (`'M'` / `'L'`, case-insensitive).
    pub fn from_char(c: char) -> Result<Self, EngineError> {
        match c.to_ascii_uppercase() {
            'M' => Ok(OrderType::Market),
            'L' => Ok(OrderType::Limit),
            other => Err(EngineError::InvalidOrderType(other.to_string())),
        }
    }
}

impl FromStr for OrderType {
    type Err = EngineError;

    /// Accepts `M`/`L` or the spelled-out `market`/`limit`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "market" => Ok(OrderType::Market),
            "limit" => Ok(OrderType::Limit),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => OrderType::from_char(c),
                    _ => Err(EngineError::InvalidOrderType(s.to_string())),
                }
            }
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => f.write_str("market"),
            OrderType::Limit => f.write_str("limit"),
        }
    }
}
