//! Error types for the core matching engine.
//!
//! Every failure is reported to the caller as an explicit value; the
//! engine never panics on bad input and never swallows an error.
//! Validation errors are raised before the book is touched, so a
//! rejected request leaves both ladders exactly as they were.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::side::BookSide;

/// Errors returned by [`MatchingEngine`](crate::MatchingEngine) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An order type code outside `{market, limit}`.
    #[error("invalid order type: {0:?}")]
    InvalidOrderType(String),

    /// The requested side of the book has no resting price levels.
    ///
    /// Recoverable: callers treat it as "no resting interest".
    #[error("no liquidity on {0} side")]
    NoLiquidity(BookSide),

    /// Quantity must be strictly positive.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Price must be strictly positive, and is required for limit orders.
    #[error("invalid price: {}", describe_price(.0))]
    InvalidPrice(Option<Decimal>),
}

impl EngineError {
    /// `true` for the recoverable "empty side" condition.
    pub fn is_no_liquidity(&self) -> bool {
        matches!(self, EngineError::NoLiquidity(_))
    }
}

fn describe_price(price: &Option<Decimal>) -> String {
    match price {
        Some(p) => p.to_string(),
        None => "missing".to_string(),
    }
}
