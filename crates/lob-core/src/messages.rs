//! Message types used by the core matching engine.
//!
//! These are **transport-agnostic** logical messages:
//! - [`InputMessage`]: what the engine consumes.
//! - [`OutputMessage`]: what the engine produces.
//!
//! Note: the CSV encoder lives in the `lob-protocol` crate;
//! this module is purely logical.

use rust_decimal::Decimal;

use crate::order_type::OrderType;
use crate::side::{BookSide, Side};

/// A request into the matching engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    /// Rest a new order on one side without matching.
    AddOrder(AddOrder),

    /// Market or limit order that sweeps the contra side.
    ExecuteOrder(ExecuteOrder),

    /// Best price on one side.
    QueryBestQuote(BookSide),

    /// Best price and size on both sides.
    QueryTopOfBook,
}

/// An event emitted by the matching engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMessage {
    /// A resting order was placed on the book.
    Added(Added),

    /// One slice of an incoming order traded against one resting order.
    Trade(Execution),

    /// Aggregate result of an `ExecuteOrder` request.
    Filled(FillReport),

    /// Answer to `QueryBestQuote`.
    BestQuote(BestQuote),

    /// Top-of-book change or snapshot.
    TopOfBook(TopOfBook),

    /// The request failed validation; the book was not touched.
    Rejected(Rejected),
}

/// Rest an order (input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOrder {
    pub quantity: u32,
    pub price: Decimal,
    pub side: BookSide,
}

/// Match an incoming order (input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteOrder {
    pub order_type: OrderType,
    pub quantity: u32,
    pub side: Side,

    /// Limit price. Required for limit orders, ignored for market orders.
    pub price: Option<Decimal>,
}

/// Acknowledgement of a resting order (output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    pub sequence: u64,
    pub side: BookSide,
    pub quantity: u32,
    pub price: Decimal,
}

/// A single match between the incoming order and one resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    /// Trade price: always the resting level's price.
    pub price: Decimal,
    pub quantity: u32,

    /// Arrival sequence of the resting order that was hit.
    pub resting_sequence: u64,
}

/// Everything an `execute_order` call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fill {
    pub units_transacted: u32,

    /// Sum of `traded_quantity * level_price` over all executions.
    pub total_value: Decimal,

    /// Quantity placed on the book as a new resting limit order (0 if none).
    pub rested_quantity: u32,

    /// Executions in consumption order.
    pub executions: Vec<Execution>,
}

impl Fill {
    /// Prices are capped at [`MAX_PRICE`](crate::MAX_PRICE), so the
    /// notional cannot overflow.
    pub(crate) fn record(&mut self, price: Decimal, quantity: u32, resting_sequence: u64) {
        self.units_transacted += quantity;
        self.total_value += Decimal::from(quantity) * price;
        self.executions.push(Execution {
            price,
            quantity,
            resting_sequence,
        });
    }

    /// `total_value / units_transacted`, or `None` when nothing traded.
    pub fn average_price(&self) -> Option<Decimal> {
        if self.units_transacted == 0 {
            None
        } else {
            Some(self.total_value / Decimal::from(self.units_transacted))
        }
    }

    pub fn report(&self) -> FillReport {
        FillReport {
            units_transacted: self.units_transacted,
            total_value: self.total_value,
            rested_quantity: self.rested_quantity,
        }
    }
}

/// Summary of a fill (output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillReport {
    pub units_transacted: u32,
    pub total_value: Decimal,
    pub rested_quantity: u32,
}

impl FillReport {
    pub fn average_price(&self) -> Option<Decimal> {
        if self.units_transacted == 0 {
            None
        } else {
            Some(self.total_value / Decimal::from(self.units_transacted))
        }
    }
}

/// Best price on one side (output). `price == None` means no liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestQuote {
    pub side: BookSide,
    pub price: Option<Decimal>,
}

/// Top-of-book event (output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopOfBook {
    /// Side this TOB event refers to.
    pub side: BookSide,

    /// Best price; `None` when the side is eliminated.
    pub price: Option<Decimal>,

    /// Total quantity at the best price; `0` when eliminated.
    pub total_quantity: u64,
}

impl TopOfBook {
    /// True when the side has no resting orders.
    pub fn is_eliminated(&self) -> bool {
        self.price.is_none()
    }
}

/// Validation failure (output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub reason: String,
}

// -----------------------------------------------------------------------------
// Convenience constructors
// -----------------------------------------------------------------------------

impl OutputMessage {
    pub fn top_of_book(side: BookSide, price: Decimal, total_quantity: u64) -> Self {
        OutputMessage::TopOfBook(TopOfBook {
            side,
            price: Some(price),
            total_quantity,
        })
    }

    pub fn top_of_book_eliminated(side: BookSide) -> Self {
        OutputMessage::TopOfBook(TopOfBook {
            side,
            price: None,
            total_quantity: 0,
        })
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        OutputMessage::Rejected(Rejected {
            reason: reason.into(),
        })
    }
}
