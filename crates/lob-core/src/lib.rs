//! lob-core
//!
//! Single-instrument limit order book:
//! - sides and order types
//! - resting orders and FIFO price levels
//! - per-side price ladders
//! - the matching engine (sweep, pruning, best quote)
//! - messages (input/output types) for service layers

pub mod side;
pub mod order_type;
pub mod messages;
pub mod order;
pub mod price_level;
pub mod ladder;
pub mod matching_engine;
pub mod error;
pub mod top_of_book;

pub use side::{BookSide, Side};
pub use order_type::OrderType;

pub use messages::{
    AddOrder,
    Added,
    BestQuote,
    ExecuteOrder,
    Execution,
    Fill,
    FillReport,
    InputMessage,
    OutputMessage,
    Rejected,
    TopOfBook,
};

pub use order::Order;
pub use price_level::PriceLevel;
pub use ladder::{Ladder, LevelSummary};
pub use matching_engine::{MatchingEngine, MAX_PRICE};
pub use error::EngineError;
pub use top_of_book::TopOfBookSnapshot;
