//! Single-instrument matching engine.
//!
//! - Owns one bid [`Ladder`] and one ask [`Ladder`].
//! - Assigns arrival sequences to resting orders.
//! - Sweeps the contra side under price-time priority.
//! - Tracks the last published top-of-book so request dispatch can
//!   emit change events.
//!
//! Every call runs to completion with exclusive access; callers that
//! share one engine across tasks must serialise access themselves.

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::error::EngineError;
use crate::ladder::Ladder;
use crate::messages::{
    AddOrder, Added, BestQuote, ExecuteOrder, Fill, InputMessage, OutputMessage,
};
use crate::order::Order;
use crate::order_type::OrderType;
use crate::side::{BookSide, Side};
use crate::top_of_book::TopOfBookSnapshot;

/// Largest accepted price (`10^15`).
///
/// A single sweep trades at most `u32::MAX` units, so every fill's
/// notional stays below `u32::MAX * MAX_PRICE`, well inside `Decimal`'s range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

#[derive(Debug)]
pub struct MatchingEngine {
    bids: Ladder,
    asks: Ladder,

    /// Next arrival sequence to hand out.
    next_sequence: u64,

    /// Cache of previous top-of-book for change detection.
    prev_top: TopOfBookSnapshot,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        MatchingEngine::new()
    }
}

impl MatchingEngine {
    /// Create a new, empty book.
    pub fn new() -> Self {
        MatchingEngine {
            bids: Ladder::new(BookSide::Bid),
            asks: Ladder::new(BookSide::Ask),
            next_sequence: 1,
            prev_top: TopOfBookSnapshot::default(),
        }
    }

    /// Rest a new order on `side` at `price`.
    ///
    /// Returns the arrival sequence assigned to the order.
    pub fn add_order(
        &mut self,
        quantity: u32,
        price: Decimal,
        side: BookSide,
    ) -> Result<u64, EngineError> {
        validate_quantity(quantity)?;
        validate_price(price)?;
        Ok(self.rest(quantity, price, side))
    }

    /// Match an incoming order against the contra side.
    ///
    /// Market orders sweep whatever is there and drop any remainder.
    /// Limit orders only trade at or through `price`; their remainder
    /// rests on the originating side behind everything already at that
    /// level.
    pub fn execute_order(
        &mut self,
        order_type: OrderType,
        quantity: u32,
        side: Side,
        price: Option<Decimal>,
    ) -> Result<Fill, EngineError> {
        validate_quantity(quantity)?;
        let limit = match order_type {
            OrderType::Market => None,
            OrderType::Limit => {
                let price = price.ok_or(EngineError::InvalidPrice(None))?;
                validate_price(price)?;
                Some(price)
            }
        };

        let mut fill = Fill::default();
        let remaining = if self.crosses(side, limit)? {
            let contra = match side.contra_side() {
                BookSide::Bid => &mut self.bids,
                BookSide::Ask => &mut self.asks,
            };
            let remaining = sweep(contra, side, quantity, limit, &mut fill);
            let pruned = contra.prune_empty_levels();
            trace!(pruned, side = %contra.side(), "pruned empty levels");
            remaining
        } else {
            quantity
        };

        if let Some(limit) = limit.filter(|_| remaining > 0) {
            self.rest(remaining, limit, side.resting_side());
            fill.rested_quantity = remaining;
        }

        debug!(
            %order_type,
            ?side,
            quantity,
            units = fill.units_transacted,
            value = %fill.total_value,
            rested = fill.rested_quantity,
            "executed order"
        );

        Ok(fill)
    }

    /// Best price on `side`: highest bid or lowest ask.
    pub fn best_quote(&self, side: BookSide) -> Result<Decimal, EngineError> {
        self.ladder(side).best_price()
    }

    /// Remove empty levels on both sides. Returns how many were removed.
    pub fn prune_empty_levels(&mut self) -> usize {
        self.bids.prune_empty_levels() + self.asks.prune_empty_levels()
    }

    pub fn ladder(&self, side: BookSide) -> &Ladder {
        match side {
            BookSide::Bid => &self.bids,
            BookSide::Ask => &self.asks,
        }
    }

    pub fn bids(&self) -> &Ladder {
        &self.bids
    }

    pub fn asks(&self) -> &Ladder {
        &self.asks
    }

    /// Return a simple snapshot of the current top-of-book.
    pub fn top_of_book(&self) -> TopOfBookSnapshot {
        let bid = self.bids.best_level();
        let ask = self.asks.best_level();
        TopOfBookSnapshot {
            bid_price: bid.map(|l| l.price()),
            bid_quantity: bid.map(|l| l.total_quantity()).unwrap_or(0),
            ask_price: ask.map(|l| l.price()),
            ask_quantity: ask.map(|l| l.total_quantity()).unwrap_or(0),
        }
    }

    /// Process a single input message and return any output events.
    ///
    /// Errors are turned into a single `Rejected` event; a rejected
    /// request never changes the book.
    pub fn process_message(&mut self, msg: InputMessage) -> Vec<OutputMessage> {
        match msg {
            InputMessage::AddOrder(add) => self.process_add(add),
            InputMessage::ExecuteOrder(exec) => self.process_execute(exec),
            InputMessage::QueryBestQuote(side) => {
                let price = match self.best_quote(side) {
                    Ok(price) => Some(price),
                    Err(e) if e.is_no_liquidity() => None,
                    Err(e) => return vec![OutputMessage::rejected(e.to_string())],
                };
                vec![OutputMessage::BestQuote(BestQuote { side, price })]
            }
            InputMessage::QueryTopOfBook => self.process_query_top_of_book(),
        }
    }

    // -------------------------------------------------------------------------
    // Internal handlers
    // -------------------------------------------------------------------------

    fn process_add(&mut self, msg: AddOrder) -> Vec<OutputMessage> {
        let sequence = match self.add_order(msg.quantity, msg.price, msg.side) {
            Ok(sequence) => sequence,
            Err(e) => return vec![OutputMessage::rejected(e.to_string())],
        };

        let mut outputs = vec![OutputMessage::Added(Added {
            sequence,
            side: msg.side,
            quantity: msg.quantity,
            price: msg.price,
        })];
        outputs.extend(self.check_top_of_book_changes());
        outputs
    }

    fn process_execute(&mut self, msg: ExecuteOrder) -> Vec<OutputMessage> {
        let fill = match self.execute_order(msg.order_type, msg.quantity, msg.side, msg.price) {
            Ok(fill) => fill,
            Err(e) => return vec![OutputMessage::rejected(e.to_string())],
        };

        let mut outputs: Vec<OutputMessage> = fill
            .executions
            .iter()
            .copied()
            .map(OutputMessage::Trade)
            .collect();
        outputs.push(OutputMessage::Filled(fill.report()));
        outputs.extend(self.check_top_of_book_changes());
        outputs
    }

    /// Snapshot both sides: bid first, then ask.
    fn process_query_top_of_book(&self) -> Vec<OutputMessage> {
        let tob = self.top_of_book();
        vec![
            side_event(BookSide::Bid, tob.bid_price, tob.bid_quantity),
            side_event(BookSide::Ask, tob.ask_price, tob.ask_quantity),
        ]
    }

    /// Compare against the last published snapshot and emit one event
    /// per side that moved.
    fn check_top_of_book_changes(&mut self) -> Vec<OutputMessage> {
        let mut outputs = Vec::new();
        let current = self.top_of_book();

        if current.bid_price != self.prev_top.bid_price
            || current.bid_quantity != self.prev_top.bid_quantity
        {
            outputs.push(side_event(BookSide::Bid, current.bid_price, current.bid_quantity));
        }

        if current.ask_price != self.prev_top.ask_price
            || current.ask_quantity != self.prev_top.ask_quantity
        {
            outputs.push(side_event(BookSide::Ask, current.ask_price, current.ask_quantity));
        }

        self.prev_top = current;
        outputs
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Insert an already-validated order with a fresh arrival sequence.
    fn rest(&mut self, quantity: u32, price: Decimal, side: BookSide) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let ladder = match side {
            BookSide::Bid => &mut self.bids,
            BookSide::Ask => &mut self.asks,
        };
        ladder.insert(Order::new(quantity, price, side, sequence));

        trace!(sequence, %side, quantity, %price, "rested order");
        sequence
    }

    /// Whether the contra touch is eligible for this order at all.
    ///
    /// An empty contra side is "nothing to match", not an error.
    fn crosses(&self, side: Side, limit: Option<Decimal>) -> Result<bool, EngineError> {
        let best = match self.best_quote(side.contra_side()) {
            Ok(best) => best,
            Err(e) if e.is_no_liquidity() => return Ok(false),
            Err(e) => return Err(e),
        };
        Ok(match limit {
            None => true,
            Some(limit) => side.accepts(best, limit),
        })
    }
}

/// Consume resting orders on `contra` for an incoming order of `quantity`.
///
/// Levels are visited best first; within a level, oldest first. The
/// sweep stops at the first ineligible level since every level after it
/// in sweep order is worse. Returns the unfilled quantity.
fn sweep(
    contra: &mut Ladder,
    side: Side,
    quantity: u32,
    limit: Option<Decimal>,
    fill: &mut Fill,
) -> u32 {
    let mut remaining = quantity;

    for level in contra.levels_best_first_mut() {
        if remaining == 0 {
            break;
        }

        let level_price = level.price();
        if let Some(limit) = limit {
            if !side.accepts(level_price, limit) {
                break;
            }
        }

        while remaining > 0 {
            let Some(resting) = level.front_mut() else {
                break;
            };

            let traded = resting.fill(remaining);
            remaining -= traded;
            fill.record(level_price, traded, resting.sequence);

            if resting.is_filled() {
                level.pop_front();
            }
        }
    }

    remaining
}

fn side_event(side: BookSide, price: Option<Decimal>, quantity: u64) -> OutputMessage {
    match price {
        Some(price) => OutputMessage::top_of_book(side, price, quantity),
        None => OutputMessage::top_of_book_eliminated(side),
    }
}

fn validate_quantity(quantity: u32) -> Result<(), EngineError> {
    if quantity == 0 {
        return Err(EngineError::InvalidQuantity(quantity));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), EngineError> {
    if price <= Decimal::ZERO || price > MAX_PRICE {
        return Err(EngineError::InvalidPrice(Some(price)));
    }
    Ok(())
}
