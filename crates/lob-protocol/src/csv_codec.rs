// crates/lob-protocol/src/csv_codec.rs

//! CSV line codec.
//!
//! Input format (lines → `InputMessage`):
//!
//! - Rest an order:
//!   `A, qty(int), price(decimal), side(char B=bid or A=ask)`
//!
//! - Execute an order:
//!   `X, type(char M or L), qty(int), side(char B=buy or S=sell)[, price(decimal)]`
//!   (price is required for `L`, ignored for `M`)
//!
//! - Best quote:
//!   `Q, side(B or A)`
//!
//! - Top of book (both sides):
//!   `T`
//!
//! Output format (`OutputMessage` → line):
//!
//! - Added:     `A, sequence, side, qty, price`
//! - Trade:     `T, price, qty, restingSequence`
//! - Filled:    `F, units, totalValue, avgPrice|-, restedQty`
//! - BestQuote: `P, side, price` or `P, side, -`
//! - TopOfBook: `B, side, price, totalQuantity` or `B, side, -, -`
//! - Rejected:  `R, reason`
//!
//! Decimals are written normalised: `100.0` prints as `100`.

use std::num::ParseIntError;
use std::str::FromStr;

use lob_core::{
    AddOrder, BookSide, EngineError, ExecuteOrder, InputMessage, OrderType, OutputMessage, Side,
};
use rust_decimal::Decimal;
use thiserror::Error;

/// Why a line could not be turned into an `InputMessage`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty line")]
    Empty,

    #[error("unknown message type: {0:?}")]
    UnknownMessageType(String),

    #[error("expected {expected} fields for {msg_type:?}, got {got}")]
    FieldCount {
        msg_type: char,
        expected: &'static str,
        got: usize,
    },

    #[error("invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// `true` for blank lines and `#` comments, which callers skip.
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse a single CSV line into an `InputMessage`.
pub fn parse_input_line(line: &str) -> Result<InputMessage, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let tokens = split_and_trim(trimmed, ',');

    match tokens[0].as_str() {
        "A" => parse_add(&tokens),
        "X" => parse_execute(&tokens),
        "Q" => parse_best_quote(&tokens),
        "T" => {
            expect_fields(&tokens, 'T', "1", |n| n == 1)?;
            Ok(InputMessage::QueryTopOfBook)
        }
        other => Err(ParseError::UnknownMessageType(other.to_string())),
    }
}

fn parse_add(tokens: &[String]) -> Result<InputMessage, ParseError> {
    // A, qty, price, side
    expect_fields(tokens, 'A', "4", |n| n == 4)?;

    let quantity = parse_u32(&tokens[1]).map_err(|_| invalid("quantity", &tokens[1]))?;
    let price = parse_decimal(&tokens[2])?;
    let side = parse_book_side(&tokens[3])?;

    Ok(InputMessage::AddOrder(AddOrder {
        quantity,
        price,
        side,
    }))
}

fn parse_execute(tokens: &[String]) -> Result<InputMessage, ParseError> {
    // X, type, qty, side[, price]
    expect_fields(tokens, 'X', "4 or 5", |n| n == 4 || n == 5)?;

    let order_type = OrderType::from_str(&tokens[1])?;
    let quantity = parse_u32(&tokens[2]).map_err(|_| invalid("quantity", &tokens[2]))?;

    let side = match single_char(&tokens[3]).and_then(Side::from_char) {
        Some(side) => side,
        None => return Err(invalid("side", &tokens[3])),
    };

    let price = match tokens.get(4) {
        Some(raw) if !raw.is_empty() => Some(parse_decimal(raw)?),
        _ => None,
    };

    Ok(InputMessage::ExecuteOrder(ExecuteOrder {
        order_type,
        quantity,
        side,
        price,
    }))
}

fn parse_best_quote(tokens: &[String]) -> Result<InputMessage, ParseError> {
    // Q, side
    expect_fields(tokens, 'Q', "2", |n| n == 2)?;
    Ok(InputMessage::QueryBestQuote(parse_book_side(&tokens[1])?))
}

/// Format an `OutputMessage` as a CSV line.
pub fn format_output(msg: &OutputMessage) -> String {
    match msg {
        OutputMessage::Added(a) => format!(
            "A, {}, {}, {}, {}",
            a.sequence,
            a.side.as_char(),
            a.quantity,
            fmt_decimal(a.price)
        ),
        OutputMessage::Trade(t) => format!(
            "T, {}, {}, {}",
            fmt_decimal(t.price),
            t.quantity,
            t.resting_sequence
        ),
        OutputMessage::Filled(f) => format!(
            "F, {}, {}, {}, {}",
            f.units_transacted,
            fmt_decimal(f.total_value),
            fmt_optional(f.average_price()),
            f.rested_quantity
        ),
        OutputMessage::BestQuote(q) => {
            format!("P, {}, {}", q.side.as_char(), fmt_optional(q.price))
        }
        OutputMessage::TopOfBook(t) => match t.price {
            Some(price) => format!(
                "B, {}, {}, {}",
                t.side.as_char(),
                fmt_decimal(price),
                t.total_quantity
            ),
            None => format!("B, {}, -, -", t.side.as_char()),
        },
        OutputMessage::Rejected(r) => format!("R, {}", r.reason),
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn split_and_trim(s: &str, delimiter: char) -> Vec<String> {
    s.split(delimiter)
        .map(|tok| tok.trim().to_string())
        .collect()
}

fn expect_fields(
    tokens: &[String],
    msg_type: char,
    expected: &'static str,
    ok: impl Fn(usize) -> bool,
) -> Result<(), ParseError> {
    if ok(tokens.len()) {
        Ok(())
    } else {
        Err(ParseError::FieldCount {
            msg_type,
            expected,
            got: tokens.len(),
        })
    }
}

fn invalid(field: &'static str, value: &str) -> ParseError {
    ParseError::InvalidField {
        field,
        value: value.to_string(),
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_book_side(s: &str) -> Result<BookSide, ParseError> {
    single_char(s)
        .and_then(BookSide::from_char)
        .ok_or_else(|| invalid("side", s))
}

fn parse_u32(s: &str) -> Result<u32, ParseIntError> {
    s.parse::<u32>()
}

fn parse_decimal(s: &str) -> Result<Decimal, ParseError> {
    Decimal::from_str(s).map_err(|_| invalid("price", s))
}

fn fmt_decimal(d: Decimal) -> String {
    d.normalize().to_string()
}

fn fmt_optional(d: Option<Decimal>) -> String {
    d.map(fmt_decimal).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lob_core::{Added, BestQuote, Execution, FillReport};
    use rust_decimal_macros::dec;

    #[test]
    fn parses_rest_line() {
        let msg = parse_input_line(" A, 5, 100.25, A ").unwrap();
        assert_eq!(
            msg,
            InputMessage::AddOrder(AddOrder {
                quantity: 5,
                price: dec!(100.25),
                side: BookSide::Ask,
            })
        );
    }

    #[test]
    fn parses_market_and_limit_lines() {
        assert_eq!(
            parse_input_line("X, M, 8, B").unwrap(),
            InputMessage::ExecuteOrder(ExecuteOrder {
                order_type: OrderType::Market,
                quantity: 8,
                side: Side::Buy,
                price: None,
            })
        );
        assert_eq!(
            parse_input_line("X, L, 10, S, 99.5").unwrap(),
            InputMessage::ExecuteOrder(ExecuteOrder {
                order_type: OrderType::Limit,
                quantity: 10,
                side: Side::Sell,
                price: Some(dec!(99.5)),
            })
        );
    }

    #[test]
    fn limit_without_price_parses_and_is_left_to_the_engine() {
        let msg = parse_input_line("X, L, 10, B").unwrap();
        assert!(matches!(
            msg,
            InputMessage::ExecuteOrder(ExecuteOrder { price: None, .. })
        ));
    }

    #[test]
    fn parses_queries() {
        assert_eq!(
            parse_input_line("Q, B").unwrap(),
            InputMessage::QueryBestQuote(BookSide::Bid)
        );
        assert_eq!(parse_input_line("T").unwrap(), InputMessage::QueryTopOfBook);
    }

    #[test]
    fn unknown_order_type_surfaces_engine_error() {
        assert_eq!(
            parse_input_line("X, K, 10, B"),
            Err(ParseError::Engine(EngineError::InvalidOrderType("K".to_string())))
        );
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(parse_input_line("   "), Err(ParseError::Empty));
        assert!(matches!(
            parse_input_line("Z, 1"),
            Err(ParseError::UnknownMessageType(_))
        ));
        assert!(matches!(
            parse_input_line("A, 5, 100"),
            Err(ParseError::FieldCount { msg_type: 'A', .. })
        ));
        assert!(matches!(
            parse_input_line("A, five, 100, B"),
            Err(ParseError::InvalidField { field: "quantity", .. })
        ));
        assert!(matches!(
            parse_input_line("A, 5, abc, B"),
            Err(ParseError::InvalidField { field: "price", .. })
        ));
        assert!(matches!(
            parse_input_line("X, M, 5, A"),
            Err(ParseError::InvalidField { field: "side", .. })
        ));
    }

    #[test]
    fn skippable_lines() {
        assert!(is_skippable(""));
        assert!(is_skippable("  # comment"));
        assert!(!is_skippable("T"));
    }

    #[test]
    fn formats_outputs() {
        let added = OutputMessage::Added(Added {
            sequence: 3,
            side: BookSide::Bid,
            quantity: 7,
            price: dec!(100.0),
        });
        assert_eq!(format_output(&added), "A, 3, B, 7, 100");

        let trade = OutputMessage::Trade(Execution {
            price: dec!(101.50),
            quantity: 3,
            resting_sequence: 2,
        });
        assert_eq!(format_output(&trade), "T, 101.5, 3, 2");

        let filled = OutputMessage::Filled(FillReport {
            units_transacted: 8,
            total_value: dec!(803.0),
            rested_quantity: 0,
        });
        assert_eq!(format_output(&filled), "F, 8, 803, 100.375, 0");

        let nothing = OutputMessage::Filled(FillReport {
            units_transacted: 0,
            total_value: Decimal::ZERO,
            rested_quantity: 10,
        });
        assert_eq!(format_output(&nothing), "F, 0, 0, -, 10");

        let quote = OutputMessage::BestQuote(BestQuote {
            side: BookSide::Ask,
            price: None,
        });
        assert_eq!(format_output(&quote), "P, A, -");

        assert_eq!(
            format_output(&OutputMessage::top_of_book(BookSide::Bid, dec!(99.90), 12)),
            "B, B, 99.9, 12"
        );
        assert_eq!(
            format_output(&OutputMessage::top_of_book_eliminated(BookSide::Ask)),
            "B, A, -, -"
        );
        assert_eq!(
            format_output(&OutputMessage::rejected("invalid quantity: 0")),
            "R, invalid quantity: 0"
        );
    }
}
