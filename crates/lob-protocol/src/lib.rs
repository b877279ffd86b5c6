//! lob-protocol
//!
//! Text encoding/decoding for the order book engine.
//!
//! This crate turns logical engine messages
//! (`lob_core::InputMessage` / `OutputMessage`) into CSV lines and
//! back again. It is used by the TCP server, the console replay tool,
//! and the scenario tests.
//!
//! - [`csv_codec`] : line-oriented CSV (netcat-friendly, replay files)

pub mod csv_codec;

pub use csv_codec::{format_output, is_skippable, parse_input_line, ParseError};
