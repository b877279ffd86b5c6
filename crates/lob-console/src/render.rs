// crates/lob-console/src/render.rs

//! Plain-terminal ladder view of the book.
//!
//! ```text
//! ========== Orderbook =========
//!     $101.50   12 █
//!     $100.25   40 ████
//!
//! ======  24.93bps  ======
//!
//!     $100.00   73 ███████
//!     $ 99.75    5
//! ==============================
//! ```
//!
//! Asks print above bids, each side's best level next to the spread.
//! One bar per 10 units of resting size.

use std::io::{self, Write};

use crossterm::style::Stylize;
use lob_core::{LevelSummary, MatchingEngine};

const HEADER: &str = "========== Orderbook =========";
const FOOTER: &str = "==============================";

pub fn render_book<W: Write>(out: &mut W, engine: &MatchingEngine, depth: usize) -> io::Result<()> {
    writeln!(out, "{}", HEADER)?;

    // Worst shown ask first so the best ask sits on top of the spread.
    let mut asks = engine.asks().depth(depth);
    asks.reverse();
    if asks.is_empty() {
        writeln!(out, "\t{}", "--".red())?;
    }
    for level in &asks {
        writeln!(out, "\t{}", format_level(level).red().bold())?;
    }

    let spread = match engine.top_of_book().spread_bps() {
        Some(bps) => format!("{:.2}bps", bps),
        None => "--".to_string(),
    };
    writeln!(out)?;
    writeln!(out, "{}", format!("======  {}  ======", spread).yellow().bold())?;
    writeln!(out)?;

    let bids = engine.bids().depth(depth);
    if bids.is_empty() {
        writeln!(out, "\t{}", "--".green())?;
    }
    for level in &bids {
        writeln!(out, "\t{}", format_level(level).green().bold())?;
    }

    writeln!(out, "{}", FOOTER)?;
    Ok(())
}

fn format_level(level: &LevelSummary) -> String {
    let price = format!("{:.2}", level.price);
    let bars = "█".repeat((level.quantity / 10) as usize);
    format!("${:>7} {:>5} {}", price, level.quantity, bars)
        .trim_end()
        .to_string()
}
