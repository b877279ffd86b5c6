// crates/lob-console/src/replay.rs

//! Feed a CSV request file through an engine and echo every output line.
//!
//! Lines that fail to parse are reported the same way the server
//! reports them (`R, reason`) and replay carries on.

use std::io::{self, BufRead, Write};

use lob_core::{MatchingEngine, OutputMessage};
use lob_protocol::csv_codec::{format_output, is_skippable, parse_input_line};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub requests: usize,
    pub outputs: usize,
    pub parse_errors: usize,
}

pub fn replay<R: BufRead, W: Write>(
    input: R,
    engine: &mut MatchingEngine,
    out: &mut W,
) -> io::Result<ReplayStats> {
    let mut stats = ReplayStats::default();

    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        if is_skippable(&line) {
            continue;
        }

        let outputs = match parse_input_line(&line) {
            Ok(msg) => {
                stats.requests += 1;
                engine.process_message(msg)
            }
            Err(e) => {
                debug!(line = line_no + 1, error = %e, "skipping unparseable line");
                stats.parse_errors += 1;
                vec![OutputMessage::rejected(e.to_string())]
            }
        };

        for msg in &outputs {
            writeln!(out, "{}", format_output(msg))?;
        }
        stats.outputs += outputs.len();
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lob_core::BookSide;
    use rust_decimal_macros::dec;

    #[test]
    fn replays_and_reports_bad_lines() {
        let input = "\
# rest two asks, then lift them
A, 5, 100.0, A
A, 5, 101.0, A

X, M, 8, B
X, K, 1, B
";
        let mut engine = MatchingEngine::new();
        let mut out = Vec::new();
        let stats = replay(input.as_bytes(), &mut engine, &mut out).unwrap();

        assert_eq!(stats.requests, 3);
        assert_eq!(stats.parse_errors, 1);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(stats.outputs, lines.len());
        assert!(lines.contains(&"F, 8, 803, 100.375, 0"));
        assert_eq!(lines.last(), Some(&"R, invalid order type: \"K\""));

        assert_eq!(engine.best_quote(BookSide::Ask), Ok(dec!(101)));
    }
}
