// crates/lob-core/tests/regression_scenarios.rs
use lob_core::MatchingEngine;
use lob_protocol::csv_codec::{format_output, is_skippable, parse_input_line};

const INPUT: &str = include_str!("data/scenarios.csv");

struct Scenario {
    name: String,
    inputs: Vec<String>,
    expected: Vec<String>,
}

fn load_scenarios() -> Vec<Scenario> {
    let mut scenarios: Vec<Scenario> = Vec::new();

    for raw_line in INPUT.lines() {
        let line = raw_line.trim();

        if let Some(name) = line.strip_prefix("#name:") {
            scenarios.push(Scenario {
                name: name.trim().to_string(),
                inputs: Vec::new(),
                expected: Vec::new(),
            });
            continue;
        }
        if is_skippable(line) {
            continue;
        }

        let current = scenarios
            .last_mut()
            .expect("input line before the first #name: header");
        match line.strip_prefix('>') {
            Some(expected) => current.expected.push(expected.trim().to_string()),
            None => current.inputs.push(line.to_string()),
        }
    }

    scenarios
}

fn replay(inputs: &[String]) -> Vec<String> {
    let mut engine = MatchingEngine::new();
    let mut outputs = Vec::new();

    for line in inputs {
        let msg = parse_input_line(line)
            .unwrap_or_else(|e| panic!("unparseable input {:?}: {}", line, e));
        for out in engine.process_message(msg) {
            outputs.push(format_output(&out));
        }
    }

    outputs
}

#[test]
fn every_scenario_matches_expected_output() {
    let scenarios = load_scenarios();
    assert!(scenarios.len() >= 7, "scenario file should not be empty");

    for scenario in scenarios {
        let actual = replay(&scenario.inputs);
        assert_eq!(
            actual, scenario.expected,
            "scenario {:?} produced unexpected output",
            scenario.name
        );
    }
}

#[test]
fn full_input_replays_in_one_engine() {
    // Running every scenario back to back through one engine must not
    // panic and must still produce trades.
    let inputs: Vec<String> = load_scenarios()
        .into_iter()
        .flat_map(|s| s.inputs)
        .collect();

    let actual = replay(&inputs);
    assert!(!actual.is_empty(), "engine should produce some output");

    let trades = actual.iter().filter(|l| l.starts_with("T,")).count();
    let fills = actual.iter().filter(|l| l.starts_with("F,")).count();
    let rejects = actual.iter().filter(|l| l.starts_with("R,")).count();

    assert!(trades > 0, "should have some trades");
    assert_eq!(fills, 7);
    assert_eq!(rejects, 3);
}

#[test]
fn oversized_prices_are_rejected_and_the_book_keeps_serving() {
    let inputs: Vec<String> = [
        "A, 10, 10000000000000000000000000000, A",
        "X, M, 10, B",
        "A, 10, 1000000000000000, A",
        "X, M, 10, B",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    assert_eq!(
        replay(&inputs),
        vec![
            "R, invalid price: 10000000000000000000000000000",
            "F, 0, 0, -, 0",
            "A, 1, A, 10, 1000000000000000",
            "B, A, 1000000000000000, 10",
            "T, 1000000000000000, 10, 1",
            "F, 10, 10000000000000000, 1000000000000000, 0",
            "B, A, -, -",
        ]
    );
}
