//! Shell sessions: lines in, JSON out.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::Value;
use tally_core::ids::SequentialIdGenerator;
use tally_core::CalculatorState;
use tally_desktop_lib::print::MemoryPrinter;
use tally_desktop_lib::shell::Shell;
use tally_desktop_lib::state::{BillSession, CalculatorSession, ConfigState, FixedClock};

fn shell(printer: MemoryPrinter) -> Shell {
    let config = ConfigState::default();
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap());
    let bill = BillSession::new(
        config.tax_rate,
        Arc::new(SequentialIdGenerator::new()),
        Arc::new(clock),
    );
    Shell::with_sessions(CalculatorSession::new(), bill, config, Box::new(printer))
}

fn run(shell: &Shell, script: &str) -> Vec<Value> {
    let mut output = Vec::new();
    shell.run(script.as_bytes(), &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn calculator_session() {
    let shell = shell(MemoryPrinter::new());
    let responses = run(&shell, "calc 12 + 30 =\ncalc C 6 / 0 =\ncalc ⌫\n");

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["display"], "42");
    assert_eq!(responses[1]["display"], "Infinity");
    assert_eq!(responses[2]["display"], "0");
}

#[test]
fn repeated_operator_chains() {
    let shell = shell(MemoryPrinter::new());
    let responses = run(&shell, "calc 5 + + =\n");

    assert_eq!(responses[0]["display"], "20");
}

#[test]
fn non_finite_operand_survives_the_json_boundary() {
    let shell = shell(MemoryPrinter::new());
    let responses = run(&shell, "calc 6 / 0 +\n");

    let state = &responses[0]["state"];
    assert_eq!(state["firstOperand"], "Infinity");
    assert_eq!(state["operator"], "+");

    let restored: CalculatorState = serde_json::from_value(state.clone()).unwrap();
    assert_eq!(restored.first_operand(), Some(f64::INFINITY));
    assert!(restored.operator().is_some());
}

#[test]
fn bill_session_to_print() {
    let printer = MemoryPrinter::new();
    let shell = shell(printer.clone());
    let script = "\
bill name Acme Corp
bill add
bill set 1 description Blue widget
bill set 1 quantity 2
bill set 1 price 10
bill generate
bill print
";
    let responses = run(&shell, script);

    let generated = &responses[5];
    assert_eq!(generated["notification"]["title"], "Bill generated");
    assert_eq!(generated["preview"]["total"], 2200);
    assert_eq!(generated["preview"]["lines"][0]["description"], "Blue widget");

    let pages = printer.pages();
    assert_eq!(pages.len(), 1);
    assert!(pages[0].contains("Blue widget"));
    assert!(pages[0].contains("Acme Corp"));
}

#[test]
fn errors_are_reported_and_the_session_continues() {
    let shell = shell(MemoryPrinter::new());
    let responses = run(&shell, "frobnicate\nbill print\nbill date 2024-02-30\ncalc 1 %\nbill\n");

    assert_eq!(responses.len(), 5);
    assert_eq!(responses[0]["error"]["code"], "INVALID_INPUT");
    assert_eq!(responses[1]["error"]["code"], "NOT_FOUND");
    assert_eq!(responses[2]["error"]["code"], "INVALID_INPUT");
    assert_eq!(responses[3]["error"]["code"], "INVALID_INPUT");
    assert_eq!(responses[4]["bill"]["date"], "2024-03-15");
}

#[test]
fn quit_stops_reading() {
    let shell = shell(MemoryPrinter::new());
    let responses = run(&shell, "config\nquit\ncalc 9\n");

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["taxRate"], 1000);
    assert_eq!(responses[0]["letterhead"]["companyName"], "Your Company Name");
}
