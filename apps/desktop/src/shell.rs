//! # Line Shell
//!
//! A line-oriented front end for the commands: one command per line in,
//! one JSON response per line out.
//!
//! ## Commands
//! ```text
//! calc <keys…>                  press keys, e.g. `calc 12 + 30 =`
//! bill show                     current bill, totals, preview
//! bill name <text>              set the customer name
//! bill date <YYYY-MM-DD>        set the bill date
//! bill number <text>            override the bill number
//! bill company <text>           override the seller name
//! bill add                      append a blank item
//! bill set <id> <field> <value> edit description | quantity | price
//! bill rm <id>                  remove an item
//! bill clear                    empty the form
//! bill generate                 validate and show the invoice preview
//! bill back                     leave the preview
//! bill print                    print the preview
//! config                        show configuration
//! help                          list commands
//! quit                          exit
//! ```

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::commands::{bill, calculator, config};
use crate::error::ApiError;
use crate::print::PrintSink;
use crate::state::{BillSession, CalculatorSession, ConfigState};
use tally_core::CalculatorCommand;

const HELP: &[&str] = &[
    "calc <keys…>",
    "bill show",
    "bill name <text>",
    "bill date <YYYY-MM-DD>",
    "bill number <text>",
    "bill company <text>",
    "bill add",
    "bill set <id> <description|quantity|price> <value>",
    "bill rm <id>",
    "bill clear",
    "bill generate",
    "bill back",
    "bill print",
    "config",
    "help",
    "quit",
];

/// Errors in the shape of a shell line, before any command runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
}

impl From<ShellError> for ApiError {
    fn from(err: ShellError) -> Self {
        ApiError::invalid_input(err.to_string())
    }
}

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Calc(Vec<String>),
    BillShow,
    BillName(String),
    BillDate(String),
    BillNumber(String),
    BillCompany(String),
    BillAdd,
    BillSet {
        item_id: String,
        field: String,
        value: String,
    },
    BillRemove(String),
    BillClear,
    BillGenerate,
    BillBack,
    BillPrint,
    Config,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (head, rest) = split_word(line);
        match head.to_ascii_lowercase().as_str() {
            "calc" => Ok(ShellCommand::Calc(
                rest.split_whitespace().map(str::to_string).collect(),
            )),
            "bill" => parse_bill(rest),
            "config" => Ok(ShellCommand::Config),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            _ => Err(ShellError::UnknownCommand(line.trim().to_string())),
        }
    }
}

fn parse_bill(args: &str) -> Result<ShellCommand, ShellError> {
    let (action, rest) = split_word(args);
    match action.to_ascii_lowercase().as_str() {
        "" | "show" => Ok(ShellCommand::BillShow),
        // Names keep their inner spacing; only the ends are trimmed.
        "name" => Ok(ShellCommand::BillName(rest.to_string())),
        "date" => Ok(ShellCommand::BillDate(required(rest, "date")?.to_string())),
        "number" => Ok(ShellCommand::BillNumber(rest.to_string())),
        "company" => Ok(ShellCommand::BillCompany(rest.to_string())),
        "add" => Ok(ShellCommand::BillAdd),
        "set" => {
            let (item_id, rest) = split_word(rest);
            let (field, value) = split_word(rest);
            Ok(ShellCommand::BillSet {
                item_id: required(item_id, "item id")?.to_string(),
                field: required(field, "field")?.to_string(),
                value: value.to_string(),
            })
        }
        "rm" | "remove" => Ok(ShellCommand::BillRemove(
            required(rest, "item id")?.to_string(),
        )),
        "clear" => Ok(ShellCommand::BillClear),
        "generate" => Ok(ShellCommand::BillGenerate),
        "back" => Ok(ShellCommand::BillBack),
        "print" => Ok(ShellCommand::BillPrint),
        other => Err(ShellError::UnknownCommand(format!("bill {other}"))),
    }
}

/// Splits off the first word; the remainder is trimmed.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str, ShellError> {
    if value.is_empty() {
        Err(ShellError::MissingArgument(name))
    } else {
        Ok(value)
    }
}

/// The host: state containers, configuration and a printer.
pub struct Shell {
    calculator: CalculatorSession,
    bill: BillSession,
    config: ConfigState,
    printer: Box<dyn PrintSink>,
}

impl Shell {
    /// Fresh sessions using the configured tax policy.
    pub fn new(config: ConfigState, printer: Box<dyn PrintSink>) -> Self {
        let bill = BillSession::with_defaults(config.tax_rate);
        Self::with_sessions(CalculatorSession::new(), bill, config, printer)
    }

    pub fn with_sessions(
        calculator: CalculatorSession,
        bill: BillSession,
        config: ConfigState,
        printer: Box<dyn PrintSink>,
    ) -> Self {
        Shell {
            calculator,
            bill,
            config,
            printer,
        }
    }

    /// Runs one parsed command. `Quit` is answered with `{"quit": true}`.
    pub fn execute(&self, command: ShellCommand) -> Result<Value, ApiError> {
        debug!(?command, "shell command");
        match command {
            ShellCommand::Calc(keys) => {
                let mut response = calculator::get_calculator(&self.calculator);
                for command in parse_keys(&keys)? {
                    response = calculator::apply_command(&self.calculator, command);
                }
                to_json(&response)
            }
            ShellCommand::BillShow => to_json(&bill::get_bill(&self.bill)),
            ShellCommand::BillName(name) => to_json(&bill::set_customer_name(&self.bill, &name)),
            ShellCommand::BillDate(date) => to_json(&bill::set_bill_date(&self.bill, &date)?),
            ShellCommand::BillNumber(number) => to_json(&bill::set_bill_number(&self.bill, &number)),
            ShellCommand::BillCompany(name) => to_json(&bill::set_company_name(&self.bill, &name)),
            ShellCommand::BillAdd => to_json(&bill::add_bill_item(&self.bill)),
            ShellCommand::BillSet {
                item_id,
                field,
                value,
            } => to_json(&bill::update_bill_item(&self.bill, &item_id, &field, &value)?),
            ShellCommand::BillRemove(item_id) => {
                to_json(&bill::remove_bill_item(&self.bill, &item_id)?)
            }
            ShellCommand::BillClear => to_json(&bill::clear_bill(&self.bill)),
            ShellCommand::BillGenerate => to_json(&bill::generate_bill(&self.bill)),
            ShellCommand::BillBack => to_json(&bill::back_to_edit(&self.bill)),
            ShellCommand::BillPrint => to_json(&bill::print_bill(
                &self.bill,
                &self.config,
                self.printer.as_ref(),
            )?),
            ShellCommand::Config => to_json(&config::get_config(&self.config)),
            ShellCommand::Help => Ok(json!({ "help": HELP })),
            ShellCommand::Quit => Ok(json!({ "quit": true })),
        }
    }

    /// Handles one raw line and returns the JSON to print.
    ///
    /// `None` for blank lines and for `quit`.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        if line.trim().is_empty() {
            return None;
        }

        let result = line
            .parse::<ShellCommand>()
            .map_err(ApiError::from)
            .and_then(|command| match command {
                ShellCommand::Quit => Ok(None),
                command => self.execute(command).map(Some),
            });

        match result {
            Ok(Some(value)) => Some(value.to_string()),
            Ok(None) => None,
            Err(err) => Some(json!({ "error": err }).to_string()),
        }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            if matches!(line.parse::<ShellCommand>(), Ok(ShellCommand::Quit)) {
                break;
            }
            if let Some(response) = self.handle_line(&line) {
                writeln!(output, "{response}")?;
                output.flush()?;
            }
        }
        Ok(())
    }
}

/// Keypad labels in order. A token that is not a label on its own is read
/// one character at a time, so `12` types `1` then `2`.
fn parse_keys(keys: &[String]) -> Result<Vec<CalculatorCommand>, ApiError> {
    let mut commands = Vec::new();
    for key in keys {
        match key.parse::<CalculatorCommand>() {
            Ok(command) => commands.push(command),
            Err(err) if key.chars().count() == 1 => return Err(err.into()),
            Err(_) => {
                for c in key.chars() {
                    commands.push(c.to_string().parse::<CalculatorCommand>()?);
                }
            }
        }
    }
    Ok(commands)
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}
