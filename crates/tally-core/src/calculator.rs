//! # Calculator Module
//!
//! A four-function calculator modelled as an explicit state machine.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Calculator Transitions                               │
//! │                                                                         │
//! │   Keypad          Command              State change                     │
//! │   ──────          ───────              ────────────                     │
//! │                                                                         │
//! │   7 ─────────────► Digit('7') ───────► display "0" → "7"               │
//! │                                                                         │
//! │   + ─────────────► Operator(+) ──────► first_operand = 7               │
//! │                                        operator = +, awaiting = true    │
//! │                                                                         │
//! │   3 ─────────────► Digit('3') ───────► display "3", awaiting = false   │
//! │                                                                         │
//! │   × ─────────────► Operator(*) ──────► resolve 7 + 3 → display "10"    │
//! │                                        first_operand = 10, operator = * │
//! │                                                                         │
//! │   = ─────────────► Equals ───────────► resolve pending, clear operands  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every transition consumes the state and returns the next one; nothing is
//! mutated behind the caller's back.
//!
//! ## Rules Worth Knowing
//! - Every operator press resolves a pending operation first, even when no
//!   new operand was typed: `5 + + =` is `(5 + 5) + 10`, so `20`.
//! - Division by zero is not an error. The display shows `Infinity`,
//!   `-Infinity` or `NaN`, and the next digit starts a fresh number.
//! - Display text that cannot be parsed counts as zero.
//!
//! ## Example
//! ```rust
//! use tally_core::calculator::{CalculatorCommand, CalculatorState};
//!
//! let state = ["7", "+", "3", "="]
//!     .iter()
//!     .map(|key| key.parse::<CalculatorCommand>().unwrap())
//!     .fold(CalculatorState::new(), CalculatorState::apply);
//!
//! assert_eq!(state.display(), "10");
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::{Digit, Operator};

/// What an empty calculator shows.
pub const DEFAULT_DISPLAY: &str = "0";

// =============================================================================
// Calculator State
// =============================================================================

/// Everything the calculator remembers between key presses.
///
/// ## Invariant
/// `operator` is set if and only if `first_operand` is set. [`equals`]
/// clears both together.
///
/// [`equals`]: CalculatorState::equals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CalculatorState {
    /// Text on the display. Never empty.
    display: String,

    /// Left-hand operand captured when an operator was chosen.
    ///
    /// Travels as display text (`"7"`, `"Infinity"`) because JSON numbers
    /// cannot hold the non-finite results of dividing by zero.
    #[serde(with = "operand_text")]
    #[ts(as = "Option<String>")]
    first_operand: Option<f64>,

    /// Operator waiting for its right-hand operand.
    operator: Option<Operator>,

    /// True right after an operator is chosen: the next digit starts a new
    /// number instead of extending the display.
    awaiting_second_operand: bool,
}

impl CalculatorState {
    /// A freshly mounted calculator showing `0`.
    pub fn new() -> Self {
        CalculatorState {
            display: DEFAULT_DISPLAY.to_string(),
            first_operand: None,
            operator: None,
            awaiting_second_operand: false,
        }
    }

    #[inline]
    pub fn display(&self) -> &str {
        &self.display
    }

    #[inline]
    pub fn first_operand(&self) -> Option<f64> {
        self.first_operand
    }

    #[inline]
    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    #[inline]
    pub fn is_awaiting_second_operand(&self) -> bool {
        self.awaiting_second_operand
    }

    /// Numeric value of the display; unparseable text counts as zero.
    pub fn value(&self) -> f64 {
        parse_display(&self.display)
    }

    /// Whether the display holds `Infinity`, `-Infinity` or `NaN`.
    pub fn shows_sentinel(&self) -> bool {
        is_sentinel(&self.display)
    }

    /// Applies one command.
    pub fn apply(self, command: CalculatorCommand) -> Self {
        match command {
            CalculatorCommand::Digit { digit } => self.input_digit(digit),
            CalculatorCommand::Decimal => self.input_decimal(),
            CalculatorCommand::Operator { operator } => self.choose_operator(operator),
            CalculatorCommand::Equals => self.equals(),
            CalculatorCommand::Clear => self.clear(),
            CalculatorCommand::Backspace => self.backspace(),
            CalculatorCommand::Negate => self.negate(),
        }
    }

    /// Applies commands in order.
    pub fn apply_all<I>(self, commands: I) -> Self
    where
        I: IntoIterator<Item = CalculatorCommand>,
    {
        commands.into_iter().fold(self, CalculatorState::apply)
    }

    /// Types a digit.
    ///
    /// Starts a new number when awaiting the second operand, or when the
    /// display is `0` or a sentinel; otherwise appends.
    pub fn input_digit(mut self, digit: Digit) -> Self {
        if self.awaiting_second_operand {
            self.display = digit.to_string();
            self.awaiting_second_operand = false;
        } else if self.display == DEFAULT_DISPLAY || self.shows_sentinel() {
            self.display = digit.to_string();
        } else {
            self.display.push(digit.as_char());
        }
        self
    }

    /// Types the decimal point. A second point in the same number is ignored.
    pub fn input_decimal(mut self) -> Self {
        if self.awaiting_second_operand || self.shows_sentinel() {
            self.display = "0.".to_string();
            self.awaiting_second_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
        self
    }

    /// Chooses the next operator.
    ///
    /// A pending operation is resolved first against the display (operator
    /// chaining). That holds even when no second operand was typed, so a
    /// repeated operator applies the pending one to the display again.
    pub fn choose_operator(mut self, next: Operator) -> Self {
        let value = self.value();
        match (self.first_operand, self.operator) {
            (Some(first), Some(pending)) => {
                let result = pending.apply(first, value);
                self.display = format_number(result);
                self.first_operand = Some(result);
            }
            _ => self.first_operand = Some(value),
        }

        self.operator = Some(next);
        self.awaiting_second_operand = true;
        self
    }

    /// Resolves the pending operation. No-op without one.
    pub fn equals(mut self) -> Self {
        let (Some(first), Some(operator)) = (self.first_operand, self.operator) else {
            return self;
        };

        let result = operator.apply(first, self.value());
        self.display = format_number(result);
        self.first_operand = None;
        self.operator = None;
        self.awaiting_second_operand = false;
        self
    }

    /// Resets everything.
    pub fn clear(self) -> Self {
        CalculatorState::new()
    }

    /// Deletes the last typed character.
    pub fn backspace(mut self) -> Self {
        if self.shows_sentinel() {
            self.display = DEFAULT_DISPLAY.to_string();
            return self;
        }

        self.display.pop();
        if self.display.is_empty() || self.display == "-" {
            self.display = DEFAULT_DISPLAY.to_string();
        }
        self
    }

    /// Flips the sign of the displayed value.
    pub fn negate(mut self) -> Self {
        self.display = format_number(-self.value());
        self
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState::new()
    }
}

// =============================================================================
// Commands
// =============================================================================

/// A single key press, as sent by the keypad.
///
/// Serialized with a `type` tag so the frontend can send
/// `{ "type": "digit", "digit": "7" }` or `{ "type": "equals" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CalculatorCommand {
    Digit { digit: Digit },
    Decimal,
    Operator { operator: Operator },
    Equals,
    Clear,
    Backspace,
    Negate,
}

/// Maps keypad labels to commands: `0-9`, `.`, `+ - * /` (and `× ÷ −`),
/// `=`, `C`, `⌫`, `±`.
impl FromStr for CalculatorCommand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();

        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_digit() {
                return Ok(CalculatorCommand::Digit {
                    digit: Digit::new(c)?,
                });
            }
        }

        if let Ok(operator) = key.parse::<Operator>() {
            return Ok(CalculatorCommand::Operator { operator });
        }

        match key.to_ascii_lowercase().as_str() {
            "." | "," => Ok(CalculatorCommand::Decimal),
            "=" | "enter" => Ok(CalculatorCommand::Equals),
            "c" | "ac" | "clear" => Ok(CalculatorCommand::Clear),
            "⌫" | "backspace" | "del" => Ok(CalculatorCommand::Backspace),
            "±" | "+/-" | "neg" => Ok(CalculatorCommand::Negate),
            _ => Err(CoreError::UnknownKey(key.to_string())),
        }
    }
}

// =============================================================================
// Number <-> Display Text
// =============================================================================

/// Magnitudes at or above this are written in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;

/// Magnitudes below this are written in exponent form.
const EXPONENT_BELOW: f64 = 1e-6;

/// Writes a result the way the display shows it.
///
/// - integers without a fraction: `10`, not `10.0`
/// - shortest text that reads back to the same `f64`: `0.30000000000000004`
/// - exponent form outside `1e-6..1e21`: `1e+300`, `1.5e-7`
/// - negative zero as `0`
/// - `Infinity`, `-Infinity`, `NaN` for non-finite results
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        (if value > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
    } else if value == 0.0 {
        DEFAULT_DISPLAY.to_string()
    } else if !(EXPONENT_BELOW..EXPONENT_ABOVE).contains(&value.abs()) {
        let text = format!("{value:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        }
    } else {
        value.to_string()
    }
}

/// Reads display text back as a number. Unparseable text is zero.
pub fn parse_display(display: &str) -> f64 {
    display.trim().parse::<f64>().unwrap_or(0.0)
}

fn is_sentinel(display: &str) -> bool {
    matches!(display, "Infinity" | "-Infinity" | "NaN")
}

/// Serde adapter writing an optional operand as display text.
mod operand_text {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{format_number, parse_display};

    pub fn serialize<S>(operand: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        operand.map(format_number).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;
        Ok(text.as_deref().map(parse_display))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn press(keys: &str) -> CalculatorState {
        keys.split_whitespace()
            .map(|key| key.parse::<CalculatorCommand>().unwrap())
            .fold(CalculatorState::new(), CalculatorState::apply)
    }

    #[test]
    fn test_new_state_defaults() {
        let state = CalculatorState::new();
        assert_eq!(state.display(), "0");
        assert_eq!(state.first_operand(), None);
        assert_eq!(state.operator(), None);
        assert!(!state.is_awaiting_second_operand());
        assert_eq!(state, CalculatorState::default());
    }

    #[test]
    fn test_digits_concatenate_without_leading_zero() {
        assert_eq!(press("0 0 1 2 3").display(), "123");
        assert_eq!(press("4 0 0").display(), "400");
        assert_eq!(press("0").display(), "0");
    }

    #[test]
    fn test_simple_addition() {
        assert_eq!(press("7 + 3 =").display(), "10");
    }

    #[test]
    fn test_each_operator() {
        assert_eq!(press("9 - 4 =").display(), "5");
        assert_eq!(press("6 * 7 =").display(), "42");
        assert_eq!(press("7 / 2 =").display(), "3.5");
        assert_eq!(press("2 - 5 =").display(), "-3");
    }

    #[test]
    fn test_operator_chaining_resolves_pending() {
        let state = press("7 + 3 *");
        assert_eq!(state.display(), "10");
        assert_eq!(state.first_operand(), Some(10.0));
        assert_eq!(state.operator(), Some(Operator::Multiply));
        assert!(state.is_awaiting_second_operand());

        assert_eq!(press("7 + 3 * 2 =").display(), "20");
    }

    #[test]
    fn test_repeated_operator_resolves_pending_again() {
        let state = press("5 + +");
        assert_eq!(state.first_operand(), Some(10.0));
        assert_eq!(state.operator(), Some(Operator::Add));
        assert_eq!(state.display(), "10");
        assert!(state.is_awaiting_second_operand());

        assert_eq!(press("5 + + =").display(), "20");
        assert_eq!(press("5 + * 2 =").display(), "20");
    }

    #[test]
    fn test_equals_without_operator_is_noop() {
        let before = press("4 2");
        let after = before.clone().equals();
        assert_eq!(before, after);

        let fresh = CalculatorState::new();
        assert_eq!(fresh.clone().equals(), fresh);
    }

    #[test]
    fn test_equals_clears_operands() {
        let state = press("8 / 2 =");
        assert_eq!(state.display(), "4");
        assert_eq!(state.first_operand(), None);
        assert_eq!(state.operator(), None);
        assert!(!state.is_awaiting_second_operand());
    }

    #[test]
    fn test_equals_uses_display_when_no_second_operand_typed() {
        // 5 + = → 5 + 5
        assert_eq!(press("5 + =").display(), "10");
    }

    #[test]
    fn test_division_by_zero_shows_sentinel() {
        let state = press("6 / 0 =");
        assert_eq!(state.display(), "Infinity");
        assert!(state.shows_sentinel());

        assert_eq!(press("6 ± / 0 =").display(), "-Infinity");
        assert_eq!(press("0 / 0 =").display(), "NaN");
    }

    #[test]
    fn test_digit_after_sentinel_starts_fresh() {
        assert_eq!(press("6 / 0 = 5").display(), "5");
        assert_eq!(press("6 / 0 = .").display(), "0.");
    }

    #[test]
    fn test_decimal_input() {
        assert_eq!(press(". 5").display(), "0.5");
        assert_eq!(press("1 . 2 . 3").display(), "1.23");
        assert_eq!(press("1 + .").display(), "0.");
        assert_eq!(press("1 + . 5 =").display(), "1.5");
    }

    #[test]
    fn test_floating_point_results_are_not_rounded() {
        assert_eq!(press(". 1 + . 2 =").display(), "0.30000000000000004");
    }

    #[test]
    fn test_clear_resets_everything() {
        let state = press("9 + 1 C");
        assert_eq!(state, CalculatorState::new());
    }

    #[test]
    fn test_backspace() {
        assert_eq!(press("1 2 3 ⌫").display(), "12");
        assert_eq!(press("7 ⌫").display(), "0");
        assert_eq!(press("⌫").display(), "0");
        assert_eq!(press("5 ± ⌫").display(), "0");
        assert_eq!(press("6 / 0 = ⌫").display(), "0");
    }

    #[test]
    fn test_negate() {
        assert_eq!(press("5 ±").display(), "-5");
        assert_eq!(press("5 ± ±").display(), "5");
        assert_eq!(press("0 ±").display(), "0");
        assert_eq!(press("2 . 5 ±").display(), "-2.5");
    }

    #[test]
    fn test_digit_after_equals_extends_result() {
        assert_eq!(press("7 + 3 = 5").display(), "105");
    }

    #[test]
    fn test_operator_after_equals_continues_from_result() {
        assert_eq!(press("7 + 3 = * 2 =").display(), "20");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_number_uses_exponent_for_extremes() {
        assert_eq!(format_number(1e300), "1e+300");
        assert_eq!(format_number(-2.5e21), "-2.5e+21");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(parse_display("1e+300"), 1e300);
    }

    #[test]
    fn test_parse_display() {
        assert_eq!(parse_display("12.5"), 12.5);
        assert_eq!(parse_display("0."), 0.0);
        assert_eq!(parse_display("5."), 5.0);
        assert_eq!(parse_display("-"), 0.0);
        assert_eq!(parse_display("garbage"), 0.0);
        assert!(parse_display("Infinity").is_infinite());
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(
            "7".parse::<CalculatorCommand>().unwrap(),
            CalculatorCommand::Digit {
                digit: Digit::new('7').unwrap()
            }
        );
        assert_eq!(
            "÷".parse::<CalculatorCommand>().unwrap(),
            CalculatorCommand::Operator {
                operator: Operator::Divide
            }
        );
        assert_eq!("=".parse::<CalculatorCommand>().unwrap(), CalculatorCommand::Equals);
        assert_eq!("C".parse::<CalculatorCommand>().unwrap(), CalculatorCommand::Clear);
        assert_eq!(".".parse::<CalculatorCommand>().unwrap(), CalculatorCommand::Decimal);
        assert!("77".parse::<CalculatorCommand>().is_err());
        assert!("sqrt".parse::<CalculatorCommand>().is_err());
    }

    #[test]
    fn test_command_json_shape() {
        let command: CalculatorCommand =
            serde_json::from_str(r#"{ "type": "digit", "digit": "7" }"#).unwrap();
        assert_eq!(command, "7".parse().unwrap());

        let command: CalculatorCommand =
            serde_json::from_str(r#"{ "type": "operator", "operator": "+" }"#).unwrap();
        assert_eq!(command, "+".parse().unwrap());

        let json = serde_json::to_value(CalculatorCommand::Backspace).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "backspace" }));
    }

    #[test]
    fn test_state_json_shape() {
        let json = serde_json::to_value(press("7 +")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "display": "7",
                "firstOperand": "7",
                "operator": "+",
                "awaitingSecondOperand": true
            })
        );
    }

    #[test]
    fn test_state_json_keeps_non_finite_operand() {
        let state = press("6 / 0 +");
        assert_eq!(state.first_operand(), Some(f64::INFINITY));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["firstOperand"], "Infinity");
        assert_eq!(json["operator"], "+");

        let restored: CalculatorState = serde_json::from_value(json).unwrap();
        assert_eq!(restored, state);

        let fresh = serde_json::to_value(CalculatorState::new()).unwrap();
        assert_eq!(fresh["firstOperand"], serde_json::Value::Null);
        let restored: CalculatorState = serde_json::from_value(fresh).unwrap();
        assert_eq!(restored, CalculatorState::new());
    }
}
