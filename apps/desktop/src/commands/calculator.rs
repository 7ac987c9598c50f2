//! # Calculator Commands
//!
//! Host commands for the keypad.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::CalculatorSession;
use tally_core::{CalculatorCommand, CalculatorState, Operator};

/// What the keypad screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResponse {
    /// Main display text
    pub display: String,

    /// Pending operation shown above the display, e.g. `12 +`
    pub pending: Option<String>,

    pub state: CalculatorState,
}

impl From<CalculatorState> for CalculatorResponse {
    fn from(state: CalculatorState) -> Self {
        let pending = pending_label(state.first_operand(), state.operator());
        CalculatorResponse {
            display: state.display().to_string(),
            pending,
            state,
        }
    }
}

fn pending_label(first_operand: Option<f64>, operator: Option<Operator>) -> Option<String> {
    let (first, operator) = (first_operand?, operator?);
    Some(format!("{} {}", tally_core::calculator::format_number(first), operator))
}

/// Gets the current calculator state.
pub fn get_calculator(calculator: &CalculatorSession) -> CalculatorResponse {
    debug!("get_calculator command");
    calculator.with_state(|state| CalculatorResponse::from(state.clone()))
}

/// Presses one keypad key by its label.
///
/// ## Accepted Labels
/// `0-9`, `.`, `+ - * /` (also `× ÷ −`), `=`, `C`, `⌫`, `±`
///
/// ## Errors
/// `INVALID_INPUT` for a label with no key behind it.
pub fn press_key(calculator: &CalculatorSession, label: &str) -> Result<CalculatorResponse, ApiError> {
    debug!(label = %label, "press_key command");
    let command: CalculatorCommand = label.parse()?;
    Ok(apply_command(calculator, command))
}

/// Applies an already-structured command.
pub fn apply_command(calculator: &CalculatorSession, command: CalculatorCommand) -> CalculatorResponse {
    debug!(?command, "apply_command command");
    CalculatorResponse::from(calculator.apply(command))
}
