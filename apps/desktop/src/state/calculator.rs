//! # Calculator Session
//!
//! Holds the one calculator the user is typing into.
//!
//! ## Key Press Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Calculator Session                                   │
//! │                                                                         │
//! │  Keypad           Command               Session change                  │
//! │  ──────           ───────               ──────────────                  │
//! │                                                                         │
//! │  Press "7" ──────► press_key("7") ─────► state = state.apply(Digit 7)  │
//! │                                                                         │
//! │  Press "C" ──────► press_key("C") ─────► state = state.apply(Clear)    │
//! │                                                                         │
//! │  Render ─────────► get_calculator() ──► (read only)                    │
//! │                                                                         │
//! │  NOTE: The state is replaced wholesale under the lock; a transition     │
//! │        never leaves it half-updated.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tally_core::{CalculatorCommand, CalculatorState};

/// Host-managed calculator state.
///
/// `Arc<Mutex<_>>` so handlers can share it across threads; every command
/// holds the lock for one transition only.
#[derive(Debug, Clone, Default)]
pub struct CalculatorSession {
    state: Arc<Mutex<CalculatorState>>,
}

impl CalculatorSession {
    /// Creates a session showing `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the calculator.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CalculatorState) -> R,
    {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Applies one command and returns a copy of the resulting state.
    pub fn apply(&self, command: CalculatorCommand) -> CalculatorState {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let next = state.clone().apply(command);
        *state = next.clone();
        next
    }
}
