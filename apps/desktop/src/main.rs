//! # Tally Desktop Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Desktop                                    │
//! │                                                                         │
//! │  stdin ──► shell ──► commands ──► state ──► tally-core                 │
//! │                                                                         │
//! │  stdout ◄── one JSON response per command (and printed invoices)        │
//! │  stderr ◄── logs                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    match tally_desktop_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tally-desktop: {err}");
            ExitCode::FAILURE
        }
    }
}
