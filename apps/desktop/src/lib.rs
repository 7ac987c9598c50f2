//! # Tally Desktop Library
//!
//! Core library for the Tally desktop host.
//! This is the main entry point that configures and runs the shell.
//!
//! ## Module Organization
//! ```text
//! tally_desktop_lib/
//! ├── lib.rs            ◄─── You are here (setup & run)
//! ├── state/
//! │   ├── mod.rs        ◄─── State type exports
//! │   ├── calculator.rs ◄─── Calculator session
//! │   ├── bill.rs       ◄─── Draft bill + invoice preview
//! │   ├── clock.rs      ◄─── Host clock
//! │   └── config.rs     ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs        ◄─── Command exports
//! │   ├── calculator.rs ◄─── Keypad commands
//! │   ├── bill.rs       ◄─── Bill form commands
//! │   └── config.rs     ◄─── Configuration commands
//! ├── shell.rs          ◄─── Line-oriented front end
//! ├── print.rs          ◄─── Print hand-off
//! └── error.rs          ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod print;
pub mod shell;
pub mod state;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use print::StdoutPrinter;
use shell::Shell;
use state::ConfigState;

/// Runs the host on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: INFO, DEBUG for tally crates; override with RUST_LOG     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • TALLY_* environment variables over defaults                       │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • CalculatorSession: showing 0                                      │
/// │     • BillSession: empty bill dated today                               │
/// │                                                                         │
/// │  4. Run the Shell ────────────────────────────────────────────────────► │
/// │     • One command per line until `quit` or end of input                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> io::Result<()> {
    init_tracing();

    info!("Starting Tally Desktop");

    let config = ConfigState::from_env();
    info!(
        company = %config.letterhead.company_name,
        tax_rate = ?config.tax_rate.map(|rate| rate.to_string()),
        "Configuration loaded"
    );

    let shell = Shell::new(config, Box::new(StdoutPrinter));
    shell.run(io::stdin().lock(), io::stdout().lock())?;

    info!("Tally Desktop stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally=trace` - Show trace for tally crates only
/// - Default: INFO, DEBUG for tally crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tally=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
