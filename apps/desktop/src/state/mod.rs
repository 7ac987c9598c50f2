//! # State Module
//!
//! Manages application state for the desktop host.
//!
//! One state type per concern, so each command takes exactly the state it
//! needs:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────────┐ ┌──────────────┐ ┌──────────────────┐            │
//! │  │CalculatorSession │ │ BillSession  │ │   ConfigState    │            │
//! │  │                  │ │              │ │                  │            │
//! │  │  Arc<Mutex<      │ │  Arc<Mutex<  │ │  letterhead      │            │
//! │  │  CalculatorState │ │  draft +     │ │  currency        │            │
//! │  │  >>              │ │  preview >>  │ │  tax_rate        │            │
//! │  └──────────────────┘ └──────────────┘ └──────────────────┘            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Sessions: Arc<Mutex<T>>, one transition per lock                    │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod bill;
mod calculator;
mod clock;
mod config;

pub use bill::{BillSession, BillWorkspace};
pub use calculator::CalculatorSession;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ConfigState;
