//! # Commands Module
//!
//! All commands the host exposes to its front end (the shell, or a UI).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── calculator.rs  ◄─── Keypad presses
//! ├── bill.rs        ◄─── Bill form, generation, printing
//! └── config.rs      ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Front end                                                              │
//! │  ─────────                                                              │
//! │  bill set 1 price 10.50                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  fn update_bill_item(                                                   │
//! │      bill: &BillSession,     ◄── Only the state it needs               │
//! │      item_id: &str,                                                     │
//! │      field: &str,                                                       │
//! │      raw: &str,                                                         │
//! │  ) -> Result<BillResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Front end receives: BillResponse                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod bill;
pub mod calculator;
pub mod config;
