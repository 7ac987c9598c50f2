//! # tally-core: Pure Logic for the Tally Desk Tools
//!
//! This crate holds the two engines behind Tally: a four-function calculator
//! and a bill generator. Everything here is a pure function of its inputs;
//! hosts own the clock, the id source, the screen and the printer.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host (apps/desktop)                          │   │
//! │  │    Shell ──► Commands ──► Session state ──► Print sink          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │calculator │  │   bill    │  │  invoice  │  │ validation│  │   │
//! │  │   │  State    │  │ Document  │  │ Snapshot  │  │   gate    │  │   │
//! │  │   │  Command  │  │  Totals   │  │  Layout   │  │  parsers  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO GLOBAL STATE • PURE TRANSITIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] - Calculator state machine and key parsing
//! - [`bill`] - Draft bill, item edits and totals
//! - [`invoice`] - Finalized bill snapshot and print layout
//! - [`validation`] - Finalization rules and lenient form parsers
//! - [`notification`] - Toast messages for bill actions
//! - [`money`] - Integer-cent money and currency formatting
//! - [`types`] - Small shared value types (TaxRate, Operator, Digit)
//! - [`ids`] - Pluggable item id generators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tally_core::bill::{BillDocument, ItemUpdate};
//! use tally_core::ids::SequentialIdGenerator;
//! use tally_core::{Money, STANDARD_TAX_RATE};
//!
//! let ids = SequentialIdGenerator::new();
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//!
//! let bill = BillDocument::new(date, Some(STANDARD_TAX_RATE))
//!     .set_customer_name("Acme Corp")
//!     .add_item(&ids)
//!     .update_item("1", ItemUpdate::Description("Widget".into()))
//!     .update_item("1", ItemUpdate::Price(Money::from_cents(1000)));
//!
//! // $10.00 + 10% tax
//! assert_eq!(bill.total().cents(), 1100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod calculator;
pub mod error;
pub mod ids;
pub mod invoice;
pub mod money;
pub mod notification;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill::{BillDocument, BillItem, BillTotals, ItemUpdate};
pub use calculator::{CalculatorCommand, CalculatorState};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{Invoice, InvoiceLine, Letterhead};
pub use money::{CurrencyFormat, Money};
pub use notification::{Notification, NotificationLevel};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The tax applied to bills unless the host turns it off: 10%.
pub const STANDARD_TAX_RATE: TaxRate = TaxRate::from_bps(1000);
