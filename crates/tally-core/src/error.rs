//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Malformed commands from the input layer        │
//! │  └── ValidationError  - Bill finalization failures                     │
//! │                                                                         │
//! │  Host errors (in app)                                                  │
//! │  └── ApiError         - What frontend sees (serialized)                │
//! │                                                                         │
//! │  Flow: CoreError → ApiError, ValidationError → Notification            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! - Division by zero in the calculator: shown as `Infinity` / `NaN`
//! - Unparseable quantity or price input: falls back to zero
//! - Updating or removing an unknown line item: no-op

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised when a command cannot be interpreted.
///
/// The engines themselves never fail on a well-formed command; these
/// variants cover input that does not map onto one.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A calculator digit outside `0-9`.
    #[error("Invalid digit: {0:?}")]
    InvalidDigit(char),

    /// An operator symbol that is not one of `+ - * /`.
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    /// A keypad label with no calculator command behind it.
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    /// A bill item field name that does not exist.
    #[error("Unknown item field: {0}")]
    UnknownField(String),

    /// A bill date that is not `YYYY-MM-DD`.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Reasons a bill cannot be finalized.
///
/// All variants are recoverable: the draft is left untouched so the user can
/// correct it and try again. Each one maps to its own warning notification
/// (see [`crate::notification`]).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationError {
    /// The bill has no line items.
    #[error("Bill has no items")]
    NoItems,

    /// The customer name is empty.
    #[error("Customer name is required")]
    MissingCustomerName,

    /// One or more items lack a description, or have a non-positive
    /// quantity or price.
    #[error("{} item(s) are missing a description, quantity, or price", item_ids.len())]
    #[serde(rename_all = "camelCase")]
    InvalidItem { item_ids: Vec<String> },
}

impl ValidationError {
    /// Stable, machine-readable name of the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::NoItems => "NoItems",
            ValidationError::MissingCustomerName => "MissingCustomerName",
            ValidationError::InvalidItem { .. } => "InvalidItem",
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
