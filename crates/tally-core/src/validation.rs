//! # Validation Module
//!
//! The finalization gate for bills, plus the lenient parsers the input layer
//! uses for form fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form fields (input layer)                                    │
//! │  ├── parse_quantity_input / parse_price_input                          │
//! │  └── Never reject: unparseable text becomes 0                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Draft bill                                                   │
//! │  └── Accepts zero/negative quantities and prices while editing         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Finalization (THIS MODULE)                                   │
//! │  ├── NoItems             - nothing to bill                             │
//! │  ├── MissingCustomerName - nobody to bill                              │
//! │  └── InvalidItem         - description, quantity or price missing      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{parse_price_input, validate_for_finalization};
//! use tally_core::ValidationError;
//!
//! assert_eq!(
//!     validate_for_finalization("Acme", &[]),
//!     Err(ValidationError::NoItems)
//! );
//! assert_eq!(parse_price_input("abc").cents(), 0);
//! ```

use chrono::NaiveDate;

use crate::bill::BillItem;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date format used by date inputs and the bill JSON.
pub const BILL_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Finalization Gate
// =============================================================================

/// Checks that a bill can be finalized.
///
/// ## Rules (checked in this order)
/// 1. At least one item, whatever the customer name
/// 2. A customer name that is not blank
/// 3. Every item valid (see [`is_item_valid`])
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  User clicks "Generate Bill"                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_for_finalization() ← THIS FUNCTION                           │
/// │       │                                                                 │
/// │       ├── no items?      → warning "Missing items"                     │
/// │       ├── no customer?   → warning "Missing information"               │
/// │       ├── bad item rows? → warning "Invalid items"                     │
/// │       │                                                                 │
/// │       └── OK → invoice preview + "Bill generated"                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_for_finalization(customer_name: &str, items: &[BillItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    validate_customer_name(customer_name)?;

    let invalid: Vec<String> = items
        .iter()
        .filter(|item| !is_item_valid(item))
        .map(|item| item.id.clone())
        .collect();

    if !invalid.is_empty() {
        return Err(ValidationError::InvalidItem { item_ids: invalid });
    }

    Ok(())
}

/// Validates the customer (or company) name.
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingCustomerName);
    }

    Ok(())
}

/// An item can be billed when it has a description, a quantity of at least
/// one, and a price above zero.
pub fn is_item_valid(item: &BillItem) -> bool {
    !item.description.trim().is_empty() && item.quantity > 0 && item.unit_price.is_positive()
}

// =============================================================================
// Input Parsers
// =============================================================================

/// Reads a quantity field.
///
/// Takes the leading integer like a browser number field does (`"3.7"` is
/// 3, `"12abc"` is 12); anything without one is 0.
///
/// ## Example
/// ```rust
/// use tally_core::validation::parse_quantity_input;
///
/// assert_eq!(parse_quantity_input("3"), 3);
/// assert_eq!(parse_quantity_input("-2"), -2);
/// assert_eq!(parse_quantity_input(""), 0);
/// ```
pub fn parse_quantity_input(raw: &str) -> i64 {
    let text = raw.trim();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digits_len = text[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();

    text[..sign_len + digits_len].parse().unwrap_or(0)
}

/// Reads a price field. Unparseable text is $0.00.
///
/// See [`Money::parse_decimal`] for the accepted format and rounding.
pub fn parse_price_input(raw: &str) -> Money {
    Money::parse_decimal(raw).unwrap_or_default()
}

/// Reads a bill date in `YYYY-MM-DD` form.
pub fn parse_bill_date(raw: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), BILL_DATE_FORMAT).map_err(|_| CoreError::InvalidDate {
        value: raw.to_string(),
    })
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> bool {
    bps <= 10000
}

// =============================================================================
// Unit Tests
// =============================================================================
