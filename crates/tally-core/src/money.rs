//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A bill with 3 × $0.10 would print a subtotal of $0.30000000000000004  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3 × 10 cents = 30 cents, exactly                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices arrive from form fields as decimal text. [`Money::parse_decimal`]
//! converts that text straight to cents without going through `f64`.
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::parse_decimal("10.99").unwrap();
//! assert_eq!(price.cents(), 1099);
//!
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.to_string(), "$21.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: the input layer accepts negative prices; they are only
///   rejected when the bill is finalized
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating arithmetic**: form fields accept any quantity and price, so
///   line totals and sums clamp at the `i64` range instead of overflowing
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  BillItem.unit_price ──► BillItem.line_total ──► BillDocument.subtotal │
/// │                                                         │               │
/// │                                          Tax ◄──────────┤               │
/// │                                                         ▼               │
/// │                                                 BillDocument.total     │
/// │                                                                         │
/// │  Every amount is printed through CurrencyFormat on the invoice         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal amount such as `"10.99"`, `"-3"` or `".5"`.
    ///
    /// ## Rounding
    /// Digits past the cent are rounded **half-up** (away from zero), looking
    /// only at the exact decimal text:
    ///
    /// | Input      | Cents  |
    /// |------------|--------|
    /// | `"25.005"` | 2501   |
    /// | `"25.004"` | 2500   |
    /// | `"-1.005"` | -101   |
    ///
    /// Returns `None` for anything that is not a plain decimal number
    /// (empty, letters, several dots, exponent notation) or that overflows.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("25.005"), Some(Money::from_cents(2501)));
    /// assert_eq!(Money::parse_decimal("abc"), None);
    /// ```
    pub fn parse_decimal(input: &str) -> Option<Money> {
        let text = input.trim();
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let mut cents: i64 = 0;
        for digit in whole.bytes() {
            cents = cents.checked_mul(10)?.checked_add(i64::from(digit - b'0'))?;
        }
        cents = cents.checked_mul(100)?;

        let mut fraction_digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = fraction_digits.next().unwrap_or(0);
        let hundredths = fraction_digits.next().unwrap_or(0);
        cents = cents.checked_add(tenths * 10 + hundredths)?;

        // Only the first dropped digit decides half-up rounding.
        if fraction_digits.next().is_some_and(|d| d >= 5) {
            cents = cents.checked_add(1)?;
        }

        Some(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax, rounding half-up to the cent.
    ///
    /// ## Implementation
    /// Integer math on the magnitude: `(|amount| * bps + 5000) / 10000`,
    /// then the sign is restored, so `-$0.125` rounds to `-$0.13` the same
    /// way `$0.125` rounds to `$0.13`.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(2500); // $25.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1000)); // 10%
    /// assert_eq!(tax.cents(), 250);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large subtotals from overflowing before the division
        let magnitude = (self.0.unsigned_abs() as i128 * rate.bps() as i128 + 5000) / 10000;
        let tax_cents = i64::try_from(magnitude).unwrap_or(i64::MAX);
        Money::from_cents(if self.0 < 0 {
            tax_cents.saturating_neg()
        } else {
            tax_cents
        })
    }

    /// Multiplies money by a quantity, clamping at the `i64` range.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    ///
    /// let huge = Money::from_cents(9_999_999_900).multiply_quantity(i64::MAX);
    /// assert_eq!(huge.cents(), i64::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Currency Formatting
// =============================================================================

/// How amounts are written on the invoice.
///
/// Amounts always carry two decimals; the symbol is configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CurrencyFormat {
    pub symbol: String,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
        }
    }

    /// Formats an amount, e.g. `$1234.50` or `-$5.50`.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::{CurrencyFormat, Money};
    ///
    /// let eur = CurrencyFormat::new("€");
    /// assert_eq!(eur.format(Money::from_cents(-550)), "-€5.50");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::new("$")
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the default `$` currency format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&CurrencyFormat::default().format(*self))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating addition; see [`Money`].
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
