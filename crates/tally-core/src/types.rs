//! # Domain Types
//!
//! Small value types shared by the calculator and the bill engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    Operator     │   │     Digit       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Add  (+)       │   │  '0'..='9'      │       │
//! │  │  1000 = 10%     │   │  Subtract (-)   │   │                 │       │
//! │  └─────────────────┘   │  Multiply (*)   │   └─────────────────┘       │
//! │                        │  Divide (/)     │                              │
//! │  ┌─────────────────┐   └─────────────────┘                              │
//! │  │   ItemField     │                                                    │
//! │  │  description    │                                                    │
//! │  │  quantity       │                                                    │
//! │  │  price          │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (the standard bill tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Shows the rate as a percentage without trailing zeros: `10%`, `8.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        if fraction == 0 {
            write!(f, "{whole}%")
        } else if fraction % 10 == 0 {
            write!(f, "{whole}.{}%", fraction / 10)
        } else {
            write!(f, "{whole}.{fraction:02}%")
        }
    }
}

// =============================================================================
// Operator
// =============================================================================

/// One of the four calculator operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    /// Applies the operator with plain IEEE-754 semantics.
    ///
    /// Division by zero is not trapped: `6 / 0` is `inf`, `0 / 0` is `NaN`.
    #[inline]
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        }
    }

    /// ASCII symbol of the operator.
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Accepts the ASCII symbols and the keypad glyphs `× ÷ −`.
impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" | "−" => Ok(Operator::Subtract),
            "*" | "×" | "x" => Ok(Operator::Multiply),
            "/" | "÷" => Ok(Operator::Divide),
            other => Err(CoreError::InvalidOperator(other.to_string())),
        }
    }
}

// =============================================================================
// Digit
// =============================================================================

/// A single decimal digit typed on the calculator keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Digit(char);

impl Digit {
    /// Creates a digit, rejecting anything outside `0-9`.
    pub fn new(c: char) -> Result<Self, CoreError> {
        if c.is_ascii_digit() {
            Ok(Digit(c))
        } else {
            Err(CoreError::InvalidDigit(c))
        }
    }

    #[inline]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Digit {
    type Error = CoreError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Digit::new(c)
    }
}

impl From<Digit> for char {
    fn from(digit: Digit) -> char {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Item Field
// =============================================================================

/// Editable fields of a bill line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    /// Free-text label. The older form called this field `name`.
    Description,
    Quantity,
    Price,
}

impl FromStr for ItemField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "description" | "name" | "desc" => Ok(ItemField::Description),
            "quantity" | "qty" => Ok(ItemField::Quantity),
            "price" => Ok(ItemField::Price),
            other => Err(CoreError::UnknownField(other.to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!(!rate.is_zero());
        assert!(TaxRate::from_bps(0).is_zero());
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
        assert_eq!(TaxRate::from_percentage(10.0).bps(), 1000);
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_bps(1000).to_string(), "10%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
        assert_eq!(TaxRate::from_bps(750).to_string(), "7.5%");
        assert_eq!(TaxRate::from_bps(5).to_string(), "0.05%");
    }

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Add.apply(7.0, 3.0), 10.0);
        assert_eq!(Operator::Subtract.apply(7.0, 3.0), 4.0);
        assert_eq!(Operator::Multiply.apply(7.0, 3.0), 21.0);
        assert_eq!(Operator::Divide.apply(6.0, 3.0), 2.0);
        assert!(Operator::Divide.apply(6.0, 0.0).is_infinite());
        assert!(Operator::Divide.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_operator_parse() {
        assert_eq!("+".parse::<Operator>().unwrap(), Operator::Add);
        assert_eq!("−".parse::<Operator>().unwrap(), Operator::Subtract);
        assert_eq!("×".parse::<Operator>().unwrap(), Operator::Multiply);
        assert_eq!("÷".parse::<Operator>().unwrap(), Operator::Divide);
        assert!("%".parse::<Operator>().is_err());
    }

    #[test]
    fn test_operator_serde_uses_symbols() {
        let json = serde_json::to_string(&Operator::Multiply).unwrap();
        assert_eq!(json, "\"*\"");
        let op: Operator = serde_json::from_str("\"/\"").unwrap();
        assert_eq!(op, Operator::Divide);
    }

    #[test]
    fn test_digit() {
        assert_eq!(Digit::new('7').unwrap().as_char(), '7');
        assert!(Digit::new('a').is_err());
        assert!(serde_json::from_str::<Digit>("\"x\"").is_err());
        assert_eq!(serde_json::from_str::<Digit>("\"4\"").unwrap().as_char(), '4');
    }

    #[test]
    fn test_item_field_parse() {
        assert_eq!("name".parse::<ItemField>().unwrap(), ItemField::Description);
        assert_eq!("QTY".parse::<ItemField>().unwrap(), ItemField::Quantity);
        assert_eq!("price".parse::<ItemField>().unwrap(), ItemField::Price);
        assert!("colour".parse::<ItemField>().is_err());
    }
}
