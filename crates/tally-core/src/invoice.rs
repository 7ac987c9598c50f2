//! # Invoice Module
//!
//! The finalized, read-only snapshot of a bill and its print layout.
//!
//! ## Snapshot Pattern
//! An [`Invoice`] copies every line out of the draft at the moment the bill
//! is generated. Editing the draft afterwards does not change an invoice
//! that is already being previewed or printed.
//!
//! ## Print Layout
//! ```text
//! INVOICE                                        Your Company Name
//! Bill #BILL-482913                            123 Business Street
//!                                                 City, State, ZIP
//!                                          contact@yourcompany.com
//!
//! Bill To:                                                   Date:
//! Acme Corp                                              3/15/2024
//! ----------------------------------------------------------------
//! Item                           Qty         Price          Amount
//! ----------------------------------------------------------------
//! Widget                           2        $10.00          $20.00
//! Gadget                           1         $5.00           $5.00
//! ----------------------------------------------------------------
//!                                        Subtotal:          $25.00
//!                                       Tax (10%):           $2.50
//!                                           Total:          $27.50
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use ts_rs::TS;

use crate::bill::{BillDocument, BillItem};
use crate::money::{CurrencyFormat, Money};
use crate::types::TaxRate;

/// Prefix of every bill number.
pub const BILL_NUMBER_PREFIX: &str = "BILL-";

/// Width of the plain-text print layout, in characters.
pub const PRINT_WIDTH: usize = 64;

/// Width of the item column in the line table.
const ITEM_COLUMN_WIDTH: usize = 28;

// =============================================================================
// Invoice
// =============================================================================

/// One printed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub amount: Money,
}

impl From<&BillItem> for InvoiceLine {
    fn from(item: &BillItem) -> Self {
        InvoiceLine {
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            amount: item.line_total(),
        }
    }
}

/// A finalized bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    pub bill_number: String,
    /// Seller name chosen on the bill, printed instead of the letterhead's.
    pub company_name: Option<String>,
    pub customer_name: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Money,
    pub tax_rate: Option<TaxRate>,
    pub tax: Money,
    pub total: Money,
}

impl Invoice {
    /// Snapshots `bill` as issued at `issued_at`.
    ///
    /// Does not validate; [`BillDocument::finalize`] is the checked entry
    /// point.
    pub fn from_document(bill: &BillDocument, issued_at: DateTime<Utc>) -> Self {
        Invoice {
            bill_number: bill
                .bill_number
                .clone()
                .unwrap_or_else(|| bill_number_for(issued_at)),
            company_name: bill.company_name.clone(),
            customer_name: bill.customer_name.trim().to_string(),
            date: bill.date,
            issued_at,
            lines: bill.items.iter().map(InvoiceLine::from).collect(),
            subtotal: bill.subtotal(),
            tax_rate: bill.tax_rate,
            tax: bill.tax(),
            total: bill.total(),
        }
    }

    /// Renders the print-friendly text layout.
    pub fn render_text(&self, letterhead: &Letterhead, currency: &CurrencyFormat) -> String {
        let mut out = String::new();
        let rule = "-".repeat(PRINT_WIDTH);

        // Header: title and bill number on the left, seller block on the right.
        let company_name = self
            .company_name
            .as_deref()
            .unwrap_or(&letterhead.company_name);
        let mut seller = vec![company_name];
        seller.extend(letterhead.address_lines.iter().map(String::as_str));
        seller.extend(letterhead.contact_email.as_deref());

        let bill_ref = format!("Bill #{}", self.bill_number);
        let left = ["INVOICE", bill_ref.as_str()];
        for row in 0..seller.len().max(left.len()) {
            push_columns(
                &mut out,
                left.get(row).copied().unwrap_or(""),
                seller.get(row).copied().unwrap_or(""),
            );
        }
        out.push('\n');

        push_columns(&mut out, "Bill To:", "Date:");
        push_columns(
            &mut out,
            &self.customer_name,
            &self.date.format("%-m/%-d/%Y").to_string(),
        );

        // Line items.
        let _ = writeln!(out, "{rule}");
        push_row(&mut out, "Item", "Qty", "Price", "Amount");
        let _ = writeln!(out, "{rule}");
        for line in &self.lines {
            push_row(
                &mut out,
                &line.description,
                &line.quantity.to_string(),
                &currency.format(line.unit_price),
                &currency.format(line.amount),
            );
        }
        let _ = writeln!(out, "{rule}");

        // Totals. The tax line only appears when a rate applies.
        push_total(&mut out, "Subtotal:", &currency.format(self.subtotal));
        if let Some(rate) = self.tax_rate {
            push_total(&mut out, &format!("Tax ({rate}):"), &currency.format(self.tax));
        }
        push_total(&mut out, "Total:", &currency.format(self.total));

        if let Some(notes) = &letterhead.notes {
            let _ = write!(out, "\nNotes:\n{notes}\n");
        }
        if let Some(footer) = &letterhead.footer {
            let _ = write!(out, "\n{footer}\n");
        }

        out
    }
}

/// `BILL-` followed by the last six digits of the epoch milliseconds.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use tally_core::invoice::bill_number_for;
///
/// let issued_at = Utc.timestamp_millis_opt(1_710_504_123_456).unwrap();
/// assert_eq!(bill_number_for(issued_at), "BILL-123456");
/// ```
pub fn bill_number_for(issued_at: DateTime<Utc>) -> String {
    let last_six = issued_at.timestamp_millis().rem_euclid(1_000_000);
    format!("{BILL_NUMBER_PREFIX}{last_six:06}")
}

fn push_columns(out: &mut String, left: &str, right: &str) {
    let pad = PRINT_WIDTH.saturating_sub(left.chars().count() + right.chars().count());
    let _ = writeln!(out, "{left}{:pad$}{right}", "");
}

/// Writes one table row. An item text wider than its column wraps onto
/// continuation lines below the row.
fn push_row(out: &mut String, item: &str, qty: &str, price: &str, amount: &str) {
    let mut wrapped = wrap_words(item, ITEM_COLUMN_WIDTH).into_iter();
    let first = wrapped.next().unwrap_or_default();
    let _ = writeln!(out, "{first:<28} {qty:>5} {price:>13} {amount:>15}");
    for continuation in wrapped {
        let _ = writeln!(out, "{continuation}");
    }
}

/// Splits text into lines of at most `width` characters, breaking between
/// words. A word longer than `width` is split across lines.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut rest = word;
        while !rest.is_empty() {
            let needed = rest.chars().count() + usize::from(!current.is_empty());
            if current.chars().count() + needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(rest);
                break;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            let split = rest.char_indices().nth(width).map_or(rest.len(), |(i, _)| i);
            lines.push(rest[..split].to_string());
            rest = &rest[split..];
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn push_total(out: &mut String, label: &str, amount: &str) {
    let _ = writeln!(out, "{label:>48}{amount:>16}");
}

// =============================================================================
// Letterhead
// =============================================================================

/// Seller details printed at the top and bottom of every invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Letterhead {
    pub company_name: String,
    pub address_lines: Vec<String>,
    pub contact_email: Option<String>,
    /// Closing notes, e.g. payment terms.
    pub notes: Option<String>,
    pub footer: Option<String>,
}

impl Default for Letterhead {
    fn default() -> Self {
        Letterhead {
            company_name: "Your Company Name".to_string(),
            address_lines: vec![
                "123 Business Street".to_string(),
                "City, State, ZIP".to_string(),
            ],
            contact_email: Some("contact@yourcompany.com".to_string()),
            notes: Some(
                "Thank you for your business! Payment is due within 30 days. \
                 Please make checks payable to Your Company Name or use the \
                 bank details provided."
                    .to_string(),
            ),
            footer: Some("This bill was generated with Simple Bill Generator".to_string()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
