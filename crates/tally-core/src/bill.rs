//! # Bill Module
//!
//! The draft bill: line items being edited, plus the totals derived from them.
//!
//! ## Bill Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ Editing  │────►│ Validate │────►│ Invoice  │       │
//! │  │  Draft   │     │          │     │          │     │ Preview  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_item          finalize()                         │
//! │                   update_item       (fails → draft unchanged)          │
//! │                   remove_item                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   cleared() ───────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Like the calculator, every edit consumes the document and returns the
//! next one. Totals are never stored; they are recomputed from the items.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::ids::IdGenerator;
use crate::invoice::Invoice;
use crate::money::Money;
use crate::types::{ItemField, TaxRate};
use crate::validation::{self, parse_price_input, parse_quantity_input};

// =============================================================================
// Bill Item
// =============================================================================

/// One row of the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillItem {
    /// Opaque id, unique within the bill.
    pub id: String,

    /// Free-text label printed on the invoice.
    pub description: String,

    /// Units billed. The draft accepts any value; finalization needs ≥ 1.
    pub quantity: i64,

    /// Price of one unit. The draft accepts any value; finalization needs > 0.
    pub unit_price: Money,
}

impl BillItem {
    /// A blank row: no description, quantity 1, price 0.
    pub fn blank(id: impl Into<String>) -> Self {
        BillItem {
            id: id.into(),
            description: String::new(),
            quantity: 1,
            unit_price: Money::zero(),
        }
    }

    /// Quantity × unit price.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Item Update
// =============================================================================

/// A new value for one field of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ItemUpdate {
    Description(String),
    Quantity(i64),
    Price(Money),
}

impl ItemUpdate {
    /// Builds an update from raw form text.
    ///
    /// Numbers are parsed leniently; text that is not a number becomes 0
    /// rather than an error.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::bill::ItemUpdate;
    /// use tally_core::money::Money;
    /// use tally_core::types::ItemField;
    ///
    /// assert_eq!(
    ///     ItemUpdate::from_input(ItemField::Price, "4.50"),
    ///     ItemUpdate::Price(Money::from_cents(450))
    /// );
    /// assert_eq!(
    ///     ItemUpdate::from_input(ItemField::Quantity, "lots"),
    ///     ItemUpdate::Quantity(0)
    /// );
    /// ```
    pub fn from_input(field: ItemField, raw: &str) -> Self {
        match field {
            ItemField::Description => ItemUpdate::Description(raw.to_string()),
            ItemField::Quantity => ItemUpdate::Quantity(parse_quantity_input(raw)),
            ItemField::Price => ItemUpdate::Price(parse_price_input(raw)),
        }
    }

    /// The field this update targets.
    pub fn field(&self) -> ItemField {
        match self {
            ItemUpdate::Description(_) => ItemField::Description,
            ItemUpdate::Quantity(_) => ItemField::Quantity,
            ItemUpdate::Price(_) => ItemField::Price,
        }
    }

    fn apply_to(self, item: &mut BillItem) {
        match self {
            ItemUpdate::Description(description) => item.description = description,
            ItemUpdate::Quantity(quantity) => item.quantity = quantity,
            ItemUpdate::Price(price) => item.unit_price = price,
        }
    }
}

// =============================================================================
// Bill Document
// =============================================================================

/// The bill being edited.
///
/// ## Invariants
/// - Item ids are unique (guaranteed by the [`IdGenerator`] passed to
///   [`add_item`](BillDocument::add_item))
/// - Item order is insertion order; it only affects display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillDocument {
    /// Who the bill is for (customer or company).
    pub customer_name: String,

    /// Bill date, `YYYY-MM-DD` on the wire.
    #[ts(as = "String")]
    pub date: NaiveDate,

    pub items: Vec<BillItem>,

    /// `None` for bills without a tax line.
    pub tax_rate: Option<TaxRate>,

    /// Bill number typed by the user; generated at finalization when unset.
    #[serde(default)]
    pub bill_number: Option<String>,

    /// Seller name for this bill only; the letterhead's name when unset.
    #[serde(default)]
    pub company_name: Option<String>,
}

impl BillDocument {
    /// An empty bill dated `date`.
    pub fn new(date: NaiveDate, tax_rate: Option<TaxRate>) -> Self {
        BillDocument {
            customer_name: String::new(),
            date,
            items: Vec::new(),
            tax_rate,
            bill_number: None,
            company_name: None,
        }
    }

    pub fn set_customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }

    /// Overrides the bill number. Blank text goes back to a generated one.
    pub fn set_bill_number(mut self, number: &str) -> Self {
        self.bill_number = non_blank(number);
        self
    }

    /// Overrides the seller name. Blank text goes back to the letterhead.
    pub fn set_company_name(mut self, name: &str) -> Self {
        self.company_name = non_blank(name);
        self
    }

    pub fn set_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Appends a blank item with a fresh id.
    pub fn add_item(mut self, ids: &dyn IdGenerator) -> Self {
        self.items.push(BillItem::blank(ids.next_id()));
        self
    }

    /// Changes one field of the item with `id`. Unknown ids are ignored.
    pub fn update_item(mut self, id: &str, update: ItemUpdate) -> Self {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            update.apply_to(item);
        }
        self
    }

    /// Removes the item with `id`. Unknown ids are ignored.
    pub fn remove_item(mut self, id: &str) -> Self {
        self.items.retain(|item| item.id != id);
        self
    }

    /// Empties the form: no customer, no items, dated `today`. The tax
    /// policy is kept.
    pub fn cleared(self, today: NaiveDate) -> Self {
        BillDocument::new(today, self.tax_rate)
    }

    pub fn item(&self, id: &str) -> Option<&BillItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ quantity × unit price.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(BillItem::line_total).sum()
    }

    /// Tax on the subtotal; zero for bills without a tax rate.
    pub fn tax(&self) -> Money {
        self.tax_rate
            .map(|rate| self.subtotal().calculate_tax(rate))
            .unwrap_or_default()
    }

    /// Subtotal plus tax.
    pub fn total(&self) -> Money {
        self.subtotal() + self.tax()
    }

    /// All derived amounts at once.
    pub fn totals(&self) -> BillTotals {
        BillTotals::from(self)
    }

    /// Checks the bill and freezes it into an invoice issued at `issued_at`.
    ///
    /// On failure nothing changes; the caller keeps editing the same draft.
    pub fn finalize(&self, issued_at: DateTime<Utc>) -> Result<Invoice, ValidationError> {
        validation::validate_for_finalization(&self.customer_name, &self.items)?;
        Ok(Invoice::from_document(self, issued_at))
    }
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

// =============================================================================
// Totals
// =============================================================================

/// Totals summary for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillTotals {
    pub item_count: usize,
    pub subtotal: Money,
    pub tax_rate: Option<TaxRate>,
    pub tax: Money,
    pub total: Money,
}

impl From<&BillDocument> for BillTotals {
    fn from(bill: &BillDocument) -> Self {
        BillTotals {
            item_count: bill.items.len(),
            subtotal: bill.subtotal(),
            tax_rate: bill.tax_rate,
            tax: bill.tax(),
            total: bill.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;
    use crate::STANDARD_TAX_RATE;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn sample_bill(tax_rate: Option<TaxRate>) -> BillDocument {
        let ids = SequentialIdGenerator::new();
        BillDocument::new(date(), tax_rate)
            .set_customer_name("Acme Corp")
            .add_item(&ids)
            .update_item("1", ItemUpdate::Description("Widget".to_string()))
            .update_item("1", ItemUpdate::Quantity(2))
            .update_item("1", ItemUpdate::Price(Money::from_cents(1000)))
            .add_item(&ids)
            .update_item("2", ItemUpdate::Description("Gadget".to_string()))
            .update_item("2", ItemUpdate::Price(Money::from_cents(500)))
    }

    #[test]
    fn test_add_item_appends_blank_row() {
        let ids = SequentialIdGenerator::new();
        let bill = BillDocument::new(date(), None).add_item(&ids).add_item(&ids);

        assert_eq!(bill.items.len(), 2);
        assert_eq!(bill.items[0], BillItem::blank("1"));
        assert_eq!(bill.items[1].id, "2");
        assert_eq!(bill.items[1].quantity, 1);
        assert!(bill.items[1].unit_price.is_zero());
    }

    #[test]
    fn test_update_item_changes_one_field() {
        let bill = sample_bill(None);
        let widget = bill.item("1").unwrap();
        assert_eq!(widget.description, "Widget");
        assert_eq!(widget.quantity, 2);
        assert_eq!(widget.unit_price.cents(), 1000);
    }

    #[test]
    fn test_update_unknown_item_is_noop() {
        let bill = sample_bill(None);
        let updated = bill.clone().update_item("nope", ItemUpdate::Quantity(9));
        assert_eq!(bill, updated);
    }

    #[test]
    fn test_remove_item() {
        let bill = sample_bill(None).remove_item("1");
        assert_eq!(bill.items.len(), 1);
        assert_eq!(bill.items[0].id, "2");
    }

    #[test]
    fn test_remove_unknown_item_is_noop() {
        let bill = sample_bill(None);
        let updated = bill.clone().remove_item("nope");
        assert_eq!(bill, updated);
    }

    #[test]
    fn test_subtotal_without_tax() {
        let bill = sample_bill(None);
        assert_eq!(bill.subtotal().cents(), 2500);
        assert!(bill.tax().is_zero());
        assert_eq!(bill.total().cents(), 2500);
    }

    #[test]
    fn test_total_with_standard_tax() {
        let bill = sample_bill(Some(STANDARD_TAX_RATE));
        assert_eq!(bill.subtotal().cents(), 2500);
        assert_eq!(bill.tax().cents(), 250);
        assert_eq!(bill.total().cents(), 2750);

        let totals = bill.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total.to_string(), "$27.50");
    }

    #[test]
    fn test_negative_entries_count_while_editing() {
        let bill = sample_bill(None).update_item("2", ItemUpdate::Quantity(-1));
        assert_eq!(bill.subtotal().cents(), 1500);
    }

    #[test]
    fn test_extreme_inputs_clamp_totals() {
        let bill = sample_bill(Some(STANDARD_TAX_RATE))
            .update_item("1", ItemUpdate::from_input(ItemField::Quantity, "1000000000"))
            .update_item("1", ItemUpdate::from_input(ItemField::Price, "99999999"));

        assert_eq!(bill.items[0].line_total().cents(), i64::MAX);
        assert_eq!(bill.subtotal().cents(), i64::MAX);
        assert_eq!(bill.total().cents(), i64::MAX);

        let totals = bill.totals();
        assert!(totals.tax.is_positive());
    }

    #[test]
    fn test_item_update_from_input() {
        assert_eq!(
            ItemUpdate::from_input(ItemField::Description, "Consulting"),
            ItemUpdate::Description("Consulting".to_string())
        );
        assert_eq!(
            ItemUpdate::from_input(ItemField::Quantity, "3"),
            ItemUpdate::Quantity(3)
        );
        assert_eq!(
            ItemUpdate::from_input(ItemField::Price, "nope"),
            ItemUpdate::Price(Money::zero())
        );
        assert_eq!(
            ItemUpdate::from_input(ItemField::Price, "1.5").field(),
            ItemField::Price
        );
    }

    #[test]
    fn test_cleared_keeps_tax_policy() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let bill = sample_bill(Some(STANDARD_TAX_RATE)).cleared(today);

        assert!(bill.is_empty());
        assert!(bill.customer_name.is_empty());
        assert_eq!(bill.date, today);
        assert_eq!(bill.tax_rate, Some(STANDARD_TAX_RATE));
    }

    #[test]
    fn test_finalize_failure_leaves_draft_alone() {
        let bill = sample_bill(None).set_customer_name("");
        let before = bill.clone();

        let err = bill.finalize(Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::MissingCustomerName);
        assert_eq!(bill, before);
    }

    #[test]
    fn test_bill_number_and_company_overrides() {
        let bill = sample_bill(None)
            .set_bill_number("  BL-4821 ")
            .set_company_name("Corner Store");
        assert_eq!(bill.bill_number.as_deref(), Some("BL-4821"));
        assert_eq!(bill.company_name.as_deref(), Some("Corner Store"));

        let reset = bill.set_bill_number("   ").set_company_name("");
        assert_eq!(reset.bill_number, None);
        assert_eq!(reset.company_name, None);
    }

    #[test]
    fn test_finalize_builds_invoice() {
        let bill = sample_bill(Some(STANDARD_TAX_RATE));
        let invoice = bill.finalize(Utc::now()).unwrap();

        assert_eq!(invoice.customer_name, "Acme Corp");
        assert_eq!(invoice.lines.len(), 2);
        assert_eq!(invoice.total.cents(), 2750);
    }

    #[test]
    fn test_bill_json_shape() {
        let json = serde_json::to_value(sample_bill(Some(STANDARD_TAX_RATE))).unwrap();
        assert_eq!(json["customerName"], "Acme Corp");
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["taxRate"], 1000);
        assert_eq!(json["items"][0]["unitPrice"], 1000);
    }

    #[test]
    fn test_item_update_json_shape() {
        let update: ItemUpdate =
            serde_json::from_str(r#"{ "field": "quantity", "value": 4 }"#).unwrap();
        assert_eq!(update, ItemUpdate::Quantity(4));
    }
}
