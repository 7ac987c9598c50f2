//! # Bill Commands
//!
//! Host commands for the bill form and its invoice preview.
//!
//! ## Bill Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ Editing  │────►│ Preview  │────►│ Printed  │       │
//! │  │  Form    │     │          │     │          │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │  ▲              │                              │
//! │                add_bill_item │      print_bill                          │
//! │             update_bill_item │                                          │
//! │             remove_bill_item └── back_to_edit                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_bill ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::print::PrintSink;
use crate::state::{BillSession, BillWorkspace, ConfigState};
use tally_core::validation::parse_bill_date;
use tally_core::{BillDocument, BillTotals, Invoice, ItemField, ItemUpdate, Notification};

/// Bill response including the draft, its totals and the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResponse {
    pub bill: BillDocument,
    pub totals: BillTotals,
    pub preview: Option<Invoice>,

    /// Toast to show, if the action raised one
    pub notification: Option<Notification>,
}

impl BillResponse {
    fn from_workspace(workspace: &BillWorkspace) -> Self {
        BillResponse {
            bill: workspace.draft.clone(),
            totals: workspace.draft.totals(),
            preview: workspace.preview.clone(),
            notification: None,
        }
    }

    fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }
}

fn current(bill: &BillSession) -> BillResponse {
    bill.with_workspace(BillResponse::from_workspace)
}

/// Gets the current bill, totals and preview.
pub fn get_bill(bill: &BillSession) -> BillResponse {
    debug!("get_bill command");
    current(bill)
}

/// Sets who the bill is for.
pub fn set_customer_name(bill: &BillSession, name: &str) -> BillResponse {
    debug!(name = %name, "set_customer_name command");
    bill.edit(|draft| draft.set_customer_name(name));
    current(bill)
}

/// Sets the bill number printed on the invoice. Blank text restores the
/// generated number.
pub fn set_bill_number(bill: &BillSession, number: &str) -> BillResponse {
    debug!(number = %number, "set_bill_number command");
    bill.edit(|draft| draft.set_bill_number(number));
    current(bill)
}

/// Sets the seller name for this bill. Blank text restores the letterhead's.
pub fn set_company_name(bill: &BillSession, name: &str) -> BillResponse {
    debug!(name = %name, "set_company_name command");
    bill.edit(|draft| draft.set_company_name(name));
    current(bill)
}

/// Sets the bill date from `YYYY-MM-DD` text.
///
/// ## Errors
/// `INVALID_INPUT` if the text is not a real calendar date.
pub fn set_bill_date(bill: &BillSession, raw: &str) -> Result<BillResponse, ApiError> {
    debug!(date = %raw, "set_bill_date command");
    let date = parse_bill_date(raw)?;
    bill.edit(|draft| draft.set_date(date));
    Ok(current(bill))
}

/// Appends a blank line item.
pub fn add_bill_item(bill: &BillSession) -> BillResponse {
    let draft = bill.add_item();
    debug!(
        item_id = ?draft.items.last().map(|item| item.id.as_str()),
        item_count = draft.items.len(),
        "add_bill_item command"
    );
    current(bill)
}

/// Changes one field of a line item from raw form text.
///
/// ## Arguments
/// * `item_id` - Item to edit
/// * `field` - `description`, `quantity` or `price`
/// * `raw` - Field text; numbers that do not parse become 0
///
/// ## Errors
/// - `INVALID_INPUT` for an unknown field name
/// - `NOT_FOUND` for an unknown item id
pub fn update_bill_item(
    bill: &BillSession,
    item_id: &str,
    field: &str,
    raw: &str,
) -> Result<BillResponse, ApiError> {
    debug!(item_id = %item_id, field = %field, value = %raw, "update_bill_item command");

    let field: ItemField = field.parse()?;
    let update = ItemUpdate::from_input(field, raw);

    bill.edit_item(item_id, |draft| draft.update_item(item_id, update))
        .ok_or_else(|| ApiError::not_found("Bill item", item_id))?;
    Ok(current(bill))
}

/// Removes a line item.
///
/// ## Errors
/// `NOT_FOUND` for an unknown item id.
pub fn remove_bill_item(bill: &BillSession, item_id: &str) -> Result<BillResponse, ApiError> {
    debug!(item_id = %item_id, "remove_bill_item command");

    bill.edit_item(item_id, |draft| draft.remove_item(item_id))
        .ok_or_else(|| ApiError::not_found("Bill item", item_id))?;
    Ok(current(bill))
}

/// Empties the form and drops the preview.
pub fn clear_bill(bill: &BillSession) -> BillResponse {
    let draft = bill.clear();
    info!(date = %draft.date, "Bill form cleared");
    current(bill).with_notification(Notification::form_cleared())
}

/// Validates the bill and, if it passes, shows the invoice preview.
///
/// A bill that fails validation is not an error here: the response carries
/// a warning notification and the form is left exactly as it was.
pub fn generate_bill(bill: &BillSession) -> BillResponse {
    debug!("generate_bill command");

    match bill.generate() {
        Ok(invoice) => {
            info!(
                bill_number = %invoice.bill_number,
                customer = %invoice.customer_name,
                total_cents = invoice.total.cents(),
                "Bill generated"
            );
            current(bill).with_notification(Notification::bill_generated())
        }
        Err(err) => {
            warn!(reason = err.kind(), error = %err, "Bill failed validation");
            current(bill).with_notification(Notification::from(&err))
        }
    }
}

/// Leaves the preview and returns to the form.
pub fn back_to_edit(bill: &BillSession) -> BillResponse {
    debug!("back_to_edit command");
    bill.back_to_edit();
    current(bill)
}

/// Renders the preview and hands it to the printer.
///
/// ## Errors
/// - `NOT_FOUND` if no bill has been generated
/// - `PRINT_ERROR` if the printer fails
pub fn print_bill(
    bill: &BillSession,
    config: &ConfigState,
    printer: &dyn PrintSink,
) -> Result<BillResponse, ApiError> {
    debug!("print_bill command");

    let invoice = bill
        .preview()
        .ok_or_else(|| ApiError::not_found("Invoice preview", "current bill"))?;

    let document = invoice.render_text(&config.letterhead, &config.currency);
    printer.print(&document)?;

    info!(bill_number = %invoice.bill_number, "Bill sent to printer");
    Ok(current(bill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::print::MemoryPrinter;
    use crate::state::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tally_core::ids::SequentialIdGenerator;
    use tally_core::{NotificationLevel, STANDARD_TAX_RATE};

    fn session() -> BillSession {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap());
        BillSession::new(
            Some(STANDARD_TAX_RATE),
            Arc::new(SequentialIdGenerator::new()),
            Arc::new(clock),
        )
    }

    #[test]
    fn test_update_item_from_form_text() {
        let bill = session();
        add_bill_item(&bill);
        update_bill_item(&bill, "1", "description", "Widget").unwrap();
        update_bill_item(&bill, "1", "quantity", "2").unwrap();
        let response = update_bill_item(&bill, "1", "price", "10").unwrap();

        assert_eq!(response.totals.subtotal.cents(), 2000);
        assert_eq!(response.totals.total.cents(), 2200);
    }

    #[test]
    fn test_unknown_field_and_item() {
        let bill = session();
        add_bill_item(&bill);

        let err = update_bill_item(&bill, "1", "colour", "red").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = remove_bill_item(&bill, "9").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_extreme_quantity_and_price_keep_totals_in_range() {
        let bill = session();
        add_bill_item(&bill);
        update_bill_item(&bill, "1", "quantity", "1000000000").unwrap();
        let response = update_bill_item(&bill, "1", "price", "99999999").unwrap();

        assert_eq!(response.totals.subtotal.cents(), i64::MAX);
        assert_eq!(response.totals.total.cents(), i64::MAX);
        assert_eq!(get_bill(&bill).totals, response.totals);
    }

    #[test]
    fn test_clear_drops_preview() {
        let bill = session();
        add_bill_item(&bill);
        set_customer_name(&bill, "Acme Corp");
        update_bill_item(&bill, "1", "description", "Widget").unwrap();
        update_bill_item(&bill, "1", "price", "10").unwrap();
        assert!(generate_bill(&bill).preview.is_some());

        let response = clear_bill(&bill);
        assert!(response.preview.is_none());
        assert!(response.bill.is_empty());
    }

    #[test]
    fn test_generate_failure_is_a_warning() {
        let bill = session();
        let response = generate_bill(&bill);

        let notification = response.notification.unwrap();
        assert_eq!(notification.level, NotificationLevel::Warning);
        assert_eq!(notification.title, "Missing items");
        assert!(response.preview.is_none());
    }

    #[test]
    fn test_printed_invoice_uses_bill_overrides() {
        let bill = session();
        add_bill_item(&bill);
        set_customer_name(&bill, "Acme Corp");
        set_bill_number(&bill, "BL-4821");
        set_company_name(&bill, "Corner Store");
        update_bill_item(&bill, "1", "description", "Widget").unwrap();
        update_bill_item(&bill, "1", "price", "10").unwrap();

        let response = generate_bill(&bill);
        assert_eq!(response.preview.unwrap().bill_number, "BL-4821");

        let printer = MemoryPrinter::new();
        print_bill(&bill, &ConfigState::default(), &printer).unwrap();
        let pages = printer.pages();
        assert!(pages[0].contains("Bill #BL-4821"));
        assert!(pages[0].contains("Corner Store"));
        assert!(!pages[0].contains("Your Company Name"));
    }

    #[test]
    fn test_print_requires_preview() {
        let bill = session();
        let printer = MemoryPrinter::new();

        let err = print_bill(&bill, &ConfigState::default(), &printer).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(printer.pages().is_empty());
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let bill = session();
        let err = set_bill_date(&bill, "2024-13-01").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let response = set_bill_date(&bill, "2024-04-01").unwrap();
        assert_eq!(response.bill.date.to_string(), "2024-04-01");
    }
}
