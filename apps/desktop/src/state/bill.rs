//! # Bill Session
//!
//! Holds the draft bill and, once generated, its invoice preview.
//!
//! ## Bill Session Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill Session Operations                              │
//! │                                                                         │
//! │  Frontend Action          Command                 Session Change        │
//! │  ───────────────          ───────                 ──────────────        │
//! │                                                                         │
//! │  Click "Add Item" ───────► add_bill_item() ─────► draft.add_item()     │
//! │                                                                         │
//! │  Type in a field ────────► update_bill_item() ──► draft.update_item()  │
//! │                                                                         │
//! │  Click Remove ───────────► remove_bill_item() ──► draft.remove_item()  │
//! │                                                                         │
//! │  Click "Generate Bill" ──► generate_bill() ─────► preview = invoice    │
//! │                                                                         │
//! │  Click "Back to Edit" ───► back_to_edit() ──────► preview = None       │
//! │                                                                         │
//! │  Click "Clear Form" ─────► clear_bill() ────────► draft = empty,       │
//! │                                                   preview = None        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tally_core::ids::{IdGenerator, UuidGenerator};
use tally_core::{BillDocument, Invoice, TaxRate, ValidationError};

use super::clock::{Clock, SystemClock};

/// What the bill screen shows: the draft, plus the preview when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillWorkspace {
    pub draft: BillDocument,
    pub preview: Option<Invoice>,
}

/// Host-managed bill state.
///
/// ## Capabilities
/// Item ids come from the injected [`IdGenerator`]; dates and issue times
/// from the injected [`Clock`].
#[derive(Clone)]
pub struct BillSession {
    workspace: Arc<Mutex<BillWorkspace>>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl BillSession {
    /// Creates an empty bill dated today.
    pub fn new(tax_rate: Option<TaxRate>, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        let draft = BillDocument::new(clock.today(), tax_rate);
        BillSession {
            workspace: Arc::new(Mutex::new(BillWorkspace {
                draft,
                preview: None,
            })),
            ids,
            clock,
        }
    }

    /// UUID item ids and the system clock.
    pub fn with_defaults(tax_rate: Option<TaxRate>) -> Self {
        Self::new(tax_rate, Arc::new(UuidGenerator), Arc::new(SystemClock))
    }

    /// Executes a function with read access to the workspace.
    pub fn with_workspace<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BillWorkspace) -> R,
    {
        let workspace = self.lock();
        f(&workspace)
    }

    /// Replaces the draft with `edit(draft)` and returns a copy of the result.
    ///
    /// An existing preview is kept as is; it is a snapshot.
    pub fn edit<F>(&self, edit: F) -> BillDocument
    where
        F: FnOnce(BillDocument) -> BillDocument,
    {
        let mut workspace = self.lock();
        let next = edit(workspace.draft.clone());
        workspace.draft = next.clone();
        next
    }

    /// Like [`edit`](Self::edit), but only while the draft holds `item_id`.
    ///
    /// The lookup and the edit happen under one lock. `None` if the item is
    /// not in the draft, in which case nothing changes.
    pub fn edit_item<F>(&self, item_id: &str, edit: F) -> Option<BillDocument>
    where
        F: FnOnce(BillDocument) -> BillDocument,
    {
        let mut workspace = self.lock();
        workspace.draft.item(item_id)?;
        let next = edit(workspace.draft.clone());
        workspace.draft = next.clone();
        Some(next)
    }

    /// Appends a blank item with a fresh id.
    pub fn add_item(&self) -> BillDocument {
        self.edit(|draft| draft.add_item(self.ids.as_ref()))
    }

    /// Finalizes the draft. On success the invoice becomes the preview; on
    /// failure nothing changes.
    pub fn generate(&self) -> Result<Invoice, ValidationError> {
        let mut workspace = self.lock();
        let invoice = workspace.draft.finalize(self.clock.now())?;
        workspace.preview = Some(invoice.clone());
        Ok(invoice)
    }

    /// Drops the preview and returns to the draft.
    pub fn back_to_edit(&self) -> BillDocument {
        let mut workspace = self.lock();
        workspace.preview = None;
        workspace.draft.clone()
    }

    /// Empties the form and drops the preview.
    pub fn clear(&self) -> BillDocument {
        let today = self.clock.today();
        let mut workspace = self.lock();
        workspace.draft = workspace.draft.clone().cleared(today);
        workspace.preview = None;
        workspace.draft.clone()
    }

    pub fn preview(&self) -> Option<Invoice> {
        self.lock().preview.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BillWorkspace> {
        self.workspace.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for BillSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BillSession")
            .field("workspace", &*self.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::clock::FixedClock;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tally_core::ids::SequentialIdGenerator;
    use tally_core::{ItemUpdate, Money, STANDARD_TAX_RATE};

    fn session() -> BillSession {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap());
        BillSession::new(
            Some(STANDARD_TAX_RATE),
            Arc::new(SequentialIdGenerator::new()),
            Arc::new(clock),
        )
    }

    fn fill(session: &BillSession) {
        session.add_item();
        session.edit(|draft| {
            draft
                .set_customer_name("Acme Corp")
                .update_item("1", ItemUpdate::Description("Widget".to_string()))
                .update_item("1", ItemUpdate::Price(Money::from_cents(1000)))
        });
    }

    #[test]
    fn test_new_bill_is_dated_today() {
        let session = session();
        session.with_workspace(|ws| {
            assert_eq!(ws.draft.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
            assert!(ws.draft.is_empty());
            assert!(ws.preview.is_none());
        });
    }

    #[test]
    fn test_generate_sets_preview() {
        let session = session();
        fill(&session);

        let invoice = session.generate().unwrap();
        assert_eq!(invoice.total.cents(), 1100);
        assert_eq!(session.preview(), Some(invoice));
    }

    #[test]
    fn test_failed_generate_changes_nothing() {
        let session = session();
        session.add_item();
        let before = session.with_workspace(Clone::clone);

        assert_eq!(session.generate(), Err(ValidationError::MissingCustomerName));
        assert_eq!(session.with_workspace(Clone::clone), before);
    }

    #[test]
    fn test_preview_survives_later_edits() {
        let session = session();
        fill(&session);
        let invoice = session.generate().unwrap();

        session.edit(|draft| draft.remove_item("1"));
        assert_eq!(session.preview(), Some(invoice));
    }

    #[test]
    fn test_edit_item_requires_existing_item() {
        let session = session();
        fill(&session);

        let edited = session.edit_item("1", |draft| {
            draft.update_item("1", ItemUpdate::Quantity(3))
        });
        assert_eq!(edited.map(|draft| draft.subtotal().cents()), Some(3000));

        let before = session.with_workspace(Clone::clone);
        let missing = session.edit_item("9", |draft| draft.set_customer_name("Changed"));
        assert!(missing.is_none());
        assert_eq!(session.with_workspace(Clone::clone), before);
    }

    #[test]
    fn test_back_to_edit_and_clear() {
        let session = session();
        fill(&session);
        session.generate().unwrap();

        let draft = session.back_to_edit();
        assert_eq!(draft.items.len(), 1);
        assert!(session.preview().is_none());

        let cleared = session.clear();
        assert!(cleared.is_empty());
        assert_eq!(cleared.tax_rate, Some(STANDARD_TAX_RATE));
    }
}
