//! User-facing toasts raised by bill actions.
//!
//! The core only decides *what* to say; hosts decide how to show it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

/// How the toast is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum NotificationLevel {
    Success,
    Warning,
    Info,
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>) -> Self {
        Notification {
            level,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Raised when a bill is finalized.
    pub fn bill_generated() -> Self {
        Notification::new(NotificationLevel::Success, "Bill generated")
            .with_description("Your bill has been generated successfully!")
    }

    /// Raised when the form is reset.
    pub fn form_cleared() -> Self {
        Notification::new(NotificationLevel::Info, "Form cleared")
    }
}

impl From<&ValidationError> for Notification {
    fn from(err: &ValidationError) -> Self {
        let (title, description) = match err {
            ValidationError::MissingCustomerName => {
                ("Missing information", "Please enter customer name")
            }
            ValidationError::NoItems => ("Missing items", "Please add at least one item to the bill"),
            ValidationError::InvalidItem { .. } => (
                "Invalid items",
                "All items must have a description, quantity, and price",
            ),
        };
        Notification::new(NotificationLevel::Warning, title).with_description(description)
    }
}
