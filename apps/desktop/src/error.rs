//! # API Error Type
//!
//! Unified error type for host commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally                                  │
//! │                                                                         │
//! │  Shell / UI                  Rust Backend                               │
//! │  ──────────                  ────────────                               │
//! │                                                                         │
//! │  bill date 2024-02-30                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad input? ───── CoreError::InvalidDate { .. } ──┐             │  │
//! │  │         │                                          ▼             │  │
//! │  │         ▼                                       ApiError ───────►│  │
//! │  │  Print failed? ── io::Error ──────────────────────┘             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "INVALID_INPUT", "message": "Invalid date '2024-02-30'..." } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bill that fails finalization is *not* an `ApiError`: `generate_bill`
//! answers with a warning notification instead, because the user simply
//! keeps editing.

use serde::Serialize;
use tally_core::CoreError;

/// API error returned from host commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Bill item not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed input: unknown key, unknown field, bad date
    InvalidInput,

    /// Referenced item or preview does not exist
    NotFound,

    /// The print sink failed
    PrintError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidInput, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Core errors all describe input that does not map onto a command.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::invalid_input(err.to_string())
    }
}

/// Print failures keep the underlying message; the user may retry.
impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!(error = %err, "Print sink failed");
        ApiError::new(ErrorCode::PrintError, format!("Printing failed: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
