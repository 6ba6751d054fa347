//! # CLI Error Type
//!
//! Maps whatever stopped a command to a code, a message and an exit status.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  command ── anyhow::Result<String> ──┐                                 │
//! │                                      │                                  │
//! │            InventoryError ───────────┤   walk the source chain,         │
//! │            ValidationError ──────────┼── first known type wins          │
//! │            ExportError ──────────────┤                                  │
//! │                                      ▼                                  │
//! │                              CliError { code, message }                 │
//! │                                      │                                  │
//! │              stderr (text) or stdout (--json) + exit status             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the error is printed as:
//! ```json
//! {
//!   "code": "VALIDATION_ERROR",
//!   "message": "quantity must be greater than zero"
//! }
//! ```

use serde::Serialize;
use stockroom_core::ValidationError;
use stockroom_db::InventoryError;

use crate::export::ExportError;

#[derive(Debug, Clone, Serialize)]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message, including context
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing or invalid DB_* settings
    ConfigurationError,

    /// Database unreachable at startup
    ConnectionError,

    /// Bad input; nothing was sent to the database
    ValidationError,

    /// A snapshot could not be loaded
    QueryError,

    /// A write failed and was rolled back
    PersistenceError,

    /// Export file could not be written
    ExportError,

    Internal,
}

impl ErrorCode {
    /// Process exit status. Clap's own usage errors exit with 2 as well.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::ValidationError => 2,
            ErrorCode::ConfigurationError => 3,
            ErrorCode::ConnectionError => 4,
            ErrorCode::QueryError => 5,
            ErrorCode::PersistenceError => 6,
            ErrorCode::ExportError => 7,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }
}

impl From<&anyhow::Error> for CliError {
    fn from(err: &anyhow::Error) -> Self {
        let code = err
            .chain()
            .find_map(|cause| {
                if let Some(e) = cause.downcast_ref::<InventoryError>() {
                    return Some(inventory_code(e));
                }
                if cause.is::<ValidationError>() {
                    return Some(ErrorCode::ValidationError);
                }
                if cause.is::<ExportError>() {
                    return Some(ErrorCode::ExportError);
                }
                None
            })
            .unwrap_or(ErrorCode::Internal);

        CliError::new(code, format!("{err:#}"))
    }
}

fn inventory_code(err: &InventoryError) -> ErrorCode {
    match err {
        InventoryError::Configuration(_) => ErrorCode::ConfigurationError,
        InventoryError::Connection(_) => ErrorCode::ConnectionError,
        InventoryError::Validation(_) => ErrorCode::ValidationError,
        InventoryError::Query { .. } => ErrorCode::QueryError,
        InventoryError::Persistence { .. } => ErrorCode::PersistenceError,
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}
