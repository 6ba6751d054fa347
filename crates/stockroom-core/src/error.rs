//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  └── ValidationError  - Malformed or out-of-range user input           │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  ├── ConfigError      - Missing/invalid DB_* settings                  │
//! │  ├── DbError          - Driver failures                                │
//! │  └── InventoryError   - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError ──────────────┐                                 │
//! │        DbError ─► Query/Persistence ─┴─► InventoryError ─► CLI         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation always runs before any database call, so a `ValidationError`
//! guarantees the store was never touched.

use thiserror::Error;

/// Input validation errors.
///
/// Each variant names the first field that failed so the caller can
/// re-prompt for exactly that value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value could not be parsed (e.g. letters where a number was expected).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::Negative { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}
