//! # Error Types
//!
//! Domain-specific error types for hma-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  hma-core errors (this file)                                            │
//! │  ├── CoreError        - General domain errors                           │
//! │  ├── ValidationError  - Input validation failures (no state change)     │
//! │  └── ImportError      - CSV import rejected (nothing applied)           │
//! │                                                                         │
//! │  hma-db errors (separate crate)                                         │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  CLI errors (in app)                                                    │
//! │  └── ApiError         - What the operator sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → stderr + exit code      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stale client indexes and ledger positions are not errors at all. The
//! ledger operations treat them as no-ops and report `false`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// CSV import was rejected.
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    /// CSV text could not be produced.
    #[error("CSV encoding failed: {0}")]
    Encode(String),

    /// Application state could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        CoreError::Encode(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These block the triggering operation entirely. A create that fails
/// validation leaves the application state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A collection that must have content is empty (e.g. the invoice cart).
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. invalid amount, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Import Error
// =============================================================================

/// Reasons a CSV import is refused.
///
/// An import is all-or-nothing: any of these leaves the target collection
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The file decoded to zero data rows.
    #[error("file contains no data rows")]
    Empty,

    /// None of the columns for this kind of import are present.
    #[error("none of the expected columns were found (expected {expected:?})")]
    MissingColumns { expected: Vec<String> },

    /// A present cell could not be coerced to its typed field.
    #[error("row {row}: {column} value '{value}' is invalid")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
