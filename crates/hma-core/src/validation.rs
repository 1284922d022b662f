//! # Validation Module
//!
//! Input validation helpers shared by the ledger, registries and invoice.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                    │
//! │  └── Argument shape (missing positional, unknown subcommand)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Required text fields (trimmed, non-empty)                          │
//! │  ├── Amounts (Money::parse)                                             │
//! │  └── Calendar dates (YYYY-MM-DD)                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Domain operation runs against a validated value               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date format used in persisted state, CSV files and documents.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// String Validators
// =============================================================================

/// Requires a non-empty value after trimming and returns the trimmed text.
///
/// ```rust
/// use hma_core::validation::require_text;
///
/// assert_eq!(require_text("name", "  ALI ").unwrap(), "ALI");
/// assert!(require_text("name", "   ").is_err());
/// ```
pub fn require_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Required text, display-normalized to uppercase.
///
/// Client names, ledger descriptions and record names are all stored in
/// uppercase.
pub fn require_upper(field: &str, value: &str) -> ValidationResult<String> {
    require_text(field, value).map(|v| v.to_uppercase())
}

/// Optional text, trimmed and uppercased. Empty input stays empty.
pub fn optional_upper(value: &str) -> String {
    value.trim().to_uppercase()
}

// =============================================================================
// Typed Validators
// =============================================================================

/// Requires a parseable amount, reporting failures against `field`.
pub fn require_amount(field: &str, value: &str) -> ValidationResult<Money> {
    Money::parse(value).map_err(|err| match err {
        ValidationError::Required { .. } => ValidationError::Required {
            field: field.to_string(),
        },
        ValidationError::InvalidFormat { reason, .. } => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason,
        },
        other => other,
    })
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// ```rust
/// use hma_core::validation::parse_date;
///
/// assert!(parse_date("date", "2025-11-02").is_ok());
/// assert!(parse_date("date", "02/11/2025").is_err());
/// ```
pub fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not a YYYY-MM-DD date", value.trim()),
        }
    })
}

/// Checks that `index` addresses an element of a collection of `len` items.
pub fn validate_index(field: &str, index: usize, len: usize) -> ValidationResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: len as i64 - 1,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
