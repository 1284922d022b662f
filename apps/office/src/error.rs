//! # API Error Type
//!
//! Unified error type for office commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function  →  Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── ValidationError ──────────┐                                 │
//! │         ├── ImportError ──────────────┤                                 │
//! │         ├── DbError ──────────────────┼──► ApiError { code, message }   │
//! │         ├── SyncError (config) ───────┤          │                      │
//! │         └── io::Error ────────────────┘          ▼                      │
//! │                                         main prints, exits 1 or 2      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit status 1 means the operator asked for something that cannot be done
//! (bad input, unknown id, unusable CSV). Exit status 2 means the tool itself
//! failed.

use hma_core::{CoreError, ImportError, ValidationError};
use hma_db::DbError;
use hma_sync::SyncError;
use serde::Serialize;

/// Error returned from office commands.
///
/// ```json
/// { "code": "VALIDATION_ERROR", "message": "name is required" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// CSV file could not be imported
    ImportError,

    /// No record with the given id or index
    NotFound,

    /// Operator declined a confirmation prompt
    Cancelled,

    /// Database operation failed
    DatabaseError,

    /// Configuration unusable
    ConfigError,

    /// File could not be read or written
    IoError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self.code {
            ErrorCode::ValidationError
            | ErrorCode::ImportError
            | ErrorCode::NotFound
            | ErrorCode::Cancelled => 1,
            ErrorCode::DatabaseError
            | ErrorCode::ConfigError
            | ErrorCode::IoError
            | ErrorCode::Internal => 2,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::new(ErrorCode::ImportError, format!("Import failed: {}", err))
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::Import(e) => e.into(),
            CoreError::Encode(e) => {
                tracing::error!("CSV encoding failed: {}", e);
                ApiError::internal("Could not produce CSV")
            }
            CoreError::Serialization(e) => {
                tracing::error!("Serialization failed: {}", e);
                ApiError::internal("Could not serialize data")
            }
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                ApiError::new(ErrorCode::DatabaseError, format!("Database connection failed: {}", e))
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        if err.is_config_error() {
            ApiError::new(ErrorCode::ConfigError, err.to_string())
        } else {
            ApiError::internal(err.to_string())
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("JSON output failed: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err: ApiError = ValidationError::Required {
            field: "name".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.exit_code(), 1);

        let err: ApiError = ImportError::Empty.into();
        assert_eq!(err.exit_code(), 1);

        let err: ApiError = DbError::PoolExhausted.into();
        assert_eq!(err.exit_code(), 2);

        let err: ApiError = SyncError::InvalidUrl("x".into()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("Client", "abc")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Client not found: abc");
    }
}
