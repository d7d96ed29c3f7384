//! # API Error Type
//!
//! Unified error type for editor commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Faktur                                 │
//! │                                                                         │
//! │  CLI                         Rust Backend                               │
//! │  ───                         ────────────                               │
//! │                                                                         │
//! │  faktur set-item 1 colour red                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown name? ──── CoreError::UnknownField("colour") ──┐       │  │
//! │  │         │                                                ▼       │  │
//! │  │  Storage error? ─── DbError::QuotaExceeded ─────────── ApiError ►│  │
//! │  │         │                                                ▲       │  │
//! │  │  Export error? ──── ExportError::InProgress ────────────┘       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: [ValidationError] Unknown field: colour                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Editing never surfaces storage failures: the editor logs them and keeps
//! going. `ApiError` only reaches the user for bad input, a failed open, a
//! failed clear or a failed export.

use faktur_core::CoreError;
use faktur_db::DbError;
use serde::Serialize;

use crate::export::ExportError;
use crate::state::ConfigError;

/// API error returned from editor commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Unknown field: colour"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
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
    /// Input validation failed
    ValidationError,

    /// Storage operation failed
    StorageError,

    /// Value larger than the storage quota
    QuotaExceeded,

    /// An export is already running
    ExportBusy,

    /// Export pipeline failed
    ExportError,

    /// Config file or environment override is invalid
    ConfigError,

    /// File system or other I/O failure
    IoError,

    /// Internal error
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

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::QuotaExceeded { key, size, limit } => ApiError::new(
                ErrorCode::QuotaExceeded,
                format!("'{}' is {} bytes, storage allows {}", key, size, limit),
            ),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            DbError::Serialization(e) => {
                tracing::error!("Serialization failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Document could not be encoded")
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Storage operation failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::StorageError, "Storage pool exhausted")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownField(_) | CoreError::UnknownLabel(_) => {
                ApiError::validation(err.to_string())
            }
            CoreError::Snapshot(e) => ApiError::internal(format!("Snapshot error: {}", e)),
        }
    }
}

/// Converts export errors to API errors.
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::InProgress => ApiError::new(ErrorCode::ExportBusy, err.to_string()),
            other => ApiError::new(ErrorCode::ExportError, other.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::new(ErrorCode::IoError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_is_validation_error() {
        let err: ApiError = CoreError::UnknownField("colour".to_string()).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "[ValidationError] Unknown field: colour");
    }

    #[test]
    fn test_quota_error_keeps_code() {
        let err: ApiError = DbError::quota("faktur_logo", 10, 5).into();
        assert_eq!(err.code, ErrorCode::QuotaExceeded);
    }

    #[test]
    fn test_export_busy() {
        let err: ApiError = ExportError::InProgress.into();
        assert_eq!(err.code, ErrorCode::ExportBusy);

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "EXPORT_BUSY");
    }
}
