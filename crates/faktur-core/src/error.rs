//! # Error Types
//!
//! Domain-specific error types for faktur-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  faktur-core errors (this file)                                        │
//! │  └── CoreError        - Name lookups and snapshot decoding             │
//! │                                                                         │
//! │  faktur-db errors (separate crate)                                     │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  Editor errors (in app)                                                │
//! │  ├── ExportError      - PDF export pipeline failures                   │
//! │  └── ApiError         - What the CLI host sees (serialized)            │
//! │                                                                         │
//! │  Flow: CoreError → DbError → ApiError → CLI                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Editing itself never fails: numeric coercion turns bad input into `NaN`
//! rather than an error. The variants here only come from looking things
//! up by name and from decoding stored snapshots.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A field name did not match any item, document, or column field.
    ///
    /// ## When This Occurs
    /// - CLI `set-item 0 colour red`
    /// - CLI `column shipping on`
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A label name matched neither a storage key nor an element id.
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// Stored snapshot text is not valid JSON.
    ///
    /// ## When This Occurs
    /// - Storage was hand-edited
    /// - A write was truncated
    ///
    /// Callers log this and keep the compiled-in defaults.
    #[error("Snapshot could not be decoded: {0}")]
    Snapshot(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownField("colour".to_string());
        assert_eq!(err.to_string(), "Unknown field: colour");

        let err = CoreError::UnknownLabel("lFoo".to_string());
        assert_eq!(err.to_string(), "Unknown label: lFoo");
    }

    #[test]
    fn test_json_error_converts_to_core_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let core_err: CoreError = json_err.into();
        assert!(matches!(core_err, CoreError::Snapshot(_)));
    }
}
