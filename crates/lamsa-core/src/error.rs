//! # Error Types
//!
//! Domain-specific error types for lamsa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lamsa-core errors (this file)                                         │
//! │  ├── CoreError        - Codec and storage failures                     │
//! │  └── StorageError     - Session storage slot failures                  │
//! │                                                                         │
//! │  lamsa-ui errors (separate crate)                                      │
//! │  └── UiError          - Configuration and script loading               │
//! │                                                                         │
//! │  None of these ever reach the shopper: the store logs them and         │
//! │  degrades to an empty cart or a skipped write.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Failures inside the cart layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The stored cart is not a valid JSON line item array.
    ///
    /// ## When This Occurs
    /// - Slot written by an incompatible page version
    /// - Slot edited by hand in devtools
    #[error("Cart data could not be decoded: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The storage slot rejected an operation.
    #[error("Session storage failure: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// Storage Error
// =============================================================================

/// Errors raised by a [`SessionStorage`](crate::storage::SessionStorage)
/// implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The value does not fit in the remaining quota.
    #[error("Storage quota exceeded writing {bytes} bytes to '{key}'")]
    QuotaExceeded { key: String, bytes: usize },

    /// Storage is disabled (private browsing, sandboxed frame).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_messages() {
        let err = StorageError::QuotaExceeded {
            key: "lamsa-cart".to_string(),
            bytes: 6_000_000,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded writing 6000000 bytes to 'lamsa-cart'"
        );
    }

    #[test]
    fn test_storage_converts_to_core_error() {
        let err: CoreError = StorageError::Unavailable("sandboxed".to_string()).into();
        assert!(matches!(err, CoreError::Storage(_)));
        assert_eq!(
            err.to_string(),
            "Session storage failure: Storage unavailable: sandboxed"
        );
    }

    #[test]
    fn test_json_converts_to_core_error() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
