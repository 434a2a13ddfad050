//! Error types for store operations.

use thiserror::Error;
use vigil_model::ReportId;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur when talking to the external store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transient network or backend failure. Safe to retry from the caller.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the operation for this principal.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A write referenced a report the store does not know.
    #[error("unknown report: {0}")]
    UnknownReport(ReportId),
}
