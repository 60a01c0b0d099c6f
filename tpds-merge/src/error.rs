//! Error types for the merge layer.

use thiserror::Error;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors surfaced by [`UpdateMerger::merge_update`](crate::UpdateMerger::merge_update).
///
/// Every variant is fatal to the single request it came from; the caller
/// decides whether to retry or dead-letter the update.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The incoming stream could not be materialized (or read back).
    #[error("staging error: {0}")]
    Staging(#[from] StagingError),

    /// The content sniffing capability failed.
    #[error("content sniffing failed: {0}")]
    Sniff(#[from] SniffError),

    /// The entity store rejected a lookup or mutation.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// The classifier produced a kind the merger has no branch for.
    #[error("unrecognized file: {path}")]
    UnrecognizedFile { path: String },
}

/// Errors from staging an incoming stream to local disk.
#[derive(Debug, Error)]
pub enum StagingError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stream exceeded the configured size limit.
    #[error("staged content exceeds {limit} bytes")]
    TooLarge { limit: u64 },
}

/// Error from releasing a staged artifact. Only ever logged.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error reported by the content sniffing capability.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SniffError(pub String);

/// Errors reported by the project entity store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No entity exists at the given path.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// The entity changed underneath the operation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}
