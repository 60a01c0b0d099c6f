//! Core type definitions for the third-party data store (TPDS) merger.
//!
//! This crate holds the plain data that flows between an external file-sync
//! provider, the merge core and the project entity store:
//! - Project, entity, folder and user identifiers (UUID v7)
//! - Entity kinds (document vs. binary file) and provenance tags
//! - Snapshots of a project's entity tree and the outcome of a merge
//!
//! Nothing in here performs I/O.

mod entity;
mod ids;

pub use entity::{EntityKind, EntityPath, MergeOutcome, ProjectEntities, SourceTag, UpsertedEntity};
pub use ids::{EntityId, FolderId, ProjectId, UserId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
