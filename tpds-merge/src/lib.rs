//! Merges updates from a third-party file-sync provider into a project's
//! document/file tree.
//!
//! # Architecture
//!
//! The merger sits between an upstream transport that delivers update and
//! delete events and the project's entity store. It owns no storage; every
//! collaborator is reached through a trait:
//!
//! - **Stager**: writes an incoming stream to a local, deletable artifact
//! - **EntityLookup**: reports what kind of entity exists at a path
//! - **ContentSniffer**: detects binary content and text encoding
//! - **EntityMutator**: create-or-replace and delete in the entity store
//!
//! ## Update flow
//!
//! 1. **Stage**: materialize the stream ([`FsStager`] writes to a directory)
//! 2. **Lookup**: read the live kind of the entity at the path
//! 3. **Classify**: pick document or binary file ([`classify`])
//! 4. **Apply**: upsert through the mutator
//! 5. **Release**: delete the staged artifact, on every exit path
//!
//! Deletes skip straight to the mutator and never fail the caller.
//!
//! # Example
//!
//! ```no_run
//! # async fn run(merger: tpds_merge::UpdateMerger) -> tpds_merge::MergeResult<()> {
//! use tpds_merge::UpdateRequest;
//! use tpds_types::{ProjectId, UserId};
//!
//! let content = Box::new(std::io::Cursor::new(b"hello\nworld".to_vec()));
//! let request = UpdateRequest::new(ProjectId::new(), "/main.tex", content, "dropbox", UserId::new());
//! let outcome = merger.merge_update(request).await?;
//! println!("{} {} rev {}", outcome.entity_kind, outcome.entity_id, outcome.revision);
//! # Ok(())
//! # }
//! ```

pub mod classify;
mod config;
mod error;
pub mod lines;
mod merger;
mod request;
pub mod sniff;
pub mod staging;
pub mod store;

pub use classify::{classify, target_kind};
pub use config::MergeConfig;
pub use error::{
    MergeError, MergeResult, PersistenceError, ReleaseError, SniffError, StagingError,
};
pub use lines::{read_lines, split_lines};
pub use merger::UpdateMerger;
pub use request::{DeleteRequest, UpdateRequest};
pub use sniff::{ContentSniffer, DetectedType, UTF8};
pub use staging::{ContentStream, FsStager, StagedArtifact, Stager};
pub use store::{EntityLookup, EntityMutator};
