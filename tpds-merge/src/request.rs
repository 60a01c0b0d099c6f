//! Update and delete requests delivered by the sync transport.

use crate::staging::ContentStream;
use std::fmt;
use tpds_types::{ProjectId, SourceTag, UserId};

/// A new or changed file at `path`, with its full content.
pub struct UpdateRequest {
    pub project_id: ProjectId,
    /// Slash-delimited, relative to the project root.
    pub path: String,
    pub content: ContentStream,
    pub source: SourceTag,
    pub actor_id: UserId,
}

impl UpdateRequest {
    pub fn new(
        project_id: ProjectId,
        path: impl Into<String>,
        content: ContentStream,
        source: impl Into<SourceTag>,
        actor_id: UserId,
    ) -> Self {
        Self {
            project_id,
            path: path.into(),
            content,
            source: source.into(),
            actor_id,
        }
    }
}

impl fmt::Debug for UpdateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateRequest")
            .field("project_id", &self.project_id)
            .field("path", &self.path)
            .field("source", &self.source)
            .field("actor_id", &self.actor_id)
            .finish_non_exhaustive()
    }
}

/// Removal of whatever entity sits at `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub project_id: ProjectId,
    pub path: String,
    pub source: SourceTag,
    pub actor_id: UserId,
}

impl DeleteRequest {
    pub fn new(
        project_id: ProjectId,
        path: impl Into<String>,
        source: impl Into<SourceTag>,
        actor_id: UserId,
    ) -> Self {
        Self {
            project_id,
            path: path.into(),
            source: source.into(),
            actor_id,
        }
    }
}
