//! Entity kinds, project tree snapshots and merge outcomes.

use crate::ids::{EntityId, FolderId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The representation an entity has in the project tree.
///
/// Code outside this crate must handle kinds it does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EntityKind {
    /// A text entity stored as an ordered sequence of lines.
    #[serde(rename = "doc")]
    Document,
    /// An opaque entity stored as raw bytes.
    #[serde(rename = "file")]
    BinaryFile,
}

impl EntityKind {
    /// Short name used in logs and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "doc",
            Self::BinaryFile => "file",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque marker naming the external system an update came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceTag(String);

impl SourceTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for SourceTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entity together with its project-root-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPath {
    pub entity_id: EntityId,
    pub path: String,
}

impl EntityPath {
    pub fn new(entity_id: EntityId, path: impl Into<String>) -> Self {
        Self {
            entity_id,
            path: path.into(),
        }
    }
}

/// Snapshot of every document and binary file in a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntities {
    pub docs: Vec<EntityPath>,
    pub files: Vec<EntityPath>,
}

impl ProjectEntities {
    /// Returns the kind of entity at `path`, if any.
    ///
    /// Documents are checked before files, so a tree that somehow holds both
    /// at the same path reports a document.
    pub fn kind_at(&self, path: &str) -> Option<EntityKind> {
        if self.docs.iter().any(|d| d.path == path) {
            return Some(EntityKind::Document);
        }
        if self.files.iter().any(|f| f.path == path) {
            return Some(EntityKind::BinaryFile);
        }
        None
    }

    /// Total number of entities in the snapshot.
    pub fn len(&self) -> usize {
        self.docs.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty() && self.files.is_empty()
    }
}

/// Identity and revision of an entity after a create-or-replace.
///
/// Revisions are assigned by the entity store, never by the merger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertedEntity {
    pub entity_id: EntityId,
    pub revision: u64,
    pub folder_id: FolderId,
}

/// Result of merging one update into a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    #[serde(rename = "entityType")]
    pub entity_kind: EntityKind,
    pub entity_id: EntityId,
    #[serde(rename = "rev")]
    pub revision: u64,
    pub folder_id: FolderId,
}

impl MergeOutcome {
    /// Builds an outcome from what the entity store returned.
    pub fn from_upsert(entity_kind: EntityKind, upserted: UpsertedEntity) -> Self {
        Self {
            entity_kind,
            entity_id: upserted.entity_id,
            revision: upserted.revision,
            folder_id: upserted.folder_id,
        }
    }

    /// Serializes the outcome in the shape returned to the sync provider.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
