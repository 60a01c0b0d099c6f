//! Entity store abstraction.
//!
//! The project tree is owned by the persistence layer. The merger reads it
//! through [`EntityLookup`] and changes it only through the atomic operations
//! of [`EntityMutator`]; it never holds a lock on it.

use crate::error::PersistenceError;
use crate::staging::StagedArtifact;
use async_trait::async_trait;
use tpds_types::{EntityKind, ProjectEntities, ProjectId, SourceTag, UpsertedEntity, UserId};

/// Read access to a project's current entity tree.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    /// Lists every document and file in the project, with their paths.
    async fn all_entities(&self, project_id: ProjectId) -> Result<ProjectEntities, PersistenceError>;

    /// Returns the kind of entity currently at `path`, if any.
    async fn existing_kind(
        &self,
        project_id: ProjectId,
        path: &str,
    ) -> Result<Option<EntityKind>, PersistenceError> {
        Ok(self.all_entities(project_id).await?.kind_at(path))
    }
}

/// Create-or-replace and delete operations on the entity store.
///
/// Each operation resolves (and if needed creates) the containing folder and
/// replaces whatever entity currently sits at `path`.
#[async_trait]
pub trait EntityMutator: Send + Sync {
    async fn upsert_document(
        &self,
        project_id: ProjectId,
        path: &str,
        lines: Vec<String>,
        source: &SourceTag,
        actor_id: UserId,
    ) -> Result<UpsertedEntity, PersistenceError>;

    async fn upsert_binary_file(
        &self,
        project_id: ProjectId,
        path: &str,
        artifact: &StagedArtifact,
        source: &SourceTag,
        actor_id: UserId,
    ) -> Result<UpsertedEntity, PersistenceError>;

    async fn delete_entity_at_path(
        &self,
        project_id: ProjectId,
        path: &str,
        source: &SourceTag,
        actor_id: UserId,
    ) -> Result<(), PersistenceError>;
}
