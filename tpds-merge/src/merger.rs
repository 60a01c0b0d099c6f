//! Update merger - applies third-party file-sync updates to a project.
//!
//! For each update the merger stages the incoming stream, reads the live kind
//! of the entity at the target path, classifies the content and performs a
//! single create-or-replace through the entity store. Deletes go straight to
//! the store.
//!
//! The merger keeps no state between requests. Concurrent updates for the
//! same path race inside the entity store, which decides the winner.

use crate::classify::classify;
use crate::error::{MergeError, MergeResult};
use crate::lines::read_lines;
use crate::request::{DeleteRequest, UpdateRequest};
use crate::sniff::ContentSniffer;
use crate::staging::{StagedArtifact, StagedGuard, Stager};
use crate::store::{EntityLookup, EntityMutator};
use std::sync::Arc;
use tpds_types::{EntityKind, MergeOutcome, ProjectId, SourceTag, UserId};
use tracing::{debug, error, info, warn};

/// Merges updates and deletes from an external sync provider.
///
/// Cheap to clone; clones share the same collaborators, so one merger can be
/// moved into a task per incoming event.
#[derive(Clone)]
pub struct UpdateMerger {
    stager: Arc<dyn Stager>,
    lookup: Arc<dyn EntityLookup>,
    sniffer: Arc<dyn ContentSniffer>,
    mutator: Arc<dyn EntityMutator>,
}

impl UpdateMerger {
    /// Creates a merger from its collaborators.
    pub fn new(
        stager: Arc<dyn Stager>,
        lookup: Arc<dyn EntityLookup>,
        sniffer: Arc<dyn ContentSniffer>,
        mutator: Arc<dyn EntityMutator>,
    ) -> Self {
        Self {
            stager,
            lookup,
            sniffer,
            mutator,
        }
    }

    /// Stages, classifies and applies one update.
    ///
    /// The staged artifact is released before this returns, and also when the
    /// returned future is dropped before completion.
    pub async fn merge_update(&self, request: UpdateRequest) -> MergeResult<MergeOutcome> {
        let UpdateRequest {
            project_id,
            path,
            content,
            source,
            actor_id,
        } = request;

        let artifact = self.stager.stage(project_id, content).await?;
        let guard = StagedGuard::new(Arc::clone(&self.stager), artifact);

        let result = self
            .merge_staged(actor_id, project_id, &path, guard.artifact(), &source)
            .await;

        guard.release().await;
        result
    }

    /// Applies an update whose content the caller has already staged.
    ///
    /// The caller keeps ownership of `artifact` and is responsible for
    /// releasing it.
    pub async fn merge_staged(
        &self,
        actor_id: UserId,
        project_id: ProjectId,
        path: &str,
        artifact: &StagedArtifact,
        source: &SourceTag,
    ) -> MergeResult<MergeOutcome> {
        // Read live every time; the tree may have changed since the last update.
        let existing = self.lookup.existing_kind(project_id, path).await?;
        let kind = classify(self.sniffer.as_ref(), path, artifact, existing).await?;

        match kind {
            EntityKind::BinaryFile => {
                let file = self
                    .mutator
                    .upsert_binary_file(project_id, path, artifact, source, actor_id)
                    .await?;
                info!(
                    "Merged binary file {} into project {} (rev {}, source {})",
                    path, project_id, file.revision, source
                );
                Ok(MergeOutcome::from_upsert(EntityKind::BinaryFile, file))
            }
            EntityKind::Document => {
                let lines = read_lines(artifact).await?;
                debug!("Processing doc update for {} ({} lines)", path, lines.len());
                let doc = self
                    .mutator
                    .upsert_document(project_id, path, lines, source, actor_id)
                    .await?;
                info!(
                    "Merged document {} into project {} (rev {}, source {})",
                    path, project_id, doc.revision, source
                );
                Ok(MergeOutcome::from_upsert(EntityKind::Document, doc))
            }
            other => {
                error!(
                    "Unrecognized file kind {:?} for {} in project {}",
                    other, path, project_id
                );
                Err(MergeError::UnrecognizedFile {
                    path: path.to_string(),
                })
            }
        }
    }

    /// Deletes whatever entity sits at the request's path.
    ///
    /// Never fails. A delete that the store rejects (already gone, raced
    /// with another change, storage error) is logged at warn level.
    pub async fn delete_update(&self, request: DeleteRequest) {
        let DeleteRequest {
            project_id,
            path,
            source,
            actor_id,
        } = request;

        match self
            .mutator
            .delete_entity_at_path(project_id, &path, &source, actor_id)
            .await
        {
            Ok(()) => {
                info!("Deleted {} from project {} (source {})", path, project_id, source);
            }
            Err(e) => {
                warn!(
                    "Failed to delete entity {} in project {} (user {}, source {}): {}",
                    path, project_id, actor_id, source, e
                );
            }
        }
    }
}
