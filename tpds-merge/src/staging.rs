//! Staging of incoming streams to local disk.
//!
//! An update arrives as a byte stream. Before it can be sniffed and stored it
//! is written to a local file (a [`StagedArtifact`]) which belongs to exactly
//! one request and must be removed once that request is done, whatever the
//! outcome. [`StagedGuard`] enforces that.

use crate::config::MergeConfig;
use crate::error::{ReleaseError, StagingError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tpds_types::ProjectId;
use tracing::{debug, warn};
use uuid::Uuid;

/// Incoming update content.
pub type ContentStream = Box<dyn AsyncRead + Send + Unpin>;

/// A locally readable copy of an incoming update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedArtifact {
    path: PathBuf,
}

impl StagedArtifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the staged bytes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Materializes incoming streams and disposes of them afterwards.
#[async_trait]
pub trait Stager: Send + Sync {
    /// Writes `content` somewhere locally readable.
    async fn stage(
        &self,
        project_id: ProjectId,
        content: ContentStream,
    ) -> Result<StagedArtifact, StagingError>;

    /// Deletes a previously staged artifact.
    async fn release(&self, artifact: StagedArtifact) -> Result<(), ReleaseError>;
}

/// Stages updates as files in a local directory.
pub struct FsStager {
    config: MergeConfig,
}

impl FsStager {
    /// Creates a stager writing into `config.staging_dir`.
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.config.staging_dir
    }

    async fn write_limited(&self, path: &Path, content: ContentStream) -> Result<u64, StagingError> {
        let limit = self.config.max_file_size;
        let mut file = fs::File::create(path).await?;
        // One byte past the limit is enough to tell an oversized stream apart.
        let mut limited = content.take(limit.saturating_add(1));
        let written = tokio::io::copy(&mut limited, &mut file).await?;
        if written > limit {
            return Err(StagingError::TooLarge { limit });
        }
        file.flush().await?;
        Ok(written)
    }
}

#[async_trait]
impl Stager for FsStager {
    async fn stage(
        &self,
        project_id: ProjectId,
        content: ContentStream,
    ) -> Result<StagedArtifact, StagingError> {
        fs::create_dir_all(&self.config.staging_dir).await?;
        let partial = PartialFile::new(
            self.config
                .staging_dir
                .join(format!("{project_id}_{}", Uuid::new_v4())),
        );

        let written = self.write_limited(partial.path(), content).await?;
        let path = partial.keep();
        debug!("Staged {} bytes for project {} at {}", written, project_id, path.display());
        Ok(StagedArtifact::new(path))
    }

    async fn release(&self, artifact: StagedArtifact) -> Result<(), ReleaseError> {
        fs::remove_file(artifact.path()).await?;
        Ok(())
    }
}

/// A staging file still being written.
///
/// Removed on drop unless [`PartialFile::keep`] was called, which covers a
/// failed copy as well as a `stage` future dropped mid-stream.
struct PartialFile {
    path: PathBuf,
    keep: bool,
}

impl PartialFile {
    fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn keep(mut self) -> PathBuf {
        self.keep = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed partial staging file {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove partial staging file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// Releases an artifact, logging instead of returning any failure.
pub(crate) async fn release_logged(stager: &dyn Stager, artifact: StagedArtifact) {
    let path = artifact.path().to_path_buf();
    if let Err(e) = stager.release(artifact).await {
        warn!("Failed to release staged artifact {}: {}", path.display(), e);
    }
}

/// Scoped ownership of one staged artifact.
///
/// Call [`StagedGuard::release`] on the normal exit path. If the guard is
/// dropped without that (an early return through `?` that skipped it, an
/// unwinding panic, or the owning future being cancelled) the release is
/// spawned on the current tokio runtime instead. Either way the stager's
/// `release` is invoked exactly once. Builds with `panic = "abort"` never
/// run the drop, so a panic there leaves the file behind.
pub(crate) struct StagedGuard {
    stager: Arc<dyn Stager>,
    artifact: StagedArtifact,
    armed: bool,
}

impl StagedGuard {
    pub(crate) fn new(stager: Arc<dyn Stager>, artifact: StagedArtifact) -> Self {
        Self {
            stager,
            artifact,
            armed: true,
        }
    }

    pub(crate) fn artifact(&self) -> &StagedArtifact {
        &self.artifact
    }

    pub(crate) async fn release(mut self) {
        self.armed = false;
        release_logged(self.stager.as_ref(), self.artifact.clone()).await;
    }
}

impl Drop for StagedGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;

        let stager = Arc::clone(&self.stager);
        let artifact = self.artifact.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("Releasing abandoned staged artifact {}", artifact.path().display());
                handle.spawn(async move {
                    release_logged(stager.as_ref(), artifact).await;
                });
            }
            Err(_) => {
                warn!(
                    "No runtime available to release staged artifact {}",
                    artifact.path().display()
                );
            }
        }
    }
}
