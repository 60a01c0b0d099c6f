//! Decides whether an update becomes a document or a binary file.
//!
//! | existing | detected binary | result |
//! |----------|-----------------|--------|
//! | file     | any             | file   |
//! | doc      | yes             | file   |
//! | doc      | no              | doc    |
//! | none     | yes             | file   |
//! | none     | no              | doc    |

use crate::error::SniffError;
use crate::sniff::{ContentSniffer, DetectedType};
use crate::staging::StagedArtifact;
use tpds_types::EntityKind;
use tracing::debug;

/// Pure decision table over the existing kind and the sniffer's verdict.
pub fn target_kind(existing: Option<EntityKind>, detected: &DetectedType) -> EntityKind {
    // Binary is sticky: text-looking content never turns a file back into a doc.
    if existing == Some(EntityKind::BinaryFile) {
        return EntityKind::BinaryFile;
    }
    if detected.is_binary() {
        EntityKind::BinaryFile
    } else {
        EntityKind::Document
    }
}

/// Classifies a staged update.
///
/// The sniffer is not consulted when a binary file already exists at `path`.
pub async fn classify(
    sniffer: &dyn ContentSniffer,
    path: &str,
    artifact: &StagedArtifact,
    existing: Option<EntityKind>,
) -> Result<EntityKind, SniffError> {
    if existing == Some(EntityKind::BinaryFile) {
        debug!("Keeping {} as a binary file", path);
        return Ok(EntityKind::BinaryFile);
    }

    let detected = sniffer.sniff(path, artifact, existing).await?;
    let kind = target_kind(existing, &detected);
    debug!(
        "Classified {} as {} (binary={}, encoding={}, existing={:?})",
        path, kind, detected.binary, detected.encoding, existing
    );
    Ok(kind)
}
