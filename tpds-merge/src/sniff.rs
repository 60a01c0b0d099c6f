//! Content sniffing capability.
//!
//! The heuristics that decide whether bytes look binary, and which text
//! encoding they use, live outside this crate. The merger only consumes the
//! verdict.

use crate::error::SniffError;
use crate::staging::StagedArtifact;
use async_trait::async_trait;
use tpds_types::EntityKind;

/// The only encoding that can be stored faithfully as a document.
pub const UTF8: &str = "utf-8";

/// What the sniffer concluded about a staged artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedType {
    /// Whether the content looks binary.
    pub binary: bool,
    /// Detected text encoding, e.g. `"utf-8"` or `"latin1"`.
    pub encoding: String,
}

impl DetectedType {
    pub fn new(binary: bool, encoding: impl Into<String>) -> Self {
        Self {
            binary,
            encoding: encoding.into(),
        }
    }

    /// Plain UTF-8 text.
    pub fn utf8_text() -> Self {
        Self::new(false, UTF8)
    }

    /// Whether the content must be stored as an opaque binary file.
    ///
    /// Text in any encoding other than UTF-8 cannot round-trip through a
    /// document and counts as binary.
    pub fn is_binary(&self) -> bool {
        self.binary || self.encoding != UTF8
    }
}

/// Inspects staged content to detect binary-ness and encoding.
#[async_trait]
pub trait ContentSniffer: Send + Sync {
    async fn sniff(
        &self,
        path: &str,
        artifact: &StagedArtifact,
        existing: Option<EntityKind>,
    ) -> Result<DetectedType, SniffError>;
}
