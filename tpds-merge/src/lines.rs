//! Newline normalization for document content.
//!
//! Documents are stored as ordered lines, not raw bytes, so every update is
//! split on `\r\n`, `\n` and `\r` alike.

use crate::error::StagingError;
use crate::staging::StagedArtifact;

/// Splits text into lines on any of `\r\n`, `\n` or `\r`.
///
/// Separators are not kept. Empty input yields a single empty line, and a
/// trailing separator yields a trailing empty line.
pub fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;
    while let Some(idx) = rest.find(['\r', '\n']) {
        lines.push(rest[..idx].to_string());
        let sep_len = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[idx + sep_len..];
    }
    lines.push(rest.to_string());
    lines
}

/// Reads a staged artifact as text and splits it into lines.
///
/// Invalid UTF-8 sequences are replaced rather than rejected; the classifier
/// has already routed non-UTF-8 content to binary storage.
pub async fn read_lines(artifact: &StagedArtifact) -> Result<Vec<String>, StagingError> {
    let bytes = tokio::fs::read(artifact.path()).await?;
    Ok(split_lines(&String::from_utf8_lossy(&bytes)))
}
