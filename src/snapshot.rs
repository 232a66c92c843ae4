use std::path::{Path, PathBuf};

use crate::models::ContentSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Two-space indented JSON, no trailing newline.
pub fn render_snapshot(snapshot: &ContentSnapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Where a finished snapshot ends up.
pub trait SnapshotSink {
    async fn write(&self, snapshot: &ContentSnapshot) -> Result<(), SnapshotError>;
}

/// Replaces the file at `path` in full on every write.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSink for FileSink {
    async fn write(&self, snapshot: &ContentSnapshot) -> Result<(), SnapshotError> {
        // Render before opening the file so a bad snapshot never truncates a good one.
        let json = render_snapshot(snapshot)?;
        tokio::fs::write(&self.path, json.as_bytes())
            .await
            .map_err(|source| SnapshotError::Write {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), bytes = json.len(), "snapshot written");
        Ok(())
    }
}
