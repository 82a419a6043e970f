//! Plain-text checkpoint file
//!
//! The file holds a single decimal integer. Writes go to a sibling temp file that is
//! then renamed over the target, so a reader never sees a half-written value.

use crate::adapters::database::traits::CheckpointStore;
use crate::domain::{Result, SequenceNumber, SyncError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File-backed [`CheckpointStore`]
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    /// Create a store for `path`; nothing is touched until the first load or save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Checkpoint file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn load(&self) -> Result<Option<SequenceNumber>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Checkpoint file not found");
                return Ok(None);
            }
            Err(e) => {
                return Err(SyncError::Checkpoint(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        SequenceNumber::from_str(&contents).map(Some).map_err(|e| {
            SyncError::Checkpoint(format!("Malformed checkpoint in {}: {e}", self.path.display()))
        })
    }

    async fn save(&self, value: SequenceNumber) -> Result<()> {
        let io_err = |action: &str, e: std::io::Error| {
            SyncError::Checkpoint(format!("Failed to {action} {}: {e}", self.path.display()))
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| io_err("create parent directory of", e))?;
            }
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, value.to_string())
            .await
            .map_err(|e| io_err("write temp file for", e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| io_err("replace", e))?;

        tracing::debug!(path = %self.path.display(), checkpoint = %value, "Checkpoint file written");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_is_sibling() {
        let store = FileCheckpointStore::new("/var/lib/ordersync/last.txt");
        assert_eq!(
            store.temp_path(),
            PathBuf::from("/var/lib/ordersync/last.txt.tmp")
        );
        assert_eq!(store.describe(), "file /var/lib/ordersync/last.txt");
    }

    #[tokio::test]
    async fn test_malformed_contents_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.txt");
        std::fs::write(&path, "not-a-number").unwrap();

        let store = FileCheckpointStore::new(&path);
        assert!(matches!(store.load().await, Err(SyncError::Checkpoint(_))));
    }
}
