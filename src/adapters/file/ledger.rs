//! JSON-lines skip ledger file

use crate::core::sync::summary::SkipRecord;
use crate::domain::{Result, SyncError};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Appends skip records to a file, one JSON object per line
#[derive(Debug, Clone)]
pub struct SkipLedgerFile {
    path: PathBuf,
}

impl SkipLedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `records`, creating the file and its parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn append(&self, records: &[SkipRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut buf = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buf, record)?;
            buf.push(b'\n');
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                SyncError::Io(format!("Failed to open {}: {e}", self.path.display()))
            })?;
        file.write_all(&buf).await?;
        file.flush().await?;

        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            "Skip ledger updated"
        );
        Ok(records.len())
    }
}
