//! On-disk access to the Xray configuration document.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::document::schema::XrayDocument;

/// Errors from reading or writing the document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("error reading config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("error encoding config: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("error writing config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads and persists the document at a fixed path.
///
/// Holds no lock; callers that read-modify-write must serialize themselves.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document.
    pub async fn load(&self) -> Result<XrayDocument, DocumentError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| DocumentError::Read {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| DocumentError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the document on disk.
    ///
    /// The payload goes to a temporary sibling which is then renamed over the
    /// target, so readers see either the old or the new document in full.
    pub async fn save(&self, document: &XrayDocument) -> Result<(), DocumentError> {
        let payload = serde_json::to_vec_pretty(document).map_err(DocumentError::Encode)?;

        // Follow a symlinked config so the link itself survives the rename.
        let target = match tokio::fs::canonicalize(&self.path).await {
            Ok(resolved) => resolved,
            Err(_) => self.path.clone(),
        };
        let temp_path = temp_sibling(&target);

        let write_err = |source: std::io::Error| DocumentError::Write {
            path: target.clone(),
            source,
        };

        tokio::fs::write(&temp_path, &payload)
            .await
            .map_err(write_err)?;

        if let Ok(metadata) = tokio::fs::metadata(&target).await {
            if let Err(e) = tokio::fs::set_permissions(&temp_path, metadata.permissions()).await {
                let _ = tokio::fs::remove_file(&temp_path).await;
                return Err(write_err(e));
            }
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &target).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(write_err(e));
        }

        tracing::debug!(path = %target.display(), bytes = payload.len(), "Config document saved");
        Ok(())
    }
}

fn temp_sibling(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config.json".to_string());
    target.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()))
}
