use std::path::{Path, PathBuf};

use {async_trait::async_trait, bytes::Bytes, tracing::debug};

use crate::{
    Error, Result,
    capabilities::{MediaDirection, MediaPersister, SavedMedia},
    mime::{extension_for_content_type, normalize_content_type},
};

/// Saves media under `<root>/<direction>/` with UUID-based naming.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl MediaPersister for LocalMediaStore {
    async fn save_media_buffer(
        &self,
        buffer: Bytes,
        content_type: Option<&str>,
        direction: MediaDirection,
        max_bytes: u64,
    ) -> Result<SavedMedia> {
        let size = buffer.len() as u64;
        if size > max_bytes {
            return Err(Error::invalid_input(format!(
                "media too large to store: {size} bytes exceeds limit of {max_bytes} bytes"
            )));
        }

        let content_type = content_type.and_then(normalize_content_type);
        let ext = extension_for_content_type(content_type.as_deref().unwrap_or_default());

        let dir = self.root.join(direction.as_str());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| Error::external(format!("failed to create {}", dir.display()), e))?;

        let path = dir.join(format!("{}.{ext}", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, &buffer)
            .await
            .map_err(|e| Error::external(format!("failed to write {}", path.display()), e))?;

        debug!(path = %path.display(), bytes = size, "stored media");

        Ok(SavedMedia {
            path: path.to_string_lossy().into_owned(),
            content_type,
        })
    }
}
