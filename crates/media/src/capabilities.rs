//! Host capabilities the resolver depends on, passed in explicitly.

use std::{path::PathBuf, sync::Arc};

use {async_trait::async_trait, bytes::Bytes, serde::Serialize};

use crate::{Result, mime::InferMimeDetector, store::LocalMediaStore};

/// Which way a persisted buffer travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaDirection {
    Inbound,
    Outbound,
}

impl MediaDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }
}

impl std::fmt::Display for MediaDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a persister put a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMedia {
    /// Canonical storage path.
    pub path: String,
    /// Content type as recorded by the persister, possibly normalized.
    pub content_type: Option<String>,
}

/// Best-effort content sniffing from raw bytes.
#[async_trait]
pub trait MimeDetector: Send + Sync {
    /// `Ok(None)` when the bytes match no known signature.
    async fn detect_mime(&self, buffer: &[u8]) -> Result<Option<String>>;
}

/// Durable storage for downloaded media.
#[async_trait]
pub trait MediaPersister: Send + Sync {
    /// Store `buffer` and return its canonical location.
    ///
    /// The returned content type is authoritative over whatever the caller
    /// passed in.
    async fn save_media_buffer(
        &self,
        buffer: Bytes,
        content_type: Option<&str>,
        direction: MediaDirection,
        max_bytes: u64,
    ) -> Result<SavedMedia>;
}

/// Capability bundle handed to [`crate::MediaResolver`].
#[derive(Clone)]
pub struct MediaCapabilities {
    pub mime: Arc<dyn MimeDetector>,
    pub persister: Arc<dyn MediaPersister>,
}

impl std::fmt::Debug for MediaCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaCapabilities").finish_non_exhaustive()
    }
}

impl MediaCapabilities {
    #[must_use]
    pub fn new(mime: Arc<dyn MimeDetector>, persister: Arc<dyn MediaPersister>) -> Self {
        Self { mime, persister }
    }

    /// Magic-byte sniffing plus a filesystem store rooted at `root`.
    #[must_use]
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(InferMimeDetector),
            Arc::new(LocalMediaStore::new(root)),
        )
    }
}
