//! Inbound media resolution.
//!
//! Turns the attachment reference of an [`InboundMessage`] into a persisted
//! [`MediaInfo`]. Every failure is contained here: callers get an empty list
//! and the cause goes to the log sink.

use std::sync::Arc;

use {
    serde::{Deserialize, Serialize},
    tokio_util::sync::CancellationToken,
    tracing::{debug, warn},
};

use crate::{
    Error, Result,
    capabilities::{MediaCapabilities, MediaDirection},
    config::MediaConfig,
    download::{DownloadResult, Downloader},
    kind::MediaKind,
    message::InboundMessage,
    placeholder::placeholder_for,
};

/// Optional per-resolver diagnostic callback, one line per call.
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// A downloaded and persisted attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    /// Storage path assigned by the persister.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Text stand-in such as `<media:image>`; never empty.
    pub placeholder: String,
}

/// Resolves message attachments through injected capabilities.
#[derive(Clone)]
pub struct MediaResolver {
    downloader: Downloader,
    capabilities: MediaCapabilities,
    log: Option<LogSink>,
}

impl std::fmt::Debug for MediaResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaResolver")
            .field("downloader", &self.downloader)
            .field("capabilities", &self.capabilities)
            .field("log", &self.log.is_some())
            .finish()
    }
}

impl MediaResolver {
    #[must_use]
    pub fn new(capabilities: MediaCapabilities) -> Self {
        Self {
            downloader: Downloader::new(),
            capabilities,
            log: None,
        }
    }

    /// Resolver whose downloader honours the configured timeout and user agent.
    pub fn from_config(config: &MediaConfig, capabilities: MediaCapabilities) -> Result<Self> {
        let downloader = Downloader::configured(config.timeout(), &config.user_agent)?;
        Ok(Self::new(capabilities).with_downloader(downloader))
    }

    #[must_use]
    pub fn with_downloader(mut self, downloader: Downloader) -> Self {
        self.downloader = downloader;
        self
    }

    #[must_use]
    pub fn with_log_sink(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.log = Some(Arc::new(sink));
        self
    }

    /// Download, type and persist the message's attachment.
    ///
    /// Returns an empty list without touching the network when the message has
    /// no media URL or its type is not one of image, voice, audio or file. Any
    /// failure after that also yields an empty list.
    pub async fn resolve(&self, message: &InboundMessage, max_bytes: u64) -> Vec<MediaInfo> {
        let Some(url) = eligible_url(message) else {
            return Vec::new();
        };
        let outcome = self.try_resolve(message, url, max_bytes).await;
        self.finish(url, outcome)
    }

    /// Like [`Self::resolve`], but gives up as soon as `cancel` fires. A
    /// cancelled resolution is logged and returns an empty list.
    pub async fn resolve_with_cancel(
        &self,
        message: &InboundMessage,
        max_bytes: u64,
        cancel: &CancellationToken,
    ) -> Vec<MediaInfo> {
        let Some(url) = eligible_url(message) else {
            return Vec::new();
        };
        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Error::Cancelled),
            result = self.try_resolve(message, url, max_bytes) => result,
        };
        self.finish(url, outcome)
    }

    async fn try_resolve(
        &self,
        message: &InboundMessage,
        url: &str,
        max_bytes: u64,
    ) -> Result<MediaInfo> {
        self.log(&format!("downloading media from {url}"));

        let DownloadResult {
            buffer,
            content_type,
        } = self.downloader.download(url, max_bytes).await?;

        // Transport header, then the sender's declaration, then sniffing.
        let declared = content_type.or_else(|| {
            message
                .mime_type
                .clone()
                .filter(|mime| !mime.trim().is_empty())
        });
        let content_type = match declared {
            Some(content_type) => Some(content_type),
            None => self
                .capabilities
                .mime
                .detect_mime(&buffer)
                .await
                .map_err(|e| Error::Detect {
                    source: Box::new(e),
                })?,
        };

        self.log(&format!(
            "detected content type: {}, size: {} bytes",
            content_type.as_deref().unwrap_or("unknown"),
            buffer.len()
        ));

        let saved = self
            .capabilities
            .persister
            .save_media_buffer(
                buffer,
                content_type.as_deref(),
                MediaDirection::Inbound,
                max_bytes,
            )
            .await?;

        self.log(&format!("saved media to {}", saved.path));

        Ok(MediaInfo {
            path: saved.path,
            content_type: saved.content_type,
            placeholder: placeholder_for(&message.message_type).to_string(),
        })
    }

    fn finish(&self, url: &str, outcome: Result<MediaInfo>) -> Vec<MediaInfo> {
        match outcome {
            Ok(info) => {
                #[cfg(feature = "metrics")]
                metrics::counter!(crate::metrics::RESOLVED_TOTAL).increment(1);
                vec![info]
            },
            Err(e) => {
                warn!(url, reason = e.reason(), error = %e, "failed to resolve media");
                self.log(&format!("failed to resolve media: {e}"));
                #[cfg(feature = "metrics")]
                metrics::counter!(crate::metrics::RESOLVE_FAILURES_TOTAL, "reason" => e.reason())
                    .increment(1);
                Vec::new()
            },
        }
    }

    fn log(&self, line: &str) {
        debug!("{line}");
        if let Some(sink) = &self.log {
            sink(&format!("media: {line}"));
        }
    }
}

fn eligible_url(message: &InboundMessage) -> Option<&str> {
    let url = message.media_url.as_deref().filter(|url| !url.is_empty())?;
    MediaKind::from_message_type(&message.message_type).map(|_| url)
}
