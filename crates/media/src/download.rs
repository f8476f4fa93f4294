//! Bounded single-shot HTTP download.
//!
//! The byte budget is enforced twice: against the declared `Content-Length`
//! before any body byte is read, and against the bytes actually received.
//! The second check covers absent or understated headers and chunked bodies.

use std::time::Duration;

use {
    bytes::{Bytes, BytesMut},
    reqwest::{Client, Url, header::CONTENT_TYPE},
    tracing::debug,
};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("courier/", env!("CARGO_PKG_VERSION"));

/// Failures raised by [`Downloader::download`].
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The URL does not parse or uses a scheme other than http/https.
    #[error("invalid media url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("failed to download media: {status} {status_text}")]
    Transport { status: u16, status_text: String },

    /// Declared or received length is over the byte budget.
    #[error("media too large: {size} bytes exceeds limit of {max_bytes} bytes")]
    SizeExceeded { size: u64, max_bytes: u64 },

    /// The configured request deadline elapsed.
    #[error("media download timed out")]
    TimedOut,

    /// Connection-level failure (refused, reset, malformed response).
    #[error("media request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimedOut
        } else {
            Self::Request(err)
        }
    }
}

impl DownloadError {
    /// Short label for the failure, used as a metrics label.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::Transport { .. } => "transport",
            Self::SizeExceeded { .. } => "size",
            Self::TimedOut => "timeout",
            Self::Request(_) => "request",
        }
    }
}

/// Body and transport-declared content type of a completed download.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub buffer: Bytes,
    /// `Content-Type` response header, if present and non-empty.
    pub content_type: Option<String>,
}

/// Performs one unauthenticated GET per call. No retries.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    /// Downloader with a default client and no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Wrap an existing client (shared connection pool, custom TLS, proxies).
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Downloader whose requests fail with [`DownloadError::TimedOut`] once
    /// `timeout` has elapsed, body included.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DownloadError> {
        Self::configured(Some(timeout), DEFAULT_USER_AGENT)
    }

    pub fn configured(timeout: Option<Duration>, user_agent: &str) -> Result<Self, DownloadError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch `url`, refusing anything larger than `max_bytes`.
    pub async fn download(&self, url: &str, max_bytes: u64) -> Result<DownloadResult, DownloadError> {
        let parsed = parse_media_url(url)?;
        debug!(url, max_bytes, "downloading media");

        let mut response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Transport {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let declared = response.content_length();
        if let Some(size) = declared
            && size > max_bytes
        {
            debug!(url, size, max_bytes, "declared length over budget, skipping body");
            return Err(DownloadError::SizeExceeded { size, max_bytes });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToOwned::to_owned);

        let capacity = declared
            .and_then(|size| usize::try_from(size).ok())
            .unwrap_or_default();
        let mut buffer = BytesMut::with_capacity(capacity);
        while let Some(chunk) = response.chunk().await? {
            let received = (buffer.len() + chunk.len()) as u64;
            if received > max_bytes {
                debug!(url, received, max_bytes, "body over budget, aborting read");
                return Err(DownloadError::SizeExceeded {
                    size: received,
                    max_bytes,
                });
            }
            buffer.extend_from_slice(&chunk);
        }

        debug!(
            url,
            status = status.as_u16(),
            declared,
            bytes = buffer.len(),
            content_type = content_type.as_deref(),
            "downloaded media"
        );

        #[cfg(feature = "metrics")]
        {
            metrics::counter!(crate::metrics::DOWNLOADS_TOTAL).increment(1);
            metrics::counter!(crate::metrics::DOWNLOAD_BYTES_TOTAL).increment(buffer.len() as u64);
        }

        Ok(DownloadResult {
            buffer: buffer.freeze(),
            content_type,
        })
    }
}

fn parse_media_url(url: &str) -> Result<Url, DownloadError> {
    let parsed = Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}
