use std::error::Error as StdError;

use crate::download::DownloadError;

/// Crate-wide result type for media operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised anywhere in the media pipeline.
///
/// [`crate::MediaResolver`] converts every variant into an empty result; the
/// type exists so capability implementations and the internal pipeline can
/// use `?` and so the cause can be logged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fetching the remote media failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Input buffer or parameter is invalid.
    #[error("{message}")]
    InvalidInput { message: String },

    /// Wrapped source error from a capability implementation.
    #[error("{context}: {source}")]
    External {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Content sniffing failed.
    #[error("failed to detect content type: {source}")]
    Detect {
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or is invalid.
    #[error("invalid media config: {message}")]
    Config { message: String },

    /// The caller cancelled the resolution.
    #[error("media resolution cancelled")]
    Cancelled,
}

impl Error {
    #[must_use]
    pub fn external<E>(context: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::External {
            context: context.into(),
            source: Box::new(source),
        }
    }

    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn config(message: impl std::fmt::Display) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Short label for the failure, used as a metrics label.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Download(e) => e.reason(),
            Self::Detect { .. } => "detect",
            Self::InvalidInput { .. } | Self::External { .. } | Self::Io(_) => "persist",
            Self::Config { .. } => "config",
            Self::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_errors_keep_their_message() {
        let err = Error::from(DownloadError::SizeExceeded {
            size: 2_000_000,
            max_bytes: 1_000_000,
        });
        assert_eq!(
            err.to_string(),
            "media too large: 2000000 bytes exceeds limit of 1000000 bytes"
        );
        assert_eq!(err.reason(), "size");
    }

    #[test]
    fn external_includes_context() {
        let io = std::io::Error::other("disk full");
        let err = Error::external("failed to write media", io);
        assert_eq!(err.to_string(), "failed to write media: disk full");
    }
}
