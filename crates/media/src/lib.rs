//! Inbound media pipeline: bounded download, content-type resolution,
//! persistence through injected capabilities, and payload projection.
//!
//! The entry point is [`MediaResolver`]. It never fails outward: a broken or
//! oversized attachment yields an empty result so the surrounding message can
//! still be processed.

pub mod capabilities;
pub mod config;
pub mod download;
pub mod error;
pub mod kind;
pub mod message;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod mime;
pub mod payload;
pub mod placeholder;
pub mod resolve;
pub mod store;

pub use {
    capabilities::{MediaCapabilities, MediaDirection, MediaPersister, MimeDetector, SavedMedia},
    config::MediaConfig,
    download::{DownloadError, DownloadResult, Downloader},
    error::{Error, Result},
    kind::{MediaKind, classify},
    message::InboundMessage,
    payload::{MediaPayload, build_media_payload},
    placeholder::placeholder_for,
    resolve::{LogSink, MediaInfo, MediaResolver},
};
