//! Metric names recorded when the `metrics` feature is enabled.

/// Total number of successful media downloads
pub const DOWNLOADS_TOTAL: &str = "courier_media_downloads_total";
/// Total bytes received by successful downloads
pub const DOWNLOAD_BYTES_TOTAL: &str = "courier_media_download_bytes_total";
/// Attachments resolved and persisted
pub const RESOLVED_TOTAL: &str = "courier_media_resolved_total";
/// Resolutions that ended empty, labelled by `reason`
pub const RESOLVE_FAILURES_TOTAL: &str = "courier_media_resolve_failures_total";
