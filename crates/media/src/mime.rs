//! Content-type helpers and the default magic-byte detector.

use async_trait::async_trait;

use crate::{Result, capabilities::MimeDetector};

/// Sniffs MIME types from file signatures via the `infer` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferMimeDetector;

#[async_trait]
impl MimeDetector for InferMimeDetector {
    async fn detect_mime(&self, buffer: &[u8]) -> Result<Option<String>> {
        Ok(infer::get(buffer).map(|kind| kind.mime_type().to_string()))
    }
}

/// Strip parameters and lowercase: `"Image/PNG; q=1"` becomes `"image/png"`.
#[must_use]
pub fn normalize_content_type(content_type: &str) -> Option<String> {
    let base = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    (!base.is_empty()).then(|| base.to_ascii_lowercase())
}

/// File extension used when storing media of the given content type.
#[must_use]
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    let base = normalize_content_type(content_type).unwrap_or_default();
    match base.as_str() {
        "audio/webm" => "webm",
        "audio/ogg" | "audio/opus" => "ogg",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/aac" => "aac",
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" => "m4a",
        "audio/wav" | "audio/x-wav" => "wav",
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/heic" => "heic",
        "video/mp4" => "mp4",
        "application/pdf" => "pdf",
        "application/zip" => "zip",
        "text/plain" => "txt",
        _ => "bin",
    }
}
