use serde::{Deserialize, Serialize};

use crate::resolve::MediaInfo;

/// Flattened media fields for template and context consumers.
///
/// Scalars mirror the first item; sequences mirror the whole list. Fields are
/// left unset rather than holding empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_paths: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_types: Option<Vec<String>>,
}

impl MediaPayload {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Project resolved media into a [`MediaPayload`].
///
/// `MediaUrl`/`MediaUrls` carry the local paths: downstream consumers read
/// media from storage, never from the original remote URL.
#[must_use]
pub fn build_media_payload(media: &[MediaInfo]) -> MediaPayload {
    let Some(first) = media.first() else {
        return MediaPayload::default();
    };

    let paths: Vec<String> = media.iter().map(|m| m.path.clone()).collect();
    let types: Vec<String> = media
        .iter()
        .filter_map(|m| m.content_type.clone())
        .collect();

    MediaPayload {
        media_path: Some(first.path.clone()),
        media_type: first.content_type.clone(),
        media_url: Some(first.path.clone()),
        media_urls: non_empty(paths.clone()),
        media_paths: non_empty(paths),
        media_types: non_empty(types),
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn info(path: &str, content_type: Option<&str>) -> MediaInfo {
        MediaInfo {
            path: path.into(),
            content_type: content_type.map(str::to_string),
            placeholder: "<media:image>".into(),
        }
    }

    #[test]
    fn empty_list_sets_no_fields() {
        let payload = build_media_payload(&[]);
        assert!(payload.is_empty());
        assert_eq!(serde_json::to_value(&payload).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn single_item() {
        let payload = build_media_payload(&[info("a.png", Some("image/png"))]);

        assert_eq!(payload.media_path.as_deref(), Some("a.png"));
        assert_eq!(payload.media_type.as_deref(), Some("image/png"));
        assert_eq!(payload.media_url.as_deref(), Some("a.png"));
        assert_eq!(payload.media_paths, Some(vec!["a.png".to_string()]));
        assert_eq!(payload.media_urls, Some(vec!["a.png".to_string()]));
        assert_eq!(payload.media_types, Some(vec!["image/png".to_string()]));
    }

    #[test]
    fn types_skip_missing_entries() {
        let payload = build_media_payload(&[
            info("a.bin", None),
            info("b.jpg", Some("image/jpeg")),
        ]);

        assert_eq!(payload.media_path.as_deref(), Some("a.bin"));
        assert!(payload.media_type.is_none());
        assert_eq!(
            payload.media_paths,
            Some(vec!["a.bin".to_string(), "b.jpg".to_string()])
        );
        assert_eq!(payload.media_types, Some(vec!["image/jpeg".to_string()]));
    }

    #[test]
    fn all_types_missing_omits_media_types() {
        let payload = build_media_payload(&[info("a.bin", None)]);
        assert!(payload.media_types.is_none());
        assert!(payload.media_type.is_none());
        assert!(!payload.is_empty());
    }

    #[test]
    fn serializes_with_template_keys() {
        let payload = build_media_payload(&[info("a.png", Some("image/png"))]);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "MediaPath": "a.png",
                "MediaType": "image/png",
                "MediaUrl": "a.png",
                "MediaPaths": ["a.png"],
                "MediaUrls": ["a.png"],
                "MediaTypes": ["image/png"],
            })
        );
    }
}
