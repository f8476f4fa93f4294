use serde::{Deserialize, Serialize};

/// Coarse media category of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Voice,
    Audio,
    File,
}

impl MediaKind {
    /// Message types whose attachments are downloaded.
    pub const ALL: [Self; 4] = [Self::Image, Self::Voice, Self::Audio, Self::File];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Voice => "voice",
            Self::Audio => "audio",
            Self::File => "file",
        }
    }

    /// Parse a message type tag. Anything outside the four media tags
    /// (text, location, sticker...) is `None`.
    #[must_use]
    pub fn from_message_type(message_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == message_type)
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a MIME type to a media category.
///
/// Never returns [`MediaKind::Voice`]: a MIME type cannot tell a voice note
/// from a music file, so that distinction comes only from the message type.
#[must_use]
pub fn classify(mime_type: &str) -> MediaKind {
    if has_prefix(mime_type, "image/") {
        MediaKind::Image
    } else if has_prefix(mime_type, "audio/") {
        MediaKind::Audio
    } else {
        MediaKind::File
    }
}

fn has_prefix(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
