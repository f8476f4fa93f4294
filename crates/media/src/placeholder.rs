/// Placeholder text standing in for an attachment of the given message type.
///
/// Total: unknown types get the generic `<media:file>` token.
#[must_use]
pub fn placeholder_for(message_type: &str) -> &'static str {
    match message_type {
        "image" => "<media:image>",
        "voice" => "<media:voice>",
        "audio" => "<media:audio>",
        "file" => "<media:document>",
        _ => "<media:file>",
    }
}
