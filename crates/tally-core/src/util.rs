//! Small text utilities.

/// Split `text` into chunks of at most `limit` characters, in order.
///
/// Used for informational replies that may exceed the rendering target's
/// message limit. Splits are counted in characters and never land inside a
/// code point. Empty input yields no chunks.
#[must_use]
pub fn split_chunks(text: &str, limit: usize) -> Vec<String> {
    debug_assert!(limit > 0, "chunk limit must be positive");
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(limit)
            .map_or(rest.len(), |(index, _)| index);
        chunks.push(rest[..cut].to_owned());
        rest = &rest[cut..];
    }
    chunks
}
