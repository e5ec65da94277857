//! Render-budget rules shared by the checklist aggregate and codec consumers.
//!
//! All lengths are counted in Unicode scalar values, not bytes: the rendering
//! target enforces its message limit per character, and the display glyphs
//! (`☑`, `☐`) are multi-byte in UTF-8.

/// Maximum character length of a fully rendered checklist message.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Maximum character length of a checklist name, so the name still fits
/// inside downstream surfaces such as an edit-dialog title.
pub const MAX_NAME_CHARS: usize = 38;

/// Character count of `text` as the rendering target measures it.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
