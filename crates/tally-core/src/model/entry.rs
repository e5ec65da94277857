//! A single checkable entry.

use crate::policy;

/// One line of a checklist: free-text content plus a checked flag.
///
/// An entry has no identity of its own; it is addressed by its position
/// (index) inside the owning [`Checklist`](super::Checklist), and that
/// position is only valid until the next structural mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// User-provided text. Must not contain `\n`, which is the line
    /// separator of the edit encoding.
    pub content: String,
    /// Whether the entry is ticked off.
    pub checked: bool,
}

impl Entry {
    /// Create an unchecked entry.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        debug_assert!(!content.contains('\n'), "entry content must be single-line");
        Self {
            content,
            checked: false,
        }
    }

    /// Create an already-checked entry.
    #[must_use]
    pub fn checked(content: impl Into<String>) -> Self {
        Self {
            checked: true,
            ..Self::new(content)
        }
    }

    /// The display form of this entry, newline-terminated.
    #[must_use]
    pub fn display_line(&self) -> String {
        format_line(&self.content, self.checked)
    }

    /// Worst-case character cost of this entry in a rendered checklist.
    ///
    /// This is the length of the *checked* display form, which is the longer
    /// of the two. Budget checks use it so that toggling the checked flag
    /// later can never push a validated checklist past the limit.
    #[must_use]
    pub fn budget_chars(&self) -> usize {
        policy::char_len(&format_line(&self.content, true))
    }
}

/// Render one line of display text for `content` in the given checked state.
#[must_use]
pub fn format_line(content: &str, checked: bool) -> String {
    if checked {
        format!("☑  ~~{content}~~\n")
    } else {
        format!("☐  {content}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;

    #[test]
    fn display_line_uses_box_and_strikethrough_forms() {
        assert_eq!(Entry::new("do something").display_line(), "☐  do something\n");
        assert_eq!(Entry::checked("done").display_line(), "☑  ~~done~~\n");
    }

    #[test]
    fn budget_is_checked_form_regardless_of_state() {
        let unchecked = Entry::new("milk");
        let checked = Entry::checked("milk");
        assert_eq!(unchecked.budget_chars(), checked.budget_chars());
        assert_eq!(
            unchecked.budget_chars(),
            checked.display_line().chars().count()
        );
        assert!(unchecked.budget_chars() > unchecked.display_line().chars().count());
    }
}
