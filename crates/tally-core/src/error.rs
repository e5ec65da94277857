//! Error taxonomy for checklist operations.
//!
//! Every variant is recoverable at the calling layer; the core fails fast
//! and leaves state unchanged, so a caller only needs the variant (or its
//! stable [`code`](Error::code)) to pick a user-facing message.

use crate::target::MessageRef;

/// Result alias for checklist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// All the ways a checklist operation can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A checklist with this name already exists in the guild.
    #[error("a checklist named '{name}' already exists in guild {guild_id}")]
    DuplicateName { guild_id: i64, name: String },

    /// The checklist name exceeds the name budget.
    #[error("checklist name is {len} characters; the maximum is {max}")]
    NameTooLong { len: usize, max: usize },

    /// The operation would push the rendered message past the size budget.
    #[error("rendered checklist would be {would_be} characters; the maximum is {max}")]
    RenderTooLarge { would_be: usize, max: usize },

    /// A position is negative or past the end of the checklist.
    #[error("position {position} is out of range for a checklist of {len} entries")]
    InvalidPosition { position: i64, len: usize },

    /// No checklist with this name exists in the guild.
    #[error("no checklist named '{name}' in guild {guild_id}")]
    NotFound { guild_id: i64, name: String },

    /// More than one checklist matched a by-name lookup. The storage-level
    /// uniqueness constraint should make this impossible; it is surfaced
    /// distinctly rather than silently picking one row.
    #[error("{count} checklists named '{name}' in guild {guild_id}; expected at most one")]
    Ambiguous {
        guild_id: i64,
        name: String,
        count: usize,
    },

    /// The rendering target no longer has the referenced message.
    #[error("message {0} no longer exists at the rendering target")]
    RefNotFound(MessageRef),

    /// The persistence collaborator failed.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl Error {
    /// Stable machine-readable code (`E####`) for this failure, so callers
    /// can translate without matching on variant payloads.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DuplicateName { .. } => "E2001",
            Self::NameTooLong { .. } => "E2002",
            Self::RenderTooLarge { .. } => "E2003",
            Self::InvalidPosition { .. } => "E2004",
            Self::NotFound { .. } => "E2005",
            Self::Ambiguous { .. } => "E2006",
            Self::RefNotFound(_) => "E4001",
            Self::Storage(_) => "E5001",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::target::MessageRef;
    use std::collections::HashSet;

    fn all_variants() -> Vec<Error> {
        vec![
            Error::DuplicateName {
                guild_id: 1,
                name: "groceries".into(),
            },
            Error::NameTooLong { len: 40, max: 38 },
            Error::RenderTooLarge {
                would_be: 2001,
                max: 2000,
            },
            Error::InvalidPosition {
                position: -1,
                len: 3,
            },
            Error::NotFound {
                guild_id: 1,
                name: "groceries".into(),
            },
            Error::Ambiguous {
                guild_id: 1,
                name: "groceries".into(),
                count: 2,
            },
            Error::RefNotFound(MessageRef(9)),
            Error::Storage(rusqlite::Error::InvalidQuery),
        ]
    }

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for err in all_variants() {
            assert!(seen.insert(err.code()), "duplicate code {}", err.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for err in all_variants() {
            let code = err.code();
            assert_eq!(code.len(), 5);
            assert!(code.starts_with('E'));
            assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }
}
