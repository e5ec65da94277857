//! The checklist aggregate: an ordered, named container of entries.
//!
//! All mutating operations validate first and only then mutate, so a
//! rejected call leaves the checklist exactly as it was. Positions are the
//! indices of the entry vector, which keeps them dense (`0..n-1`) by
//! construction; callers must re-resolve positions after any structural
//! mutation.

use std::collections::BTreeSet;

use tracing::debug;

use crate::codec;
use crate::error::{Error, Result};
use crate::model::Entry;
use crate::policy;
use crate::target::MessageRef;

/// A named, ordered list of checkable entries scoped to one guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    guild_id: i64,
    name: String,
    message_ref: MessageRef,
    entries: Vec<Entry>,
}

/// Outcome of a lenient positional delete: which requested positions were
/// removed and which were out of range, both in ascending request order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoveReport {
    pub deleted: Vec<i64>,
    pub ignored: Vec<i64>,
}

impl Checklist {
    /// Create an empty checklist bound to the message its render lives in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NameTooLong`] if the name exceeds the name budget.
    /// Name uniqueness inside the guild is the store's concern, not this
    /// constructor's.
    pub fn new(guild_id: i64, name: impl Into<String>, message_ref: MessageRef) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        debug!(guild_id, name = %name, %message_ref, "new checklist");
        Ok(Self {
            guild_id,
            name,
            message_ref,
            entries: Vec::new(),
        })
    }

    /// Rehydrate a checklist from stored parts. The caller guarantees the
    /// parts were persisted by a validated checklist, so no budget or name
    /// checks are repeated here.
    pub(crate) fn from_parts(
        guild_id: i64,
        name: String,
        message_ref: MessageRef,
        entries: Vec<Entry>,
    ) -> Self {
        Self {
            guild_id,
            name,
            message_ref,
            entries,
        }
    }

    #[must_use]
    pub const fn guild_id(&self) -> i64 {
        self.guild_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn message_ref(&self) -> MessageRef {
        self.message_ref
    }

    /// Entries in position order; the index of each entry is its position.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Give the checklist a new name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NameTooLong`] if the new name exceeds the name
    /// budget, or [`Error::RenderTooLarge`] if a longer name would push the
    /// rendered message past the message budget.
    pub fn rename(&mut self, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        validate_name(&new_name)?;
        let would_be = policy::char_len(&header(&new_name)) + self.entries_budget();
        if would_be > policy::MAX_MESSAGE_CHARS {
            return Err(Error::RenderTooLarge {
                would_be,
                max: policy::MAX_MESSAGE_CHARS,
            });
        }
        debug!(old = %self.name, new = %new_name, "renamed checklist");
        self.name = new_name;
        Ok(())
    }

    /// Append an entry at the end (position `len`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderTooLarge`] if the entry's worst-case (checked)
    /// render would push the message past the budget; the checklist is left
    /// unchanged.
    pub fn push(&mut self, entry: Entry) -> Result<()> {
        let would_be = self.budget_chars() + entry.budget_chars();
        if would_be > policy::MAX_MESSAGE_CHARS {
            return Err(Error::RenderTooLarge {
                would_be,
                max: policy::MAX_MESSAGE_CHARS,
            });
        }
        debug!(
            name = %self.name,
            position = self.entries.len(),
            "pushed entry"
        );
        self.entries.push(entry);
        Ok(())
    }

    /// Atomically replace every entry with `entries`, in the given order.
    ///
    /// This is the bulk-edit path: the previous ordering is discarded and
    /// positions are simply the indices of the new sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderTooLarge`] if the final render would exceed
    /// the message budget; the current entries are kept in that case.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) -> Result<()> {
        let would_be = policy::char_len(&self.header())
            + entries.iter().map(Entry::budget_chars).sum::<usize>();
        if would_be > policy::MAX_MESSAGE_CHARS {
            return Err(Error::RenderTooLarge {
                would_be,
                max: policy::MAX_MESSAGE_CHARS,
            });
        }
        debug!(name = %self.name, count = entries.len(), "replaced entries");
        self.entries = entries;
        Ok(())
    }

    /// Delete the entries at the requested positions, leniently.
    ///
    /// Positions that are out of range (including negative ones) are
    /// reported in [`RemoveReport::ignored`] instead of failing the call.
    /// Duplicates are collapsed. Deletion runs from the highest position
    /// down so earlier removals cannot shift a later target; both report
    /// lists come back ascending.
    pub fn remove_positions(&mut self, positions: &[i64]) -> RemoveReport {
        let requested: BTreeSet<i64> = positions.iter().copied().collect();
        let mut report = RemoveReport::default();
        for &position in requested.iter().rev() {
            match usize::try_from(position)
                .ok()
                .filter(|&index| index < self.entries.len())
            {
                Some(index) => {
                    self.entries.remove(index);
                    report.deleted.push(position);
                }
                None => report.ignored.push(position),
            }
        }
        report.deleted.reverse();
        report.ignored.reverse();
        debug!(
            name = %self.name,
            deleted = ?report.deleted,
            ignored = ?report.ignored,
            "removed entries"
        );
        report
    }

    /// Flip the checked flag of every entry at the requested positions.
    ///
    /// Unlike [`Self::remove_positions`], this validates eagerly: one bad
    /// position rejects the whole call and flips nothing. Toggling never
    /// re-checks the message budget, because every entry was admitted at
    /// its worst-case (checked) length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if any position is negative or
    /// past the last entry.
    pub fn toggle_positions(&mut self, positions: &[i64]) -> Result<()> {
        let requested: BTreeSet<i64> = positions.iter().copied().collect();
        for &position in &requested {
            if !usize::try_from(position).is_ok_and(|index| index < self.entries.len()) {
                return Err(Error::InvalidPosition {
                    position,
                    len: self.entries.len(),
                });
            }
        }
        for &position in &requested {
            if let Ok(index) = usize::try_from(position) {
                self.entries[index].checked = !self.entries[index].checked;
            }
        }
        debug!(name = %self.name, positions = ?requested, "toggled entries");
        Ok(())
    }

    /// Remove every checked entry. Removal only shrinks the render, so this
    /// cannot fail.
    pub fn drop_checked(&mut self) {
        self.entries.retain(|entry| !entry.checked);
        debug!(name = %self.name, remaining = self.entries.len(), "dropped checked entries");
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The full display text: header line, then one display line per entry
    /// in position order.
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = self.header();
        for entry in &self.entries {
            text.push_str(&entry.display_line());
        }
        text
    }

    /// The codec's compact line form of the entries, for bulk editing.
    #[must_use]
    pub fn edit_text(&self) -> String {
        codec::encode_text(&self.entries)
    }

    /// Worst-case character cost of the rendered checklist, assuming every
    /// entry is checked. The actual render is never longer than this.
    #[must_use]
    pub fn budget_chars(&self) -> usize {
        policy::char_len(&self.header()) + self.entries_budget()
    }

    fn entries_budget(&self) -> usize {
        self.entries.iter().map(Entry::budget_chars).sum()
    }

    fn header(&self) -> String {
        header(&self.name)
    }
}

fn header(name: &str) -> String {
    format!("**{name}**\n")
}

fn validate_name(name: &str) -> Result<()> {
    let len = policy::char_len(name);
    if len > policy::MAX_NAME_CHARS {
        return Err(Error::NameTooLong {
            len,
            max: policy::MAX_NAME_CHARS,
        });
    }
    Ok(())
}
