//! The checklist repository: guild/name-scoped lookup plus transactional
//! mutation commits.
//!
//! Every mutating operation runs inside a single SQLite transaction: load
//! the aggregate, apply the checklist operation in memory, write the result
//! back, commit. A rejected operation rolls back, so validation failures
//! leave no partial state behind. Aggregates come back fully materialized
//! (entries in position order); nothing is lazily loaded.

use std::path::Path;

use rusqlite::{Connection, params};
use tracing::debug;

use crate::codec;
use crate::db;
use crate::error::{Error, Result};
use crate::model::{Checklist, Entry, RemoveReport};
use crate::target::MessageRef;

/// SQLite-backed checklist store.
pub struct Store {
    conn: Connection,
}

/// A checklist row together with its storage key.
struct Stored {
    id: i64,
    list: Checklist,
}

impl Store {
    /// Open (or create) a store at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            conn: db::open_store(path)?,
        })
    }

    /// Open an in-memory store, mainly for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be configured or migrated.
    pub fn in_memory() -> anyhow::Result<Self> {
        Ok(Self {
            conn: db::open_memory_store()?,
        })
    }

    /// Create an empty checklist and return its rendered text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if the guild already has a checklist
    /// with this name, or [`Error::NameTooLong`] if the name exceeds the
    /// name budget.
    pub fn create(
        &mut self,
        guild_id: i64,
        name: &str,
        message_ref: MessageRef,
    ) -> Result<String> {
        let tx = self.conn.transaction()?;
        if name_exists(&tx, guild_id, name)? {
            return Err(Error::DuplicateName {
                guild_id,
                name: name.to_owned(),
            });
        }
        let list = Checklist::new(guild_id, name, message_ref)?;
        tx.execute(
            "INSERT INTO checklists (guild_id, name, message_ref) VALUES (?1, ?2, ?3)",
            params![guild_id, list.name(), message_ref.0],
        )?;
        tx.commit()?;
        debug!(guild_id, name, "created checklist");
        Ok(list.render())
    }

    /// Delete a checklist, returning the freed message handle so the caller
    /// can remove the external render.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] or [`Error::Ambiguous`] from lookup.
    pub fn remove(&mut self, guild_id: i64, name: &str) -> Result<MessageRef> {
        let tx = self.conn.transaction()?;
        let stored = load(&tx, guild_id, name)?;
        tx.execute(
            "DELETE FROM checklists WHERE checklist_id = ?1",
            [stored.id],
        )?;
        tx.commit()?;
        debug!(guild_id, name, "removed checklist");
        Ok(stored.list.message_ref())
    }

    /// Rename a checklist and return its re-rendered text.
    ///
    /// Renaming a checklist to its current name is a no-op, not a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if another checklist in the guild
    /// already uses `new_name`, [`Error::NameTooLong`] or
    /// [`Error::RenderTooLarge`] from the aggregate's own checks, or
    /// [`Error::NotFound`]/[`Error::Ambiguous`] from lookup.
    pub fn rename(&mut self, guild_id: i64, name: &str, new_name: &str) -> Result<String> {
        let tx = self.conn.transaction()?;
        let mut stored = load(&tx, guild_id, name)?;
        if new_name != name && name_exists(&tx, guild_id, new_name)? {
            return Err(Error::DuplicateName {
                guild_id,
                name: new_name.to_owned(),
            });
        }
        stored.list.rename(new_name)?;
        save(&tx, stored.id, &stored.list)?;
        tx.commit()?;
        debug!(guild_id, name, new_name, "renamed checklist");
        Ok(stored.list.render())
    }

    /// Append one entry and return the re-rendered text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderTooLarge`] if the entry does not fit the
    /// message budget, or [`Error::NotFound`]/[`Error::Ambiguous`] from
    /// lookup.
    pub fn push_entry(&mut self, guild_id: i64, name: &str, content: &str) -> Result<String> {
        self.with_list(guild_id, name, |list| list.push(Entry::new(content)))
            .map(|((), render)| render)
    }

    /// Delete entries at the given positions, leniently; out-of-range
    /// positions are reported back rather than failing the call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`]/[`Error::Ambiguous`] from lookup.
    pub fn remove_entries(
        &mut self,
        guild_id: i64,
        name: &str,
        positions: &[i64],
    ) -> Result<(RemoveReport, String)> {
        self.with_list(guild_id, name, |list| Ok(list.remove_positions(positions)))
    }

    /// Flip the checked flag at the given positions, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if any position is out of range
    /// (nothing is flipped), or [`Error::NotFound`]/[`Error::Ambiguous`]
    /// from lookup.
    pub fn toggle_entries(
        &mut self,
        guild_id: i64,
        name: &str,
        positions: &[i64],
    ) -> Result<String> {
        self.with_list(guild_id, name, |list| list.toggle_positions(positions))
            .map(|((), render)| render)
    }

    /// Remove every checked entry and return the re-rendered text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`]/[`Error::Ambiguous`] from lookup.
    pub fn drop_checked(&mut self, guild_id: i64, name: &str) -> Result<String> {
        self.with_list(guild_id, name, |list| {
            list.drop_checked();
            Ok(())
        })
        .map(|((), render)| render)
    }

    /// Remove all entries and return the re-rendered text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`]/[`Error::Ambiguous`] from lookup.
    pub fn clear_entries(&mut self, guild_id: i64, name: &str) -> Result<String> {
        self.with_list(guild_id, name, |list| {
            list.clear();
            Ok(())
        })
        .map(|((), render)| render)
    }

    /// The compact edit text of a checklist, for bulk editing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`]/[`Error::Ambiguous`] from lookup.
    pub fn edit_text(&self, guild_id: i64, name: &str) -> Result<String> {
        Ok(load(&self.conn, guild_id, name)?.list.edit_text())
    }

    /// Replace a checklist's entries from edited text and return the
    /// re-rendered result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderTooLarge`] if the edited entries exceed the
    /// message budget (the previous entries are kept), or
    /// [`Error::NotFound`]/[`Error::Ambiguous`] from lookup.
    pub fn apply_edit_text(&mut self, guild_id: i64, name: &str, text: &str) -> Result<String> {
        self.with_list(guild_id, name, |list| {
            list.replace_entries(codec::decode_text(text))
        })
        .map(|((), render)| render)
    }

    /// Fetch a fully materialized checklist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the guild has no checklist with this
    /// name, or [`Error::Ambiguous`] if more than one row matched.
    pub fn fetch(&self, guild_id: i64, name: &str) -> Result<Checklist> {
        Ok(load(&self.conn, guild_id, name)?.list)
    }

    /// All checklists in a guild, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the query fails.
    pub fn guild_lists(&self, guild_id: i64) -> Result<Vec<Checklist>> {
        let mut stmt = self.conn.prepare(
            "SELECT checklist_id, name, message_ref FROM checklists
             WHERE guild_id = ?1 ORDER BY name",
        )?;
        let rows: Vec<(i64, String, i64)> = stmt
            .query_map([guild_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<rusqlite::Result<_>>()?;

        let mut lists = Vec::with_capacity(rows.len());
        for (id, name, message_ref) in rows {
            let entries = load_entries(&self.conn, id)?;
            lists.push(Checklist::from_parts(
                guild_id,
                name,
                MessageRef(message_ref),
                entries,
            ));
        }
        Ok(lists)
    }

    /// All checklist names in a guild, ordered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the query fails.
    pub fn guild_names(&self, guild_id: i64) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM checklists WHERE guild_id = ?1 ORDER BY name")?;
        let names = stmt
            .query_map([guild_id], |row| row.get(0))?
            .collect::<rusqlite::Result<_>>()?;
        Ok(names)
    }

    /// The message handle a checklist's render lives in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`]/[`Error::Ambiguous`] from lookup.
    pub fn message_ref(&self, guild_id: i64, name: &str) -> Result<MessageRef> {
        Ok(load(&self.conn, guild_id, name)?.list.message_ref())
    }

    /// Load-mutate-save inside one transaction. The closure's error aborts
    /// the transaction before anything is written back.
    fn with_list<T>(
        &mut self,
        guild_id: i64,
        name: &str,
        op: impl FnOnce(&mut Checklist) -> Result<T>,
    ) -> Result<(T, String)> {
        let tx = self.conn.transaction()?;
        let mut stored = load(&tx, guild_id, name)?;
        let out = op(&mut stored.list)?;
        save(&tx, stored.id, &stored.list)?;
        tx.commit()?;
        Ok((out, stored.list.render()))
    }
}

fn name_exists(conn: &Connection, guild_id: i64, name: &str) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM checklists WHERE guild_id = ?1 AND name = ?2)",
        params![guild_id, name],
        |row| row.get(0),
    )?;
    Ok(exists)
}

fn load(conn: &Connection, guild_id: i64, name: &str) -> Result<Stored> {
    let mut stmt = conn.prepare(
        "SELECT checklist_id, message_ref FROM checklists WHERE guild_id = ?1 AND name = ?2",
    )?;
    let rows: Vec<(i64, i64)> = stmt
        .query_map(params![guild_id, name], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .collect::<rusqlite::Result<_>>()?;

    let (id, message_ref) = match rows.as_slice() {
        [] => {
            return Err(Error::NotFound {
                guild_id,
                name: name.to_owned(),
            });
        }
        [row] => *row,
        _ => {
            return Err(Error::Ambiguous {
                guild_id,
                name: name.to_owned(),
                count: rows.len(),
            });
        }
    };

    let entries = load_entries(conn, id)?;
    Ok(Stored {
        id,
        list: Checklist::from_parts(guild_id, name.to_owned(), MessageRef(message_ref), entries),
    })
}

fn load_entries(conn: &Connection, checklist_id: i64) -> Result<Vec<Entry>> {
    let mut stmt = conn.prepare(
        "SELECT content, checked FROM entries WHERE checklist_id = ?1 ORDER BY position",
    )?;
    let entries = stmt
        .query_map([checklist_id], |row| {
            Ok(Entry {
                content: row.get(0)?,
                checked: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<_>>()?;
    Ok(entries)
}

/// Write an aggregate back: update the row, then rewrite the entry set so
/// stored positions always mirror in-memory order.
fn save(conn: &Connection, checklist_id: i64, list: &Checklist) -> Result<()> {
    conn.execute(
        "UPDATE checklists SET name = ?1, message_ref = ?2 WHERE checklist_id = ?3",
        params![list.name(), list.message_ref().0, checklist_id],
    )?;
    conn.execute(
        "DELETE FROM entries WHERE checklist_id = ?1",
        [checklist_id],
    )?;
    let mut stmt = conn.prepare(
        "INSERT INTO entries (checklist_id, position, content, checked) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for (position, entry) in (0_i64..).zip(list.entries()) {
        stmt.execute(params![checklist_id, position, entry.content, entry.checked])?;
    }
    Ok(())
}
