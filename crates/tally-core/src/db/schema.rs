//! Canonical SQLite schema for checklist storage.
//!
//! Two tables, one aggregate:
//! - `checklists` holds the per-list fields; `(guild_id, name)` is unique so
//!   duplicate-name checks are also enforced at the storage layer
//! - `entries` holds each list's lines keyed by `(checklist_id, position)`;
//!   positions are dense `0..n-1` and rewritten wholesale on save

/// Migration v1: checklist and entry tables.
pub const MIGRATION_V1_SQL: &str = r"
CREATE TABLE IF NOT EXISTS checklists (
    checklist_id INTEGER PRIMARY KEY AUTOINCREMENT,
    guild_id INTEGER NOT NULL,
    name TEXT NOT NULL CHECK (length(name) > 0),
    message_ref INTEGER NOT NULL,
    UNIQUE (guild_id, name)
);

CREATE TABLE IF NOT EXISTS entries (
    checklist_id INTEGER NOT NULL REFERENCES checklists(checklist_id) ON DELETE CASCADE,
    position INTEGER NOT NULL CHECK (position >= 0),
    content TEXT NOT NULL,
    checked INTEGER NOT NULL DEFAULT 0 CHECK (checked IN (0, 1)),
    PRIMARY KEY (checklist_id, position)
);
";

/// Migration v2: read-path index for guild-wide listings.
pub const MIGRATION_V2_SQL: &str = r"
CREATE INDEX IF NOT EXISTS idx_checklists_guild
    ON checklists(guild_id, name);
";
