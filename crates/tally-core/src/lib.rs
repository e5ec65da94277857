//! tally-core: the engine behind shared, guild-scoped checklists.
//!
//! A [`Checklist`] is an ordered container of checkable [`Entry`] values
//! that renders to a single bounded message at an external target. The
//! crate owns:
//!
//! - the aggregate and its render-budget invariants ([`model`], [`policy`])
//! - the lossless line codec used for bulk text editing ([`codec`])
//! - the SQLite-backed repository with transactional commits ([`db`])
//! - the rendering-target boundary ([`target`])
//!
//! The chat-facing command layer is a separate consumer; this crate's
//! failures are typed ([`Error`]) so that layer can translate them.

pub mod codec;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod policy;
pub mod target;
pub mod util;

pub use db::store::Store;
pub use error::{Error, Result};
pub use model::{Checklist, Entry, RemoveReport};
pub use target::{ChannelRef, MessageRef, RenderTarget};
