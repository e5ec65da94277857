//! Domain model: checkable entries and the checklist aggregate that owns
//! them.

mod checklist;
mod entry;

pub use checklist::{Checklist, RemoveReport};
pub use entry::{Entry, format_line};
