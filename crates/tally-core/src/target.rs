//! Rendering-target boundary.
//!
//! A checklist's rendered text lives in exactly one message at some external
//! rendering target (a chat platform, in practice). The core only ever holds
//! an opaque [`MessageRef`] to that message and talks to the target through
//! the [`RenderTarget`] trait; sending, editing, and deleting are the
//! caller's concern.

use std::fmt;

use crate::error::Result;

/// Opaque handle to the message where a checklist's render currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef(pub i64);

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to the channel a new render should be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelRef(pub i64);

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where rendered checklist text is published.
///
/// Implementations live outside this crate. The contract the store relies
/// on: `send` yields a stable [`MessageRef`], and `edit`/`delete` address
/// the message it named.
pub trait RenderTarget {
    /// Publish `text` as a new message and return its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the target rejects the send.
    fn send(&mut self, channel: ChannelRef, text: &str) -> Result<MessageRef>;

    /// Replace the text of an existing message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RefNotFound`](crate::Error::RefNotFound) if the
    /// message no longer exists at the target.
    fn edit(&mut self, message: MessageRef, text: &str) -> Result<()>;

    /// Remove a message.
    ///
    /// # Errors
    ///
    /// Returns an error if the target rejects the delete.
    fn delete(&mut self, message: MessageRef) -> Result<()>;
}
