//! Append-only message pane

use std::fmt;

/// Rendering class of a pane entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageClass {
    /// Typed by the local user
    SelfMessage,
    /// Reply from the client on the other side
    OtherMessage,
}

impl MessageClass {
    /// Class name used by front ends (`selfMessage` / `otherMessage`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfMessage => "selfMessage",
            Self::OtherMessage => "otherMessage",
        }
    }
}

impl fmt::Display for MessageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneEntry {
    /// Position in the pane, starting at 0
    pub seq: u64,
    /// Who the message is attributed to
    pub class: MessageClass,
    /// Message text
    pub content: String,
}

/// Chronological projection of the conversation
///
/// Entries can only be appended. Nothing rendered is ever removed or
/// reordered, so a front end can draw incrementally from the last index it
/// has seen.
///
/// # Examples
///
/// ```
/// use clientele::controller::{MessageClass, MessagePane};
///
/// let mut pane = MessagePane::new();
/// pane.push(MessageClass::SelfMessage, "hello");
/// pane.push(MessageClass::OtherMessage, "hi there");
///
/// assert_eq!(pane.len(), 2);
/// assert_eq!(pane.since(1)[0].content, "hi there");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePane {
    entries: Vec<PaneEntry>,
}

impl MessagePane {
    /// Create an empty pane
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its sequence number
    pub fn push(&mut self, class: MessageClass, content: impl Into<String>) -> u64 {
        let seq = self.entries.len() as u64;
        self.entries.push(PaneEntry {
            seq,
            class,
            content: content.into(),
        });
        seq
    }

    /// All entries in render order
    pub fn entries(&self) -> &[PaneEntry] {
        &self.entries
    }

    /// Entries appended at or after index `from`
    pub fn since(&self, from: usize) -> &[PaneEntry] {
        self.entries.get(from..).unwrap_or(&[])
    }

    /// Entry with the given sequence number
    pub fn get(&self, seq: u64) -> Option<&PaneEntry> {
        self.entries.get(seq as usize)
    }

    /// Number of rendered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been rendered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries of the given class
    pub fn count(&self, class: MessageClass) -> usize {
        self.entries.iter().filter(|e| e.class == class).count()
    }
}
