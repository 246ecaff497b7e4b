//! Session state owned by the controller
//!
//! [`SessionState`] is a plain value: the roster and selection, the bound
//! session, the pending draft, the message pane, and queued notifications.
//! Front ends read it; only [`crate::controller::ChatController`] mutates it.

use crate::api::{Chat, ChatMessage, Client};
use crate::controller::notification::Notification;
use crate::controller::pane::MessagePane;
use std::collections::VecDeque;
use std::fmt;

/// Key of a roster entry (its position in backend order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RosterKey(usize);

impl RosterKey {
    /// Key for the entry at `index`
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based position in the roster
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RosterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// Clients available for selection, in the order the backend sent them
///
/// Duplicates are kept; each entry has its own key.
///
/// # Examples
///
/// ```
/// use clientele::api::Client;
/// use clientele::controller::Roster;
///
/// let roster = Roster::from(vec![Client::named("Ada"), Client::named("Bo")]);
/// let key = roster.find_by_name("Bo").unwrap();
/// assert_eq!(roster.get(key).unwrap().display_name, "Bo");
/// assert_eq!(key.to_string(), "2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    clients: Vec<Client>,
}

impl Roster {
    /// Client for a key, if the key belongs to this roster
    pub fn get(&self, key: RosterKey) -> Option<&Client> {
        self.clients.get(key.0)
    }

    /// First entry whose display name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<RosterKey> {
        self.clients
            .iter()
            .position(|c| c.display_name == name)
            .map(RosterKey)
    }

    /// Entries with their keys, in order
    pub fn iter(&self) -> impl Iterator<Item = (RosterKey, &Client)> {
        self.clients
            .iter()
            .enumerate()
            .map(|(i, c)| (RosterKey(i), c))
    }

    /// Clients in order
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// True when no clients are available
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl From<Vec<Client>> for Roster {
    fn from(clients: Vec<Client>) -> Self {
        Self { clients }
    }
}

/// Which part of the UI is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Choosing a client from the roster
    #[default]
    Selection,
    /// Exchanging messages in the open session
    Conversation,
    /// The session was closed
    Ended,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selection => write!(f, "selection"),
            Self::Conversation => write!(f, "conversation"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// The single open chat session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque backend token referenced by every send
    pub uuid: String,
    /// Client the session was opened with
    pub client: Client,
    /// History as of the last backend response
    pub history: Vec<ChatMessage>,
}

impl Session {
    pub(crate) fn from_chat(client: Client, chat: Chat) -> Self {
        Self {
            uuid: chat.uuid,
            client,
            history: chat.messages,
        }
    }
}

/// Everything the controller tracks
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub(crate) roster: Roster,
    pub(crate) selection: Option<RosterKey>,
    pub(crate) session: Option<Session>,
    pub(crate) view: View,
    pub(crate) draft: String,
    pub(crate) pane: MessagePane,
    pub(crate) in_flight: Option<u64>,
    pub(crate) notifications: VecDeque<Notification>,
}

impl SessionState {
    /// Loaded roster
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Selected roster key
    pub fn selection(&self) -> Option<RosterKey> {
        self.selection
    }

    /// Client behind the current selection
    pub fn selected_client(&self) -> Option<&Client> {
        self.selection.and_then(|key| self.roster.get(key))
    }

    /// Bound session, if one is open
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Uuid of the bound session
    pub fn session_uuid(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.uuid.as_str())
    }

    /// Active view
    pub fn view(&self) -> View {
        self.view
    }

    /// Pending input text
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Rendered messages
    pub fn pane(&self) -> &MessagePane {
        &self.pane
    }

    /// True while a send awaits its reply
    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Notifications not yet drained
    pub fn pending_notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }
}
