//! Session and message-exchange controller
//!
//! [`ChatController`] drives the whole client-side flow:
//!
//! 1. [`load_roster`](ChatController::load_roster) fetches the clients once at
//!    startup.
//! 2. [`open_session`](ChatController::open_session) opens exactly one chat
//!    with the selected client and switches to the conversation view.
//! 3. [`send`](ChatController::send) echoes the user's message into the pane,
//!    sends it, and appends the single reply.
//!
//! Each action performs at most one backend request. A failed action queues
//! one [`Notification`], logs the cause, returns the error, and leaves the
//! state usable for the next attempt.
//!
//! Sending is split into two phases so the local echo is explicit:
//! [`begin_send`](ChatController::begin_send) renders the user's message and
//! clears the draft before any I/O, and
//! [`complete_send`](ChatController::complete_send) applies the backend
//! outcome. Only one send may be outstanding at a time, so replies always
//! render in the order messages were sent.

use crate::api::{Chat, ChatBackend, ChatMessage, Client};
use crate::error::{ClienteleError, Result};
use std::sync::Arc;

pub mod notification;
pub mod pane;
pub mod state;

pub use notification::{Notification, NotificationKind};
pub use pane::{MessageClass, MessagePane, PaneEntry};
pub use state::{Roster, RosterKey, Session, SessionState, View};

/// A send that has been echoed locally and awaits the backend
///
/// Returned by [`ChatController::begin_send`] and consumed by
/// [`ChatController::complete_send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    seq: u64,
    uuid: String,
    user_message: String,
}

impl PendingSend {
    /// Pane sequence number of the local echo
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Session the message is addressed to
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Message text as typed
    pub fn user_message(&self) -> &str {
        &self.user_message
    }
}

/// Client-side controller for one chat session
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use clientele::api::HttpBackend;
/// use clientele::config::ServerConfig;
/// use clientele::controller::ChatController;
///
/// # async fn example() -> clientele::error::Result<()> {
/// let backend = Arc::new(HttpBackend::new(&ServerConfig::default())?);
/// let mut controller = ChatController::new(backend);
///
/// controller.load_roster().await?;
/// controller.select_by_name("Ada Park")?;
/// controller.open_session().await?;
///
/// controller.set_draft("hello");
/// controller.send().await?;
///
/// for entry in controller.state().pane().entries() {
///     println!("[{}] {}", entry.class, entry.content);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ChatController {
    backend: Arc<dyn ChatBackend>,
    state: SessionState,
}

impl ChatController {
    /// Create a controller with empty state
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self::with_state(backend, SessionState::default())
    }

    /// Create a controller around existing state
    pub fn with_state(backend: Arc<dyn ChatBackend>, state: SessionState) -> Self {
        Self { backend, state }
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Consume the controller and return its state
    pub fn into_state(self) -> SessionState {
        self.state
    }

    /// Drain queued notifications, oldest first
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.state.notifications.drain(..).collect()
    }

    /// Fetch the roster from the backend
    ///
    /// On success the roster is replaced with the received clients, in order,
    /// and any previous selection is cleared. On failure the roster is left as
    /// it was and a [`NotificationKind::RosterUnavailable`] is queued.
    ///
    /// # Returns
    ///
    /// Number of clients loaded
    pub async fn load_roster(&mut self) -> Result<usize> {
        tracing::debug!("Loading roster");

        match self.backend.list_clients().await {
            Ok(clients) => {
                let count = clients.len();
                self.state.roster = Roster::from(clients);
                self.state.selection = None;
                tracing::info!("Loaded {} clients", count);
                Ok(count)
            }
            Err(err) => self.fail(NotificationKind::RosterUnavailable, err),
        }
    }

    /// Select a roster entry by key
    ///
    /// # Errors
    ///
    /// Returns `ClienteleError::NoSelection` if the key is not in the roster
    pub fn select(&mut self, key: RosterKey) -> Result<&Client> {
        if self.state.roster.get(key).is_none() {
            tracing::warn!("Roster has no entry {}", key);
            return self.fail(
                NotificationKind::NoSelection,
                ClienteleError::NoSelection.into(),
            );
        }

        self.state.selection = Some(key);
        self.state
            .roster
            .get(key)
            .ok_or_else(|| ClienteleError::NoSelection.into())
    }

    /// Select the first roster entry with this display name
    ///
    /// # Errors
    ///
    /// Returns `ClienteleError::NoSelection` if no entry matches
    pub fn select_by_name(&mut self, name: &str) -> Result<RosterKey> {
        match self.state.roster.find_by_name(name) {
            Some(key) => {
                self.state.selection = Some(key);
                Ok(key)
            }
            None => {
                tracing::warn!("No client named '{}' in roster", name);
                self.fail(
                    NotificationKind::NoSelection,
                    ClienteleError::NoSelection.into(),
                )
            }
        }
    }

    /// Forget the current selection
    pub fn clear_selection(&mut self) {
        self.state.selection = None;
    }

    /// Open a session with the selected client
    ///
    /// On success the conversation view becomes active and the returned uuid
    /// is bound for every later send. On failure the view and binding are
    /// untouched, so calling this again is a clean retry.
    ///
    /// # Errors
    ///
    /// Fails without a request when nothing is selected
    /// (`ClienteleError::NoSelection`), a session is already bound
    /// (`ClienteleError::SessionAlreadyOpen`), or the session was closed
    /// (`ClienteleError::SessionEnded`). Backend failures are returned as-is.
    pub async fn open_session(&mut self) -> Result<&Session> {
        if let Some(session) = &self.state.session {
            let err = ClienteleError::SessionAlreadyOpen(session.uuid.clone());
            return self.fail(NotificationKind::SessionOpenFailed, err.into());
        }

        if self.state.view == View::Ended {
            return self.fail(
                NotificationKind::SessionOpenFailed,
                ClienteleError::SessionEnded.into(),
            );
        }

        let client = match self.state.selected_client() {
            Some(client) => client.clone(),
            None => {
                return self.fail(
                    NotificationKind::SessionOpenFailed,
                    ClienteleError::NoSelection.into(),
                )
            }
        };

        tracing::debug!("Opening session with {}", client.display_name);

        match self.backend.open_chat(&client.display_name).await {
            Ok(chat) => {
                tracing::info!(
                    "Opened session {} with {}",
                    chat.uuid,
                    client.display_name
                );
                self.state.view = View::Conversation;
                let session = self
                    .state
                    .session
                    .insert(Session::from_chat(client, chat));
                Ok(session)
            }
            Err(err) => self.fail(NotificationKind::SessionOpenFailed, err),
        }
    }

    /// Replace the pending input text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.draft = text.into();
    }

    /// Phase one of a send: echo the draft locally and clear it
    ///
    /// The user's message is appended to the pane as
    /// [`MessageClass::SelfMessage`] before any request is made and stays
    /// there whatever the backend does.
    ///
    /// # Errors
    ///
    /// Fails without touching the pane or draft when no session is bound
    /// (`ClienteleError::NoActiveSession`) or a send is already outstanding
    /// (`ClienteleError::SendInFlight`).
    pub fn begin_send(&mut self) -> Result<PendingSend> {
        let uuid = match self.state.session_uuid() {
            Some(uuid) => uuid.to_string(),
            None => {
                return self.fail(
                    NotificationKind::SendFailed,
                    ClienteleError::NoActiveSession.into(),
                )
            }
        };

        if self.state.in_flight.is_some() {
            return self.fail(
                NotificationKind::SendFailed,
                ClienteleError::SendInFlight.into(),
            );
        }

        let user_message = std::mem::take(&mut self.state.draft);
        let seq = self
            .state
            .pane
            .push(MessageClass::SelfMessage, user_message.clone());
        self.state.in_flight = Some(seq);

        tracing::debug!("Echoed message {} locally for session {}", seq, uuid);

        Ok(PendingSend {
            seq,
            uuid,
            user_message,
        })
    }

    /// Phase two of a send: apply the backend outcome
    ///
    /// On success only the newest message of the returned history is
    /// rendered, once, as [`MessageClass::OtherMessage`]. Earlier history is
    /// already in the pane. A success with an empty history counts as a
    /// malformed response.
    ///
    /// # Returns
    ///
    /// Pane sequence number of the rendered reply
    pub fn complete_send(&mut self, pending: PendingSend, outcome: Result<Chat>) -> Result<u64> {
        if self.state.in_flight == Some(pending.seq) {
            self.state.in_flight = None;
        }

        let chat = match outcome {
            Ok(chat) => chat,
            Err(err) => return self.fail(NotificationKind::SendFailed, err),
        };

        let reply = match chat.last_content() {
            Some(content) => content.to_string(),
            None => {
                let err = ClienteleError::InvalidResponse(
                    "send message response has no messages".to_string(),
                );
                return self.fail(NotificationKind::SendFailed, err.into());
            }
        };

        if let Some(session) = self.state.session.as_mut() {
            if session.uuid == pending.uuid {
                session.history = chat.messages;
            }
        }

        let seq = self.state.pane.push(MessageClass::OtherMessage, reply);
        tracing::debug!("Rendered reply {} for message {}", seq, pending.seq);
        Ok(seq)
    }

    /// Send the current draft and render the reply
    ///
    /// Runs [`begin_send`](Self::begin_send), the `PUT /chat` request, and
    /// [`complete_send`](Self::complete_send) in that order.
    pub async fn send(&mut self) -> Result<u64> {
        let pending = self.begin_send()?;
        let outcome = self
            .backend
            .send_message(&pending.uuid, &pending.user_message)
            .await;
        self.complete_send(pending, outcome)
    }

    /// Read the bound session's full history from the backend
    ///
    /// The pane is not modified; the session's known history is refreshed.
    pub async fn transcript(&mut self) -> Result<Vec<ChatMessage>> {
        let uuid = match self.state.session_uuid() {
            Some(uuid) => uuid.to_string(),
            None => {
                return self.fail(
                    NotificationKind::TranscriptFailed,
                    ClienteleError::NoActiveSession.into(),
                )
            }
        };

        match self.backend.read_chat(&uuid).await {
            Ok(chat) => {
                tracing::debug!("Read {} messages for session {}", chat.messages.len(), uuid);
                if let Some(session) = self.state.session.as_mut() {
                    session.history = chat.messages.clone();
                }
                Ok(chat.messages)
            }
            Err(err) => self.fail(NotificationKind::TranscriptFailed, err),
        }
    }

    /// Ask the backend to stop tracking the session and end the conversation
    ///
    /// On success the binding is dropped and the view becomes
    /// [`View::Ended`]; no further session can be opened by this controller.
    ///
    /// # Returns
    ///
    /// The chat as the backend last knew it
    pub async fn close_session(&mut self) -> Result<Chat> {
        let uuid = match self.state.session_uuid() {
            Some(uuid) => uuid.to_string(),
            None => {
                return self.fail(
                    NotificationKind::CloseFailed,
                    ClienteleError::NoActiveSession.into(),
                )
            }
        };

        match self.backend.delete_chat(&uuid).await {
            Ok(chat) => {
                tracing::info!("Closed session {}", uuid);
                self.state.session = None;
                self.state.in_flight = None;
                self.state.view = View::Ended;
                Ok(chat)
            }
            Err(err) => self.fail(NotificationKind::CloseFailed, err),
        }
    }

    /// Queue a notification for a failed action, log it, and return the error
    fn fail<T>(&mut self, action: NotificationKind, err: anyhow::Error) -> Result<T> {
        let kind = NotificationKind::for_failure(action, &err);
        let detail = format!("{:#}", err);

        if kind.is_precondition() {
            tracing::warn!("{}: {}", kind, detail);
        } else {
            tracing::error!("{}: {}", kind, detail);
        }

        self.state
            .notifications
            .push_back(Notification::new(kind, detail));
        Err(err)
    }
}
