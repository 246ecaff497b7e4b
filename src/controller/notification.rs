//! User-visible failure notifications
//!
//! The controller never prints or prompts. Every failed action queues one
//! [`Notification`] that the front end drains and presents however it likes.

use crate::error::ClienteleError;
use std::fmt;

/// What went wrong, from the user's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// The roster could not be fetched or parsed
    RosterUnavailable,
    /// Opening a session failed at the backend
    SessionOpenFailed,
    /// Sending a message failed; the local echo stays in the pane
    SendFailed,
    /// Reading the session transcript failed
    TranscriptFailed,
    /// Closing the session failed
    CloseFailed,
    /// The action needs a selected client
    NoSelection,
    /// The action needs an open session
    NoActiveSession,
    /// A session is already open for this controller
    SessionAlreadyOpen,
    /// The session was closed and cannot be reused
    SessionEnded,
    /// The previous message is still being sent
    SendInFlight,
}

impl NotificationKind {
    /// Short text suitable for an alert or status line
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::RosterUnavailable => "Encountered an error fetching clients",
            Self::SessionOpenFailed => "Encountered an error selecting a client",
            Self::SendFailed => "Failed to send a new message",
            Self::TranscriptFailed => "Failed to read the conversation history",
            Self::CloseFailed => "Failed to end the session",
            Self::NoSelection => "No client is selected",
            Self::NoActiveSession => "No session is open",
            Self::SessionAlreadyOpen => "A session is already open",
            Self::SessionEnded => "The session has ended",
            Self::SendInFlight => "Still waiting for the previous reply",
        }
    }

    /// True for failures caused by calling an action in the wrong state
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NoSelection
                | Self::NoActiveSession
                | Self::SessionAlreadyOpen
                | Self::SessionEnded
                | Self::SendInFlight
        )
    }

    /// Pick the kind for a failed action
    ///
    /// Precondition errors keep their own kind; everything else (transport,
    /// status, parse, timeout) is reported as the action's failure kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientele::controller::NotificationKind;
    /// use clientele::error::ClienteleError;
    ///
    /// let err = anyhow::Error::from(ClienteleError::NoSelection);
    /// let kind = NotificationKind::for_failure(NotificationKind::SessionOpenFailed, &err);
    /// assert_eq!(kind, NotificationKind::NoSelection);
    ///
    /// let err = anyhow::Error::from(ClienteleError::Timeout(30));
    /// let kind = NotificationKind::for_failure(NotificationKind::SessionOpenFailed, &err);
    /// assert_eq!(kind, NotificationKind::SessionOpenFailed);
    /// ```
    pub fn for_failure(action: NotificationKind, err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ClienteleError>() {
            Some(ClienteleError::NoSelection) => Self::NoSelection,
            Some(ClienteleError::NoActiveSession) => Self::NoActiveSession,
            Some(ClienteleError::SessionAlreadyOpen(_)) => Self::SessionAlreadyOpen,
            Some(ClienteleError::SessionEnded) => Self::SessionEnded,
            Some(ClienteleError::SendInFlight) => Self::SendInFlight,
            _ => action,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

/// A queued, user-visible failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Failure classification
    pub kind: NotificationKind,
    /// Short user-facing text
    pub message: String,
    /// Diagnostic detail (the underlying error chain)
    pub detail: String,
}

impl Notification {
    /// Build a notification for `kind` with the given diagnostic detail
    pub fn new(kind: NotificationKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            message: kind.user_message().to_string(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.message, self.detail)
        }
    }
}
