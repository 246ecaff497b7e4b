//! Wire types for the chat backend
//!
//! These mirror the JSON bodies exchanged with `/clients` and `/chat`.
//! Unknown fields are ignored and optional fields default, so a backend that
//! returns extra metadata does not break parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A selectable conversational partner from the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Name shown in the roster and sent when opening a session
    pub display_name: String,

    /// Who the client is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// What the client wants and what constrains them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_and_limitations: Option<String>,

    /// How hard the client is to work with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,

    /// What the client expects to receive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_type: Option<String>,
}

impl Client {
    /// Create a client with only a display name
    ///
    /// # Examples
    ///
    /// ```
    /// use clientele::api::Client;
    ///
    /// let client = Client::named("Ada Park");
    /// assert_eq!(client.display_name, "Ada Park");
    /// assert!(client.background.is_none());
    /// ```
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            background: None,
            needs_and_limitations: None,
            difficulty: None,
            output_type: None,
        }
    }
}

/// Author role of a backend message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Prompt seeded by the backend when the chat is created
    System,
    /// Message typed by the local user
    User,
    /// Reply generated for the client
    Assistant,
    /// Any role this client does not know about
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One message in a chat's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message
    #[serde(default = "default_role")]
    pub role: Role,
    /// Message text
    pub content: String,
}

fn default_role() -> Role {
    Role::Unknown
}

impl ChatMessage {
    /// Create a message with the given role and content
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A chat as returned by every `/chat` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Opaque session token assigned by the backend
    pub uuid: String,
    /// Display name of the client the chat was opened with
    #[serde(default)]
    pub display_name: String,
    /// Full ordered history as known to the backend
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl Chat {
    /// Content of the newest message, if any
    ///
    /// # Examples
    ///
    /// ```
    /// use clientele::api::{Chat, ChatMessage, Role};
    ///
    /// let chat = Chat {
    ///     uuid: "abc-123".to_string(),
    ///     display_name: "Ada Park".to_string(),
    ///     messages: vec![
    ///         ChatMessage::new(Role::User, "hello"),
    ///         ChatMessage::new(Role::Assistant, "hi there"),
    ///     ],
    /// };
    /// assert_eq!(chat.last_content(), Some("hi there"));
    /// ```
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct OpenChatRequest<'a> {
    pub client: &'a str,
}

/// Body of `PUT /chat`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub uuid: &'a str,
    pub user_message: &'a str,
}

/// Body of `GET /chat` and `DELETE /chat`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRef<'a> {
    pub uuid: &'a str,
}
