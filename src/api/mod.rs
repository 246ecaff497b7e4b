//! Chat backend abstraction and implementations
//!
//! The [`ChatBackend`] trait is the seam between the session controller and
//! the server that owns rosters and chats. [`http::HttpBackend`] talks to the
//! real HTTP API; tests substitute an in-process fake.
//!
//! Every method performs exactly one request. Retries, timeouts beyond the
//! transport's own, and state changes are the caller's business.

use crate::error::Result;

pub mod http;
pub mod types;

pub use http::HttpBackend;
pub use types::{Chat, ChatMessage, Client, Role};

/// Operations the controller needs from the chat backend.
///
/// # Examples
///
/// ```no_run
/// use clientele::api::{ChatBackend, HttpBackend};
/// use clientele::config::ServerConfig;
///
/// # async fn example() -> clientele::error::Result<()> {
/// let backend = HttpBackend::new(&ServerConfig::default())?;
/// let roster = backend.list_clients().await?;
/// let chat = backend.open_chat(&roster[0].display_name).await?;
/// let chat = backend.send_message(&chat.uuid, "hello").await?;
/// println!("{:?}", chat.last_content());
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// `GET /clients`: the roster in backend order
    async fn list_clients(&self) -> Result<Vec<Client>>;

    /// `POST /chat`: open a chat with the named client
    async fn open_chat(&self, client: &str) -> Result<Chat>;

    /// `PUT /chat`: append a user message and return the updated chat
    async fn send_message(&self, uuid: &str, user_message: &str) -> Result<Chat>;

    /// `GET /chat`: read a chat's full history
    async fn read_chat(&self, uuid: &str) -> Result<Chat>;

    /// `DELETE /chat`: stop tracking a chat, returning its final state
    async fn delete_chat(&self, uuid: &str) -> Result<Chat>;
}
