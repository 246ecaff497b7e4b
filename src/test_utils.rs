//! Test utilities for Clientele
//!
//! [`FakeBackend`] is a scripted, in-process [`ChatBackend`]: tests queue the
//! responses each endpoint should return and inspect the calls that were made.

use crate::api::{Chat, ChatBackend, ChatMessage, Client, Role};
use crate::error::{ClienteleError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A request observed by [`FakeBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    ListClients,
    OpenChat(String),
    SendMessage { uuid: String, user_message: String },
    ReadChat(String),
    DeleteChat(String),
}

#[derive(Default)]
struct Script {
    clients: VecDeque<std::result::Result<Vec<Client>, ClienteleError>>,
    open: VecDeque<std::result::Result<Chat, ClienteleError>>,
    send: VecDeque<std::result::Result<Chat, ClienteleError>>,
    read: VecDeque<std::result::Result<Chat, ClienteleError>>,
    delete: VecDeque<std::result::Result<Chat, ClienteleError>>,
    calls: Vec<BackendCall>,
}

/// Scripted backend; an endpoint with nothing queued fails with a transport error
#[derive(Default)]
pub struct FakeBackend {
    script: Mutex<Script>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_clients(&self, clients: Vec<Client>) -> &Self {
        self.script.lock().unwrap().clients.push_back(Ok(clients));
        self
    }

    pub fn fail_clients(&self, err: ClienteleError) -> &Self {
        self.script.lock().unwrap().clients.push_back(Err(err));
        self
    }

    pub fn push_open(&self, chat: Chat) -> &Self {
        self.script.lock().unwrap().open.push_back(Ok(chat));
        self
    }

    pub fn fail_open(&self, err: ClienteleError) -> &Self {
        self.script.lock().unwrap().open.push_back(Err(err));
        self
    }

    pub fn push_send(&self, chat: Chat) -> &Self {
        self.script.lock().unwrap().send.push_back(Ok(chat));
        self
    }

    pub fn fail_send(&self, err: ClienteleError) -> &Self {
        self.script.lock().unwrap().send.push_back(Err(err));
        self
    }

    pub fn push_read(&self, chat: Chat) -> &Self {
        self.script.lock().unwrap().read.push_back(Ok(chat));
        self
    }

    pub fn fail_read(&self, err: ClienteleError) -> &Self {
        self.script.lock().unwrap().read.push_back(Err(err));
        self
    }

    pub fn push_delete(&self, chat: Chat) -> &Self {
        self.script.lock().unwrap().delete.push_back(Ok(chat));
        self
    }

    pub fn fail_delete(&self, err: ClienteleError) -> &Self {
        self.script.lock().unwrap().delete.push_back(Err(err));
        self
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<BackendCall> {
        self.script.lock().unwrap().calls.clone()
    }

    fn next<T>(
        &self,
        call: BackendCall,
        pick: impl FnOnce(&mut Script) -> Option<std::result::Result<T, ClienteleError>>,
    ) -> Result<T> {
        let mut script = self.script.lock().unwrap();
        let what = format!("{:?}", call);
        script.calls.push(call);
        match pick(&mut script) {
            Some(Ok(value)) => Ok(value),
            Some(Err(err)) => Err(err.into()),
            None => Err(ClienteleError::Transport(format!("no scripted response for {}", what)).into()),
        }
    }
}

#[async_trait::async_trait]
impl ChatBackend for FakeBackend {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        self.next(BackendCall::ListClients, |s| s.clients.pop_front())
    }

    async fn open_chat(&self, client: &str) -> Result<Chat> {
        self.next(BackendCall::OpenChat(client.to_string()), |s| s.open.pop_front())
    }

    async fn send_message(&self, uuid: &str, user_message: &str) -> Result<Chat> {
        self.next(
            BackendCall::SendMessage {
                uuid: uuid.to_string(),
                user_message: user_message.to_string(),
            },
            |s| s.send.pop_front(),
        )
    }

    async fn read_chat(&self, uuid: &str) -> Result<Chat> {
        self.next(BackendCall::ReadChat(uuid.to_string()), |s| s.read.pop_front())
    }

    async fn delete_chat(&self, uuid: &str) -> Result<Chat> {
        self.next(BackendCall::DeleteChat(uuid.to_string()), |s| {
            s.delete.pop_front()
        })
    }
}

/// Roster of name-only clients
pub fn clients(names: &[&str]) -> Vec<Client> {
    names.iter().map(|n| Client::named(*n)).collect()
}

/// A chat with a system prompt followed by `turns` as alternating user/assistant messages
pub fn chat(uuid: &str, display_name: &str, turns: &[&str]) -> Chat {
    let mut messages = vec![ChatMessage::new(
        Role::System,
        format!("You are {}.", display_name),
    )];
    for (i, content) in turns.iter().enumerate() {
        let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
        messages.push(ChatMessage::new(role, *content));
    }
    Chat {
        uuid: uuid.to_string(),
        display_name: display_name.to_string(),
        messages,
    }
}
