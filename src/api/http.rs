//! HTTP implementation of [`ChatBackend`]
//!
//! Endpoints are resolved relative to the configured base URL, so a backend
//! mounted under a path prefix (`https://host/practice/`) works the same as
//! one at the root.

use crate::api::types::{Chat, ChatRef, Client, OpenChatRequest, SendMessageRequest};
use crate::api::ChatBackend;
use crate::config::ServerConfig;
use crate::error::{ClienteleError, Result};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Chat backend reached over HTTP with JSON bodies
///
/// # Examples
///
/// ```
/// use clientele::api::HttpBackend;
/// use clientele::config::ServerConfig;
///
/// let backend = HttpBackend::new(&ServerConfig::default()).unwrap();
/// assert_eq!(backend.base_url().as_str(), "http://127.0.0.1:5000/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    timeout_seconds: u64,
}

impl HttpBackend {
    /// Create a backend from server configuration
    ///
    /// # Errors
    ///
    /// Returns `ClienteleError::Config` if the base URL does not parse, or
    /// `ClienteleError::Transport` if the HTTP client cannot be built
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let base_url = normalize_base(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ClienteleError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized HTTP backend: base_url={}, timeout={}s",
            base_url,
            config.timeout_seconds
        );

        Ok(Self {
            client,
            base_url,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Base URL every endpoint is resolved against (always ends in `/`)
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path).map_err(ClienteleError::from)?)
    }

    fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match body {
            Some(body) => builder.json(body),
            None => builder,
        }
    }

    /// Send a request and decode a JSON success body
    async fn execute<T: DeserializeOwned>(&self, what: &str, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} request failed: {}", what, e);
            if e.is_timeout() {
                ClienteleError::Timeout(self.timeout_seconds)
            } else {
                ClienteleError::Transport(format!("{} request failed: {}", what, e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("{} returned error {}: {}", what, status, body);
            return Err(ClienteleError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ClienteleError::Timeout(self.timeout_seconds)
            } else {
                ClienteleError::Transport(format!("Failed to read {} response: {}", what, e))
            }
        })?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", what, e);
            ClienteleError::InvalidResponse(format!("Failed to parse {} response: {}", what, e))
                .into()
        })
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        let url = self.endpoint("clients")?;
        tracing::debug!("Fetching roster from {}", url);

        let request = self.request::<()>(Method::GET, url, None);
        let clients: Vec<Client> = self.execute("list clients", request).await?;

        tracing::debug!("Fetched {} clients", clients.len());
        Ok(clients)
    }

    async fn open_chat(&self, client: &str) -> Result<Chat> {
        let url = self.endpoint("chat")?;
        tracing::debug!("Opening chat with {}", client);

        let body = OpenChatRequest { client };
        let request = self.request(Method::POST, url, Some(&body));
        self.execute("open chat", request).await
    }

    async fn send_message(&self, uuid: &str, user_message: &str) -> Result<Chat> {
        let url = self.endpoint("chat")?;
        tracing::debug!("Sending message to chat {}", uuid);

        let body = SendMessageRequest { uuid, user_message };
        let request = self.request(Method::PUT, url, Some(&body));
        self.execute("send message", request).await
    }

    async fn read_chat(&self, uuid: &str) -> Result<Chat> {
        let url = self.endpoint("chat")?;
        tracing::debug!("Reading chat {}", uuid);

        let body = ChatRef { uuid };
        let request = self.request(Method::GET, url, Some(&body));
        self.execute("read chat", request).await
    }

    async fn delete_chat(&self, uuid: &str) -> Result<Chat> {
        let url = self.endpoint("chat")?;
        tracing::debug!("Deleting chat {}", uuid);

        let body = ChatRef { uuid };
        let request = self.request(Method::DELETE, url, Some(&body));
        self.execute("delete chat", request).await
    }
}

/// Parse a base URL and make sure relative joins append to its path
fn normalize_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ClienteleError::Config(format!("Invalid server URL '{}': {}", raw, e)))?;

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
