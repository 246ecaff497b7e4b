//! Clientele - practice client chat library
//!
//! This library provides the client side of a "practice client" chat
//! service: fetching the roster of simulated clients, opening a session with
//! one of them, and exchanging messages over HTTP.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Backend wire types, the `ChatBackend` trait, and its HTTP implementation
//! - `controller`: Session state and the roster / session / message flow
//! - `commands`: CLI command handlers (interactive chat, roster listing)
//! - `view`: Terminal formatting for the pane, roster, and notifications
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use clientele::{ChatController, Config, HttpBackend};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let backend = Arc::new(HttpBackend::new(&config.server)?);
//!     let mut controller = ChatController::new(backend);
//!     controller.load_roster().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod view;

// Re-export commonly used types
pub use api::{ChatBackend, HttpBackend};
pub use config::Config;
pub use controller::{ChatController, Notification, NotificationKind, SessionState, View};
pub use error::{ClienteleError, Result};

#[cfg(test)]
pub mod test_utils;
