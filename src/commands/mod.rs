/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `chat`     — Interactive roster selection and conversation
- `clients`  — Print the backend's roster
- `special_commands` — Parser for in-conversation `/commands`

These handlers are intentionally small; the session logic lives in
[`crate::controller`].
*/

pub mod chat;
pub mod clients;
pub mod special_commands;
