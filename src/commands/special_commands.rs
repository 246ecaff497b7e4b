//! Special commands parser for interactive chat
//!
//! During a conversation, lines starting with `/` (and the bare words
//! `exit` / `quit`) are commands for the client rather than messages for the
//! backend. Commands are case-insensitive.
//!
//! While choosing a client, input is a roster number or display name; see
//! [`parse_selection`].

use crate::controller::{Roster, RosterKey};
use colored::Colorize;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an argument it does not take
    #[error("Command {command} takes no arguments, got: {arg}")]
    UnexpectedArgument { command: String, arg: String },
}

/// Special commands that can be executed during a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Show available commands
    Help,

    /// Show the active client, session id, and message counts
    ShowStatus,

    /// Print the full history as the backend knows it
    History,

    /// Close the session on the backend and exit
    End,

    /// Leave the client; the session stays open on the backend
    Exit,

    /// Not a special command; send the input as a message
    None,
}

/// Parse a user input line into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` for an unrecognized `/command` and
/// `CommandError::UnexpectedArgument` when a command is given arguments.
///
/// # Examples
///
/// ```
/// use clientele::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/history").unwrap(), SpecialCommand::History);
/// assert_eq!(parse_special_command("QUIT").unwrap(), SpecialCommand::Exit);
/// assert_eq!(parse_special_command("hello").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') {
        return Ok(match lower.as_str() {
            "exit" | "quit" => SpecialCommand::Exit,
            _ => SpecialCommand::None,
        });
    }

    let mut parts = lower.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    let parsed = match command {
        "/help" | "/?" => SpecialCommand::Help,
        "/status" => SpecialCommand::ShowStatus,
        "/history" => SpecialCommand::History,
        "/end" => SpecialCommand::End,
        "/exit" | "/quit" => SpecialCommand::Exit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };

    if !arg.is_empty() {
        return Err(CommandError::UnexpectedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        });
    }

    Ok(parsed)
}

/// Resolve selection input to a roster key
///
/// Accepts a 1-based roster number or an exact display name. Names are tried
/// first so a client literally named "2" can still be chosen.
///
/// # Examples
///
/// ```
/// use clientele::api::Client;
/// use clientele::commands::special_commands::parse_selection;
/// use clientele::controller::{Roster, RosterKey};
///
/// let roster = Roster::from(vec![Client::named("Ada"), Client::named("Bo")]);
/// assert_eq!(parse_selection("2", &roster), Some(RosterKey::new(1)));
/// assert_eq!(parse_selection("Ada", &roster), Some(RosterKey::new(0)));
/// assert_eq!(parse_selection("3", &roster), None);
/// ```
pub fn parse_selection(input: &str, roster: &Roster) -> Option<RosterKey> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(key) = roster.find_by_name(trimmed) {
        return Some(key);
    }

    let number: usize = trimmed.parse().ok()?;
    let key = RosterKey::new(number.checked_sub(1)?);
    roster.get(key).map(|_| key)
}

/// Print conversation help
pub fn print_help() {
    println!("\n{}", "Commands:".bold());
    println!("  {}     Show this help", "/help".cyan());
    println!("  {}   Show the client and session id", "/status".cyan());
    println!("  {}  Show the full conversation history", "/history".cyan());
    println!("  {}      End the session and exit", "/end".cyan());
    println!("  {}     Leave without ending the session", "exit".cyan());
    println!("\nAnything else is sent to the client.\n");
}
