//! Terminal presentation helpers
//!
//! Formatting for the roster, pane entries, notifications, and transcript.
//! Functions that build text return `String` so they can be tested; the
//! `print_*` helpers write to stdout.

use crate::api::{ChatMessage, Role};
use crate::controller::{MessageClass, Notification, PaneEntry, Roster, SessionState};
use colored::Colorize;

/// Label used for the local user's messages
pub const SELF_LABEL: &str = "you";

/// Format one pane entry as a terminal line
///
/// # Examples
///
/// ```
/// use clientele::controller::{MessageClass, PaneEntry};
/// use clientele::view::format_entry;
///
/// let entry = PaneEntry {
///     seq: 0,
///     class: MessageClass::OtherMessage,
///     content: "hi there".to_string(),
/// };
/// let line = format_entry(&entry, "Ada Park");
/// assert!(line.contains("Ada Park"));
/// assert!(line.contains("hi there"));
/// ```
pub fn format_entry(entry: &PaneEntry, other_label: &str) -> String {
    match entry.class {
        MessageClass::SelfMessage => {
            format!("{} {}", format!("{}:", SELF_LABEL).cyan().bold(), entry.content)
        }
        MessageClass::OtherMessage => {
            format!("{} {}", format!("{}:", other_label).green().bold(), entry.content)
        }
    }
}

/// Format a notification for stderr
pub fn format_notification(notification: &Notification) -> String {
    if notification.kind.is_precondition() {
        format!("{}", notification.message.yellow())
    } else {
        format!(
            "{} {}",
            format!("{}!", notification.message).red().bold(),
            format!("({})", notification.detail).dimmed()
        )
    }
}

/// Format the roster as a numbered list
pub fn format_roster(roster: &Roster) -> String {
    let mut out = String::new();
    for (key, client) in roster.iter() {
        let mut line = format!("  {:>2}. {}", key, client.display_name.bold());
        if let Some(difficulty) = &client.difficulty {
            line.push_str(&format!(" {}", format!("[{}]", difficulty).dimmed()));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Format one backend message for `/history`
pub fn format_transcript_line(message: &ChatMessage, other_label: &str) -> String {
    match message.role {
        Role::User => format!("{} {}", format!("{}:", SELF_LABEL).cyan(), message.content),
        Role::Assistant => format!("{} {}", format!("{}:", other_label).green(), message.content),
        Role::System => format!("{} {}", "system:".purple(), message.content.dimmed()),
        Role::Unknown => format!("{} {}", "?:".dimmed(), message.content),
    }
}

/// Print pane entries from index `*rendered` onwards and advance the index
pub fn print_new_entries(state: &SessionState, rendered: &mut usize) {
    let other_label = state
        .session()
        .map(|s| s.client.display_name.as_str())
        .unwrap_or("them");
    for entry in state.pane().since(*rendered) {
        println!("{}", format_entry(entry, other_label));
    }
    *rendered = state.pane().len();
}

/// Print every notification to stderr
pub fn print_notifications(notifications: &[Notification]) {
    for notification in notifications {
        eprintln!("{}", format_notification(notification));
    }
}

/// Print the transcript, optionally including system messages
pub fn print_transcript(messages: &[ChatMessage], other_label: &str, show_system: bool) {
    println!("\n{}", "Conversation history:".bold());
    for message in messages {
        if message.role == Role::System && !show_system {
            continue;
        }
        println!("  {}", format_transcript_line(message, other_label));
    }
    println!();
}

/// Display welcome banner at the start of interactive chat
pub fn print_welcome_banner(base_url: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║              Clientele - practice client chat                ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Server: {}", base_url.cyan());
    println!("Type '/help' for available commands, 'exit' to quit\n");
}

/// Display session status
pub fn print_status(state: &SessionState) {
    println!("\n{}", "Session status".bold());
    println!("  View:     {}", state.view());
    match state.session() {
        Some(session) => {
            println!("  Client:   {}", session.client.display_name.green());
            println!("  Session:  {}", session.uuid.cyan());
            println!("  History:  {} messages", session.history.len());
        }
        None => println!("  Session:  {}", "none".dimmed()),
    }
    println!("  Rendered: {} messages", state.pane().len());
    println!();
}
