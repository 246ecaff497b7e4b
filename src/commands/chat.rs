//! Interactive chat handler.
//!
//! Loads the roster, lets the user pick a client (or takes `--client`),
//! opens a session, and runs a readline loop that sends each line to the
//! backend through [`ChatController`].

use crate::api::{ChatBackend, HttpBackend};
use crate::commands::special_commands::{
    parse_selection, parse_special_command, print_help, SpecialCommand,
};
use crate::config::Config;
use crate::controller::{ChatController, View};
use crate::error::Result;
use crate::view;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

/// What the selection phase ended with
enum Selected {
    Opened,
    Quit,
}

/// Start interactive chat
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `client_name` - Open a session with this client instead of prompting
///
/// # Errors
///
/// Returns an error only for local failures (readline, HTTP client setup).
/// Backend failures are shown as notifications and never abort the loop.
pub async fn run_chat(config: Config, client_name: Option<String>) -> Result<()> {
    tracing::info!("Starting interactive chat");

    let backend = Arc::new(HttpBackend::new(&config.server)?);
    let mut controller = ChatController::new(backend.clone());
    let mut rl = DefaultEditor::new()?;

    view::print_welcome_banner(&config.server.base_url);

    if controller.load_roster().await.is_err() {
        view::print_notifications(&controller.take_notifications());
        return Ok(());
    }

    if controller.state().roster().is_empty() {
        println!("{}", "The backend has no clients to chat with.".yellow());
        return Ok(());
    }

    let selected = match client_name {
        Some(name) => open_named(&mut controller, &name).await,
        None => choose_client(&mut controller, &mut rl).await?,
    };

    if let Selected::Quit = selected {
        println!("Goodbye!");
        return Ok(());
    }

    if let Some(session) = controller.state().session() {
        println!(
            "\nYou are now talking to {}. Type '/help' for commands.\n",
            session.client.display_name.green().bold()
        );
    }

    converse(&mut controller, backend.as_ref(), &mut rl, &config).await?;

    println!("Goodbye!");
    Ok(())
}

async fn open_named(controller: &mut ChatController, name: &str) -> Selected {
    if controller.select_by_name(name).is_err() || controller.open_session().await.is_err() {
        view::print_notifications(&controller.take_notifications());
        return Selected::Quit;
    }
    Selected::Opened
}

async fn choose_client(controller: &mut ChatController, rl: &mut DefaultEditor) -> Result<Selected> {
    println!("{}", "Choose a client:".bold());
    print!("{}", view::format_roster(controller.state().roster()));
    println!();

    loop {
        match rl.readline("select> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if parse_special_command(trimmed) == Ok(SpecialCommand::Exit) {
                    return Ok(Selected::Quit);
                }

                let Some(key) = parse_selection(trimmed, controller.state().roster()) else {
                    println!(
                        "{}",
                        format!("'{}' is not a roster number or client name", trimmed).yellow()
                    );
                    continue;
                };

                if controller.select(key).is_err() {
                    view::print_notifications(&controller.take_notifications());
                    continue;
                }

                match controller.open_session().await {
                    Ok(_) => return Ok(Selected::Opened),
                    Err(_) => {
                        view::print_notifications(&controller.take_notifications());
                        println!("Pick a client to try again, or 'exit' to quit.");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                return Ok(Selected::Quit);
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                return Ok(Selected::Quit);
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                return Ok(Selected::Quit);
            }
        }
    }
}

async fn converse(
    controller: &mut ChatController,
    backend: &dyn ChatBackend,
    rl: &mut DefaultEditor,
    config: &Config,
) -> Result<()> {
    let mut rendered = controller.state().pane().len();

    while controller.state().view() == View::Conversation {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_special_command(trimmed) {
            Ok(SpecialCommand::Help) => {
                print_help();
                continue;
            }
            Ok(SpecialCommand::ShowStatus) => {
                view::print_status(controller.state());
                continue;
            }
            Ok(SpecialCommand::History) => {
                match controller.transcript().await {
                    Ok(messages) => {
                        let label = other_label(controller);
                        view::print_transcript(
                            &messages,
                            &label,
                            config.chat.show_system_messages,
                        );
                    }
                    Err(_) => view::print_notifications(&controller.take_notifications()),
                }
                continue;
            }
            Ok(SpecialCommand::End) => {
                match controller.close_session().await {
                    Ok(chat) => {
                        println!(
                            "Session with {} ended after {} messages.",
                            chat.display_name.green(),
                            chat.messages.len()
                        );
                        break;
                    }
                    Err(_) => view::print_notifications(&controller.take_notifications()),
                }
                continue;
            }
            Ok(SpecialCommand::Exit) => break,
            Ok(SpecialCommand::None) => {}
            Err(e) => {
                eprintln!("{}", e.to_string().yellow());
                continue;
            }
        }

        rl.add_history_entry(trimmed)?;
        controller.set_draft(trimmed);

        let pending = match controller.begin_send() {
            Ok(pending) => pending,
            Err(_) => {
                view::print_notifications(&controller.take_notifications());
                continue;
            }
        };
        view::print_new_entries(controller.state(), &mut rendered);

        let outcome = backend
            .send_message(pending.uuid(), pending.user_message())
            .await;
        if controller.complete_send(pending, outcome).is_err() {
            view::print_notifications(&controller.take_notifications());
        }
        view::print_new_entries(controller.state(), &mut rendered);
    }

    Ok(())
}

fn other_label(controller: &ChatController) -> String {
    controller
        .state()
        .session()
        .map(|s| s.client.display_name.clone())
        .unwrap_or_else(|| "them".to_string())
}
