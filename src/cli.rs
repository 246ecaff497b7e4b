//! Command-line interface definition for Clientele
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat and roster listing.

use clap::{Parser, Subcommand};

/// Clientele - practice conversations with simulated clients
///
/// Pick a client from the backend's roster, open a session, and chat.
#[derive(Parser, Debug, Clone)]
#[command(name = "clientele")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the backend base URL (e.g. http://127.0.0.1:5000)
    #[arg(long)]
    pub server: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Clientele
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Open a session with this client directly instead of prompting
        #[arg(long)]
        client: Option<String>,
    },

    /// List the clients available on the backend
    Clients {
        /// Output the roster as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            server: None,
            command: Commands::Chat { client: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(cli.server.is_none());
        assert!(matches!(cli.command, Commands::Chat { client: None }));
    }

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["clientele", "chat"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat { client: None }));
    }

    #[test]
    fn test_cli_parse_chat_with_client() {
        let cli = Cli::try_parse_from(["clientele", "chat", "--client", "Ada Park"]).unwrap();
        if let Commands::Chat { client } = cli.command {
            assert_eq!(client, Some("Ada Park".to_string()));
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_clients_json() {
        let cli = Cli::try_parse_from(["clientele", "clients", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Clients { json: true }));
    }

    #[test]
    fn test_cli_parse_server_override() {
        let cli = Cli::try_parse_from([
            "clientele",
            "--server",
            "http://localhost:8080",
            "clients",
        ])
        .unwrap();
        assert_eq!(cli.server, Some("http://localhost:8080".to_string()));
    }

    #[test]
    fn test_cli_parse_verbose_and_config() {
        let cli =
            Cli::try_parse_from(["clientele", "-v", "--config", "custom.yaml", "chat"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some("custom.yaml".to_string()));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["clientele"]).is_err());
    }
}
