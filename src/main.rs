//! Clientele - practice client chat CLI
//!
#![doc = "Main entry point for the Clientele chat client."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clientele::cli::{Cli, Commands};
use clientele::commands;
use clientele::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    match cli.command {
        Commands::Chat { client } => {
            tracing::info!("Starting chat against {}", config.server.base_url);
            if let Some(name) = &client {
                tracing::debug!("Opening session with {} directly", name);
            }
            commands::chat::run_chat(config, client).await?;
            Ok(())
        }
        Commands::Clients { json } => {
            tracing::info!("Listing clients from {}", config.server.base_url);
            commands::clients::list_clients(&config, json).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never interleave with roster JSON on stdout.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "clientele=debug"
    } else {
        "clientele=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
