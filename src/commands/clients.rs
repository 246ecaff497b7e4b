//! Roster listing command

use crate::api::{ChatBackend, Client, HttpBackend};
use crate::config::Config;
use crate::error::{ClienteleError, Result};

use colored::Colorize;
use prettytable::{format, row, Table};

/// Fetch the roster and print it
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `json` - Print JSON instead of a table
///
/// # Errors
///
/// Returns the backend error if the roster cannot be fetched
pub async fn list_clients(config: &Config, json: bool) -> Result<()> {
    let backend = HttpBackend::new(&config.server)?;
    let clients = backend.list_clients().await?;

    if json {
        println!("{}", roster_json(&clients)?);
        return Ok(());
    }

    if clients.is_empty() {
        println!("{}", "No clients available.".yellow());
        return Ok(());
    }

    roster_table(&clients).printstd();
    println!();
    println!("Use {} to start a session.", "clientele chat --client <NAME>".cyan());
    Ok(())
}

/// Serialize the roster as pretty JSON
fn roster_json(clients: &[Client]) -> Result<String> {
    serde_json::to_string_pretty(clients).map_err(|e| ClienteleError::Serialization(e).into())
}

fn roster_table(clients: &[Client]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row!["#".bold(), "Client".bold(), "Difficulty".bold(), "Output".bold()]);

    for (i, client) in clients.iter().enumerate() {
        table.add_row(row![
            i + 1,
            client.display_name,
            client.difficulty.as_deref().unwrap_or("-"),
            client.output_type.as_deref().unwrap_or("-")
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_json_is_parseable_and_ordered() {
        let mut ada = Client::named("Ada Park");
        ada.difficulty = Some("easy".to_string());
        let clients = vec![ada, Client::named("Bo Chen")];

        let json = roster_json(&clients).unwrap();
        let parsed: Vec<Client> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, clients);
        assert!(!json.contains("background"));
    }

    #[test]
    fn test_roster_table_has_header_and_one_row_per_client() {
        let clients = vec![Client::named("Ada Park"), Client::named("Bo Chen")];
        let table = roster_table(&clients);
        assert_eq!(table.len(), 3);

        let rendered = table.to_string();
        assert!(rendered.contains("Ada Park"));
        assert!(rendered.contains("Bo Chen"));
    }
}
