use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use clientele::config::ServerConfig;

#[allow(dead_code)]
pub fn server_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn roster_body() -> Value {
    json!([
        {
            "display_name": "Ada Park",
            "background": "Owns a bakery with two locations",
            "needs_and_limitations": "Wants online ordering; small budget",
            "difficulty": "easy",
            "output_type": "web application"
        },
        {
            "display_name": "Bo Chen",
            "background": "Operations lead at a logistics firm",
            "needs_and_limitations": "Needs a report in two weeks",
            "difficulty": "hard",
            "output_type": "report"
        }
    ])
}

/// Chat body as the backend returns it: system prompt, then alternating turns
#[allow(dead_code)]
pub fn chat_body(uuid: &str, display_name: &str, turns: &[&str]) -> Value {
    let mut messages = vec![json!({"role": "system", "content": format!("You are {}.", display_name)})];
    for (i, content) in turns.iter().enumerate() {
        let role = if i % 2 == 0 { "user" } else { "assistant" };
        messages.push(json!({"role": role, "content": content}));
    }
    json!({
        "uuid": uuid,
        "display_name": display_name,
        "messages": messages
    })
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
