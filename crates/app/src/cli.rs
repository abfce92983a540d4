//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

/// Command-line client for the rental admin API.
#[derive(Parser, Debug)]
#[command(name = "rental-admin", version, about)]
pub struct Cli {
    /// Configuration file (TOML or JSON).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Session file holding the tokens.
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Overrides the configured API base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Overrides the configured timeout, in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed by the CLI.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Signs in and stores the session tokens.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Removes the stored session tokens.
    Logout,
    /// Sends a GET request.
    Get {
        /// Path relative to the base URL.
        path: String,
        /// Query parameter as `key=value`; repeatable.
        #[arg(long = "query", short = 'q', value_parser = parse_key_val)]
        query: Vec<(String, String)>,
    },
    /// Sends a POST request.
    Post {
        /// Path relative to the base URL.
        path: String,
        /// JSON body.
        #[arg(long, short = 'd', value_parser = parse_json, default_value = "{}")]
        data: Value,
    },
    /// Sends a PUT request.
    Put {
        /// Path relative to the base URL.
        path: String,
        /// JSON body.
        #[arg(long, short = 'd', value_parser = parse_json, default_value = "{}")]
        data: Value,
    },
    /// Sends a PATCH request.
    Patch {
        /// Path relative to the base URL.
        path: String,
        /// JSON body.
        #[arg(long, short = 'd', value_parser = parse_json, default_value = "{}")]
        data: Value,
    },
    /// Sends a DELETE request.
    Delete {
        /// Path relative to the base URL.
        path: String,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {e}"))
}
