//! CLI parse: clap types for agentql-zap. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// agentql-zap CLI - AgentQL web data extraction integration
#[derive(Parser)]
#[command(name = "agentql-zap")]
#[command(about = "Extract web data with AgentQL queries and preview sample output")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate sample output for a query without calling the API
    Sample {
        /// Query text
        #[arg(long, conflicts_with = "file")]
        query: Option<String>,
        /// Read the query from a file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Output format (json or text)
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Submit a query-data request; the result is delivered to the webhook URL
    Query {
        /// Page to extract data from
        #[arg(long)]
        url: String,
        /// Query text
        #[arg(long)]
        query: String,
        /// Callback URL the service posts the result to
        #[arg(long)]
        webhook_url: String,
        /// Extraction mode (fast or standard)
        #[arg(long, default_value = "fast")]
        mode: String,
        /// Capture a screenshot
        #[arg(long)]
        screenshot: bool,
        /// Enable experimental stealth mode
        #[arg(long)]
        stealth: bool,
    },
    /// Turn a callback payload (JSON file) into the final action result
    Resume {
        /// Path to the callback payload
        #[arg(long)]
        payload: PathBuf,
    },
    /// Print the app definition (actions, fields, authentication)
    Definition {
        /// Output format (json or text)
        #[arg(long, default_value = "json")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Validate the configured API key against the API
    Test,
}
