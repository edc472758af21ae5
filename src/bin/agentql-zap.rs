//! agentql-zap CLI Binary
//!
//! Command-line interface for the AgentQL integration.

use agentql_zap::cli::{Cli, RunContext};
use agentql_zap::config::ConfigLoader;
use agentql_zap::logging::{init_logging, resolve_log_file_path, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args and config file
    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("agentql-zap CLI starting");

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", agentql_zap::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", agentql_zap::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
    };

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if cli.quiet {
        config.level = "off".to_string();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if config.output == "file" {
        if let Ok(path) = resolve_log_file_path(cli.log_file.clone(), config.file.clone()) {
            config.file = Some(path);
        }
    }

    config
}
