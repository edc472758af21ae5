//! Logging System
//!
//! Structured logging using the `tracing` crate, with configurable level, format and
//! destination. Logs go to stderr by default so command output on stdout stays clean.

use crate::error::ApiError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_ENV: &str = "AGENTQL_ZAP_LOG";
pub const LOG_FORMAT_ENV: &str = "AGENTQL_ZAP_LOG_FORMAT";
pub const LOG_OUTPUT_ENV: &str = "AGENTQL_ZAP_LOG_OUTPUT";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (used when output is "file"); defaults to the user data directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format, terminal outputs only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        parse_format(&self.format)?;
        parse_output(&self.output)?;
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

/// Default log file: `<data dir>/agentql-zap.log`
pub fn default_log_file() -> Option<PathBuf> {
    ProjectDirs::from("com", "agentql", "agentql-zap")
        .map(|dirs| dirs.data_dir().join("agentql-zap.log"))
}

/// Pick the log file path: explicit CLI value, then config value, then default location.
pub fn resolve_log_file_path(
    cli_value: Option<PathBuf>,
    config_value: Option<PathBuf>,
) -> Result<PathBuf, ApiError> {
    cli_value
        .or(config_value)
        .or_else(default_log_file)
        .ok_or_else(|| ApiError::ConfigError("Unable to determine log file path".to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogOutput {
    Stdout,
    Stderr,
    File,
}

fn parse_format(format: &str) -> Result<LogFormat, String> {
    match format {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        )),
    }
}

fn parse_output(output: &str) -> Result<LogOutput, String> {
    match output {
        "stdout" => Ok(LogOutput::Stdout),
        "stderr" => Ok(LogOutput::Stderr),
        "file" => Ok(LogOutput::File),
        other => Err(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            other
        )),
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (AGENTQL_ZAP_LOG, AGENTQL_ZAP_LOG_FORMAT, AGENTQL_ZAP_LOG_OUTPUT)
/// 2. The given config (CLI flags already merged in by the caller)
/// 3. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ApiError> {
    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let base_subscriber = Registry::default().with(filter);

    macro_rules! install {
        ($writer:expr, $ansi:expr) => {
            match format {
                LogFormat::Json => base_subscriber
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(true)
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_writer($writer),
                    )
                    .try_init(),
                LogFormat::Text => base_subscriber
                    .with(
                        fmt::layer()
                            .with_target(true)
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_ansi($ansi)
                            .with_writer($writer),
                    )
                    .try_init(),
            }
        };
    }

    let result = match output {
        LogOutput::Stdout => install!(std::io::stdout, use_color),
        LogOutput::Stderr => install!(std::io::stderr, use_color),
        LogOutput::File => {
            let path = resolve_log_file_path(None, config.and_then(|c| c.file.clone()))?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ApiError::ConfigError(format!("Failed to create log directory: {}", e))
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    ApiError::ConfigError(format!("Failed to open log file {:?}: {}", path, e))
                })?;
            install!(std::sync::Mutex::new(file), false)
        }
    };

    result.map_err(|e| ApiError::ConfigError(format!("Failed to install logger: {}", e)))
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("warn");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);
    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            let directive = format!("{}={}", module, module_level);
            filter = filter.add_directive(
                directive
                    .parse()
                    .map_err(|e| ApiError::ConfigError(format!("Invalid log directive: {}", e)))?,
            );
        }
    }

    Ok(filter)
}

fn determine_format(config: Option<&LoggingConfig>) -> Result<LogFormat, ApiError> {
    if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
        if let Ok(format) = parse_format(&format) {
            return Ok(format);
        }
    }
    parse_format(config.map(|c| c.format.as_str()).unwrap_or("text")).map_err(ApiError::ConfigError)
}

fn determine_output(config: Option<&LoggingConfig>) -> Result<LogOutput, ApiError> {
    if let Ok(output) = std::env::var(LOG_OUTPUT_ENV) {
        return parse_output(&output).map_err(ApiError::ConfigError);
    }
    parse_output(config.map(|c| c.output.as_str()).unwrap_or("stderr"))
        .map_err(ApiError::ConfigError)
}
