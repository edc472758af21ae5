//! CLI route: single route table and run context.

use crate::action::{self, CallbackPayload, QueryDataInput};
use crate::auth;
use crate::cli::parse::{AuthCommands, Commands};
use crate::cli::presentation::{format_definition_text, format_json, format_sample_text};
use crate::client::{AgentQlClient, ExtractionMode, HttpAgentQlClient};
use crate::config::{AppConfig, ConfigLoader};
use crate::definition::app_definition;
use crate::error::ApiError;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded configuration and workspace.
pub struct RunContext {
    config: AppConfig,
    workspace_root: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Self::with_config(workspace_root, config)
    }

    /// Create run context from an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: AppConfig) -> Result<Self, ApiError> {
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        Ok(Self {
            config,
            workspace_root,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        debug!(command = command_name(command), "Executing command");
        match command {
            Commands::Sample {
                query,
                file,
                format,
            } => self.handle_sample(query.as_deref(), file.as_deref(), format),
            Commands::Auth { command } => match command {
                AuthCommands::Test => self.handle_auth_test(),
            },
            Commands::Query {
                url,
                query,
                webhook_url,
                mode,
                screenshot,
                stealth,
            } => {
                let input = QueryDataInput {
                    url: url.clone(),
                    query: query.clone(),
                    mode: mode.parse::<ExtractionMode>()?,
                    is_screenshot_enabled: *screenshot,
                    experimental_stealth_mode_enabled: *stealth,
                };
                self.handle_query(&input, webhook_url)
            }
            Commands::Resume { payload } => self.handle_resume(payload),
            Commands::Definition { format } => self.handle_definition(format),
        }
    }

    fn handle_sample(
        &self,
        query: Option<&str>,
        file: Option<&Path>,
        format: &str,
    ) -> Result<String, ApiError> {
        let source = match (query, file) {
            (Some(query), _) => query.to_string(),
            (None, Some(path)) => std::fs::read_to_string(self.resolve(path))?,
            (None, None) => {
                return Err(ApiError::InvalidInput(
                    "Provide a query with --query or --file".to_string(),
                ))
            }
        };

        let sample = action::load_sample(&source)?;
        match format {
            "text" => Ok(format_sample_text(&sample.data)),
            "json" => format_json(&sample),
            other => Err(invalid_format(other)),
        }
    }

    fn handle_auth_test(&self) -> Result<String, ApiError> {
        let client = HttpAgentQlClient::from_config(&self.config.api)?;
        block_on(auth::test(&client))??;
        Ok("API key is valid.".to_string())
    }

    fn handle_query(&self, input: &QueryDataInput, webhook_url: &str) -> Result<String, ApiError> {
        let client = HttpAgentQlClient::from_config(&self.config.api)?;
        let client: &dyn AgentQlClient = &client;
        let webhook_url = webhook_url.to_string();
        let outcome = block_on(action::perform(client, input, false, move || {
            Ok(webhook_url)
        }))??;
        info!("Query submitted");
        format_json(&outcome.to_json()?)
    }

    fn handle_resume(&self, payload_path: &Path) -> Result<String, ApiError> {
        let raw = std::fs::read_to_string(self.resolve(payload_path))?;
        let payload: CallbackPayload = serde_json::from_str(&raw)?;
        let result = action::perform_resume(payload)?;
        format_json(&result)
    }

    fn handle_definition(&self, format: &str) -> Result<String, ApiError> {
        let definition = app_definition();
        match format {
            "text" => Ok(format_definition_text(&definition)),
            "json" => format_json(&definition),
            other => Err(invalid_format(other)),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }
}

/// Command name for logging (e.g. "sample", "auth.test")
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Sample { .. } => "sample",
        Commands::Auth { command } => match command {
            AuthCommands::Test => "auth.test",
        },
        Commands::Query { .. } => "query",
        Commands::Resume { .. } => "resume",
        Commands::Definition { .. } => "definition",
    }
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::InvalidInput(format!(
        "Invalid format: {} (must be 'json' or 'text')",
        format
    ))
}

fn block_on<F: Future>(future: F) -> Result<F::Output, ApiError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| ApiError::Http(format!("Failed to create async runtime: {}", e)))?;
    Ok(rt.block_on(future))
}
