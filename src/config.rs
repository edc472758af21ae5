//! Configuration System
//!
//! Layered configuration for the API client and logging. Values come from built-in
//! defaults, a global config file, workspace config files and `AGENTQL_ZAP__*`
//! environment variables, in increasing order of precedence.

use crate::constants::{
    AGENTQL_HOST_URL, QUERY_ENDPOINT, REQUEST_ORIGIN, VALIDATE_API_KEY_ENDPOINT,
};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "AGENTQL_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Extraction API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host_url")]
    pub host_url: String,

    /// API key; falls back to `AGENTQL_API_KEY` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Value of the `X-TF-Request-Origin` header
    #[serde(default = "default_request_origin")]
    pub request_origin: String,

    #[serde(default = "default_validate_endpoint")]
    pub validate_endpoint: String,

    #[serde(default = "default_query_endpoint")]
    pub query_endpoint: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host_url() -> String {
    AGENTQL_HOST_URL.to_string()
}

fn default_request_origin() -> String {
    REQUEST_ORIGIN.to_string()
}

fn default_validate_endpoint() -> String {
    VALIDATE_API_KEY_ENDPOINT.to_string()
}

fn default_query_endpoint() -> String {
    QUERY_ENDPOINT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    900
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host_url: default_host_url(),
            api_key: None,
            request_origin: default_request_origin(),
            validate_endpoint: default_validate_endpoint(),
            query_endpoint: default_query_endpoint(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Join the host URL and an endpoint path
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.host_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    pub fn query_url(&self) -> String {
        self.endpoint_url(&self.query_endpoint)
    }

    pub fn validate_url(&self) -> String {
        self.endpoint_url(&self.validate_endpoint)
    }

    /// Configured API key, else the `AGENTQL_API_KEY` environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host_url.is_empty() {
            return Err("Host URL cannot be empty".to_string());
        }
        if !self.host_url.starts_with("http://") && !self.host_url.starts_with("https://") {
            return Err(format!(
                "Host URL must start with http:// or https://: {}",
                self.host_url
            ));
        }
        if self.request_origin.is_empty() {
            return Err("Request origin cannot be empty".to_string());
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("Timeouts must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Api(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Api(msg) => write!(f, "API: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.api.validate() {
            errors.push(ValidationError::Api(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
