//! Authentication
//!
//! Custom API-key authentication: the key travels in the `X-API-Key` header of every
//! outbound request, and a small set of response statuses is mapped to user-facing errors.

use crate::client::AgentQlClient;
use crate::constants::{
    unauthorized_message, API_KEY_HEADER, API_KEY_REQUIRED_MESSAGE, DEV_PORTAL_URL,
    INTERNAL_SERVER_ERROR_MESSAGE,
};
use crate::error::ApiError;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Credentials supplied by the user when connecting an account
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthData {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

impl std::fmt::Debug for AuthData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthData")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl AuthData {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.api_key.trim().is_empty() {
            return Err(ApiError::InvalidInput(API_KEY_REQUIRED_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Input field shown when connecting an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthField {
    pub key: String,
    pub label: String,
    pub required: bool,
    #[serde(rename = "helpText")]
    pub help_text: String,
}

/// Authentication scheme description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(rename = "type")]
    pub auth_type: String,
    pub fields: Vec<AuthField>,
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        auth_type: "custom".to_string(),
        fields: vec![AuthField {
            key: "apiKey".to_string(),
            label: "API Key".to_string(),
            required: true,
            help_text: format!(
                "Get a free API key at [dev.agentql.com]({}) ",
                DEV_PORTAL_URL
            ),
        }],
    }
}

/// Before-request hook: attach the API key header when a key is present
pub fn include_api_key(headers: &mut HeaderMap, auth: &AuthData) -> Result<(), ApiError> {
    if auth.api_key.is_empty() {
        return Ok(());
    }
    let value = HeaderValue::from_str(&auth.api_key)
        .map_err(|e| ApiError::InvalidInput(format!("API key is not a valid header value: {}", e)))?;
    headers.insert(API_KEY_HEADER, value);
    Ok(())
}

/// After-response hook: map authentication and server failures to user-facing errors.
/// Other statuses pass through untouched.
pub fn handle_bad_response(status: StatusCode) -> Result<(), ApiError> {
    match status {
        StatusCode::UNAUTHORIZED => {
            warn!(status = status.as_u16(), "API key rejected");
            Err(ApiError::Authentication(unauthorized_message()))
        }
        StatusCode::INTERNAL_SERVER_ERROR => {
            warn!(status = status.as_u16(), "Extraction API internal error");
            Err(ApiError::InternalServer(
                INTERNAL_SERVER_ERROR_MESSAGE.to_string(),
            ))
        }
        _ => Ok(()),
    }
}

/// Verify the connected account's credentials against the API
#[instrument(skip_all)]
pub async fn test(client: &dyn AgentQlClient) -> Result<(), ApiError> {
    client.validate_api_key().await?;
    info!("API key validated");
    Ok(())
}
