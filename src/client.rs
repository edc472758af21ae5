//! AgentQL REST client
//!
//! [`AgentQlClient`] is the seam between the integration's actions and the extraction
//! API. [`HttpAgentQlClient`] talks to the real service over `reqwest`.

use crate::auth::{handle_bad_response, include_api_key, AuthData};
use crate::config::ApiConfig;
use crate::constants::REQUEST_ORIGIN_HEADER;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Extraction mode requested from the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Recommended for typical use cases
    #[default]
    Fast,
    /// Deeper analysis for complex or high-volume data
    Standard,
}

impl ExtractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::Fast => "fast",
            ExtractionMode::Standard => "standard",
        }
    }
}

impl std::str::FromStr for ExtractionMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(ExtractionMode::Fast),
            "standard" => Ok(ExtractionMode::Standard),
            other => Err(ApiError::InvalidInput(format!(
                "Unknown extraction mode '{}' (expected 'fast' or 'standard')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub is_screenshot_enabled: bool,
    pub mode: ExtractionMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetadata {
    pub experimental_stealth_mode_enabled: bool,
}

/// Body of a query-data request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDataRequest {
    pub url: String,
    pub query: String,
    pub params: QueryParams,
    pub metadata: RequestMetadata,
    /// Where the service posts the result once extraction finishes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

/// Extraction API operations used by the integration
#[async_trait]
pub trait AgentQlClient: Send + Sync {
    /// Succeeds when the configured API key is accepted
    async fn validate_api_key(&self) -> Result<(), ApiError>;

    /// Submit a query-data request and return the acknowledgement body
    async fn query_data(&self, request: &QueryDataRequest) -> Result<Value, ApiError>;
}

/// HTTP implementation of [`AgentQlClient`]
pub struct HttpAgentQlClient {
    client: Client,
    config: ApiConfig,
    auth: AuthData,
}

impl HttpAgentQlClient {
    pub fn new(config: ApiConfig, auth: AuthData) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Http(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            config,
            auth,
        })
    }

    /// Build a client from configuration, resolving the API key from config or environment
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let auth = AuthData::new(config.resolve_api_key().unwrap_or_default());
        auth.validate()?;
        Self::new(config.clone(), auth)
    }

    /// Headers sent with every request
    pub fn default_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        include_api_key(&mut headers, &self.auth)?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let origin = HeaderValue::from_str(&self.config.request_origin).map_err(|e| {
            ApiError::ConfigError(format!("Request origin is not a valid header value: {}", e))
        })?;
        headers.insert(REQUEST_ORIGIN_HEADER, origin);
        Ok(headers)
    }
}

fn map_http_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Http(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::Http(format!("Connection error: {}", error))
    } else {
        ApiError::Http(error.to_string())
    }
}

/// Pull a readable message out of an error body: `error_info` when the body is JSON
/// carrying it, the JSON itself otherwise, else the raw text.
pub fn error_message_from_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("error_info") {
            Some(Value::String(info)) => info.clone(),
            Some(other) => other.to_string(),
            None => Value::Object(map).to_string(),
        },
        Ok(other) => other.to_string(),
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.to_string(),
    }
}

/// Drop transport details from an acknowledgement so only the service payload remains
pub fn strip_transport_fields(mut ack: Value) -> Value {
    if let Value::Object(map) = &mut ack {
        map.remove("request");
        map.remove("headers");
    }
    ack
}

async fn check_response(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    handle_bad_response(status)?;
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message_from_body(&body);
    warn!(status = status.as_u16(), %message, "Extraction API request failed");
    Err(ApiError::RequestFailed {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AgentQlClient for HttpAgentQlClient {
    async fn validate_api_key(&self) -> Result<(), ApiError> {
        self.auth.validate()?;
        let url = self.config.validate_url();
        debug!(%url, "Validating API key");
        let response = self
            .client
            .get(&url)
            .headers(self.default_headers()?)
            .send()
            .await
            .map_err(map_http_error)?;
        check_response(response).await?;
        Ok(())
    }

    async fn query_data(&self, request: &QueryDataRequest) -> Result<Value, ApiError> {
        let url = self.config.query_url();
        debug!(%url, target_url = %request.url, mode = request.params.mode.as_str(), "Submitting query-data request");
        let response = self
            .client
            .post(&url)
            .headers(self.default_headers()?)
            .json(request)
            .send()
            .await
            .map_err(map_http_error)?;
        let response = check_response(response).await?;

        let text = response.text().await.map_err(map_http_error)?;
        if text.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        let ack: Value = serde_json::from_str(&text)?;
        Ok(strip_transport_fields(ack))
    }
}
