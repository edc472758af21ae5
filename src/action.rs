//! `query_data` create action
//!
//! Extracts data from a web page with an AgentQL query. While the platform loads sample
//! data, the query is parsed locally and placeholder output of the same shape is
//! returned. Live runs submit the request with a callback URL and finish in
//! [`perform_resume`] when the service posts the result back.

use crate::client::{AgentQlClient, ExtractionMode, QueryDataRequest, QueryParams, RequestMetadata};
use crate::constants::{service_error_message, SAMPLE_REQUEST_ID, SAMPLE_SCREENSHOT};
use crate::error::{ApiError, QueryError};
use crate::query::parse_query;
use crate::sample::{generate_sample, sample_token_count, SampleMap, MAX_SAMPLE_TOKENS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

pub const ACTION_KEY: &str = "query_data";

/// User-supplied inputs of the action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDataInput {
    pub url: String,
    pub query: String,
    #[serde(default)]
    pub mode: ExtractionMode,
    #[serde(default)]
    pub is_screenshot_enabled: bool,
    #[serde(default)]
    pub experimental_stealth_mode_enabled: bool,
}

impl QueryDataInput {
    pub fn new(url: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: query.into(),
            mode: ExtractionMode::default(),
            is_screenshot_enabled: false,
            experimental_stealth_mode_enabled: false,
        }
    }

    /// Check required fields and the URL scheme
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.query.trim().is_empty() {
            return Err(ApiError::InvalidInput("AgentQL Query is required".to_string()));
        }
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ApiError::InvalidInput("Website URL is required".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ApiError::InvalidInput(
                "URL scheme must be 'http' or 'https'".to_string(),
            ));
        }
        Ok(())
    }

    /// Request body for the extraction API
    pub fn to_request(&self, webhook_url: Option<String>) -> QueryDataRequest {
        QueryDataRequest {
            url: self.url.trim().to_string(),
            query: self.query.clone(),
            params: QueryParams {
                is_screenshot_enabled: self.is_screenshot_enabled,
                mode: self.mode,
            },
            metadata: RequestMetadata {
                experimental_stealth_mode_enabled: self.experimental_stealth_mode_enabled,
            },
            webhook_url,
        }
    }
}

/// Placeholder result shown while a user configures the action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleOutput {
    pub data: SampleMap,
    pub request_id: String,
    pub screenshot: String,
}

impl SampleOutput {
    pub fn new(data: SampleMap) -> Self {
        Self {
            data,
            request_id: SAMPLE_REQUEST_ID.to_string(),
            screenshot: SAMPLE_SCREENSHOT.to_string(),
        }
    }
}

/// Result of [`perform`]
#[derive(Debug, Clone, PartialEq)]
pub enum PerformOutcome {
    /// Sample-loading run
    Sample(SampleOutput),
    /// Live run: acknowledgement returned by the service; the result arrives by webhook
    Submitted(Value),
}

impl PerformOutcome {
    pub fn to_json(&self) -> Result<Value, ApiError> {
        match self {
            PerformOutcome::Sample(sample) => Ok(serde_json::to_value(sample)?),
            PerformOutcome::Submitted(ack) => Ok(ack.clone()),
        }
    }
}

/// Callback metadata posted by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackMetadata {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub screenshot: Option<String>,
}

/// Payload posted to the callback URL when extraction finishes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackPayload {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub error_info: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub metadata: CallbackMetadata,
}

/// Final output of a live run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDataResult {
    pub data: Value,
    pub request_id: String,
    pub screenshot: Option<String>,
}

/// Produce sample output for a query without contacting the service.
///
/// List nesting multiplies output size, so queries whose sample would exceed
/// [`MAX_SAMPLE_TOKENS`] are rejected before generation.
pub fn load_sample(query: &str) -> Result<SampleOutput, ApiError> {
    let root = parse_query(query).and_then(|root| {
        let tokens = sample_token_count(&root);
        if tokens > MAX_SAMPLE_TOKENS {
            return Err(QueryError::SampleTooLarge {
                tokens,
                max: MAX_SAMPLE_TOKENS,
            });
        }
        Ok(root)
    });
    let root = root.map_err(|e| {
        warn!(error = %e, "Invalid query while loading sample");
        ApiError::InvalidQuery(e)
    })?;
    Ok(SampleOutput::new(generate_sample(&root)))
}

/// Run the action.
///
/// With `is_loading_sample` the query is only parsed and sampled. Otherwise a callback
/// URL is obtained from `callback_url` and the request is submitted.
#[instrument(skip_all, fields(action = ACTION_KEY, sample = is_loading_sample))]
pub async fn perform<F>(
    client: &dyn AgentQlClient,
    input: &QueryDataInput,
    is_loading_sample: bool,
    callback_url: F,
) -> Result<PerformOutcome, ApiError>
where
    F: FnOnce() -> Result<String, ApiError> + Send,
{
    if is_loading_sample {
        let sample = load_sample(&input.query)?;
        info!(fields = sample.data.len(), "Returned sample output");
        return Ok(PerformOutcome::Sample(sample));
    }

    input.validate()?;
    let webhook_url = callback_url()?;
    let request = input.to_request(Some(webhook_url));
    let ack = client.query_data(&request).await?;
    info!(url = %request.url, "Query-data request submitted");
    Ok(PerformOutcome::Submitted(ack))
}

/// Finish a live run from the callback payload
#[instrument(skip_all, fields(action = ACTION_KEY, request_id = %payload.metadata.request_id))]
pub fn perform_resume(payload: CallbackPayload) -> Result<QueryDataResult, ApiError> {
    if let Some(error_info) = payload.error_info.as_deref().filter(|e| !e.is_empty()) {
        warn!(%error_info, status = ?payload.status, "Extraction failed");
        return Err(ApiError::Service {
            message: service_error_message(error_info, &payload.metadata.request_id),
            status: payload.status,
        });
    }

    info!("Extraction completed");
    Ok(QueryDataResult {
        data: payload.data,
        request_id: payload.metadata.request_id,
        screenshot: payload.metadata.screenshot,
    })
}
