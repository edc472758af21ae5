//! Hosts, endpoints and user-facing messages for the AgentQL API.

pub const AGENTQL_HOST_URL: &str = "https://api.agentql.com";
pub const DEV_PORTAL_URL: &str = "https://dev.agentql.com";
pub const QUERY_DOCS_URL: &str = "https://docs.agentql.com/agentql-query";
pub const SUPPORT_EMAIL: &str = "support@agentql.com";

pub const QUERY_ENDPOINT: &str = "v1/query-data";
pub const VALIDATE_API_KEY_ENDPOINT: &str = "v1/validate-api-key";

/// Value sent in the request-origin header
pub const REQUEST_ORIGIN: &str = "zapier";

// Header names are lowercase so they can be used as static `HeaderName`s
pub const API_KEY_HEADER: &str = "x-api-key";
pub const REQUEST_ORIGIN_HEADER: &str = "x-tf-request-origin";

pub const SAMPLE_REQUEST_ID: &str = "sample-request-id";
pub const SAMPLE_SCREENSHOT: &str = "a base64 encoded image";

pub const API_KEY_REQUIRED_MESSAGE: &str = "API Key is required.";
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

pub fn unauthorized_message() -> String {
    format!(
        "The API Key you supplied is invalid. Please check your API key and whether it has hit its usage limit at {}.",
        DEV_PORTAL_URL
    )
}

/// Message shown when the extraction service reports a failure through the webhook
pub fn service_error_message(error_info: &str, request_id: &str) -> String {
    format!(
        "An error occurred: {}. Your request id is {}, please contact support at {} with this request id for further assistance.",
        error_info, request_id, SUPPORT_EMAIL
    )
}
