//! Error types for the AgentQL integration.

use crate::constants::QUERY_DOCS_URL;
use thiserror::Error;

/// Query parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Query is empty")]
    Empty,

    #[error("Expected '{expected}' at line {line}, column {column}, found {found}")]
    Expected {
        expected: char,
        found: String,
        line: usize,
        column: usize,
    },

    #[error("Unexpected character '{found}' at line {line}, column {column}")]
    UnexpectedChar {
        found: char,
        line: usize,
        column: usize,
    },

    #[error("Unterminated description starting at line {line}, column {column}")]
    UnterminatedDescription { line: usize, column: usize },

    #[error("Unclosed block '{name}' opened at line {line}, column {column}")]
    UnclosedBlock {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("Block '{name}' at line {line}, column {column} has no fields")]
    EmptyBlock {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("Duplicate field '{name}' at line {line}, column {column}")]
    DuplicateField {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("Unexpected content after query at line {line}, column {column}")]
    TrailingContent { line: usize, column: usize },

    #[error("Query nesting exceeds maximum depth of {max}")]
    TooDeep { max: usize },

    #[error("Query would produce {tokens} sample values, more than the limit of {max}")]
    SampleTooLarge { tokens: u64, max: u64 },
}

/// Errors surfaced by the integration's actions, authentication and client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid AgentQL query! \n{0}. \nPlease see {docs} for more information.", docs = QUERY_DOCS_URL)]
    InvalidQuery(#[from] QueryError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    InternalServer(String),

    #[error("{message}")]
    Service { message: String, status: Option<u16> },

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status associated with the error, when one is known
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication(_) => Some(401),
            ApiError::InternalServer(_) => Some(500),
            ApiError::Service { status, .. } => *status,
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable error name, matching the names the automation platform displays
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidQuery(_) => "InvalidAgentQLQueryError",
            ApiError::InvalidInput(_) => "InvalidInputError",
            ApiError::Authentication(_) => "AuthenticationError",
            ApiError::InternalServer(_) => "InternalServerError",
            ApiError::Service { .. } => "ServiceError",
            ApiError::RequestFailed { .. } => "RequestFailedError",
            ApiError::Http(_) => "HttpError",
            ApiError::ConfigError(_) => "ConfigError",
            ApiError::IoError(_) => "IoError",
            ApiError::Serialization(_) => "SerializationError",
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
