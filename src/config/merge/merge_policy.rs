//! Merge rules: defaults, override order, conflict handling.

use crate::constants::{AGENTQL_HOST_URL, QUERY_ENDPOINT, REQUEST_ORIGIN, VALIDATE_API_KEY_ENDPOINT};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("api.host_url", AGENTQL_HOST_URL)?
        .set_default("api.request_origin", REQUEST_ORIGIN)?
        .set_default("api.validate_endpoint", VALIDATE_API_KEY_ENDPOINT)?
        .set_default("api.query_endpoint", QUERY_ENDPOINT)?
        .set_default("api.connect_timeout_secs", 10)?
        .set_default("api.request_timeout_secs", 900)
}
