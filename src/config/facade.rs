//! Config loading facade: assembles sources in precedence order.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::AppConfig;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Loads [`AppConfig`] from defaults, files and environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, `config/{AGENTQL_ZAP_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<AppConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: AppConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from a single file, skipping global and workspace files.
    /// Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }
}
