//! Global configuration loader for skillbot.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`GlobalConfig`]. [`load_global_config`] falls back to defaults when the
//! file is missing or malformed; [`read_global_config`] reports the failure.

use std::path::Path;

use skillbot_types::config::GlobalConfig;
use skillbot_types::error::ConfigError;

/// File name of the global configuration inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Read and parse `path` strictly.
pub async fn read_global_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join(CONFIG_FILE_NAME);

    match read_global_config(&config_path).await {
        Ok(config) => config,
        Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            GlobalConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            GlobalConfig::default()
        }
    }
}
