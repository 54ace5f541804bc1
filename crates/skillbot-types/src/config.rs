//! Global configuration types for skillbot.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls logging
//! output and which built-in skills are loaded and enabled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Top-level configuration.
///
/// Loaded from `{data_dir}/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub skills: SkillsConfig,
}

/// Output format of the `fmt` tracing layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Logging settings consumed by `skillbot-observe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "skillbot_core=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            otel: false,
        }
    }
}

/// Built-in skill settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// Names of built-in skills to keep registered but inactive.
    #[serde(default)]
    pub disabled: Vec<String>,

    /// Directory of `*.toml` built-in skill configs to load at startup.
    #[serde(default)]
    pub builtin_dir: Option<PathBuf>,
}

impl SkillsConfig {
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|d| d == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(!config.logging.otel);
        assert!(config.skills.disabled.is_empty());
        assert!(config.skills.builtin_dir.is_none());
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.skills.disabled.is_empty());
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
[logging]
level = "skillbot_core=debug"
format = "json"
otel = true

[skills]
disabled = ["weather", "echo"]
builtin_dir = "/etc/skillbot/skills"
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "skillbot_core=debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.logging.otel);
        assert!(config.skills.is_disabled("echo"));
        assert!(!config.skills.is_disabled("translate"));
        assert_eq!(
            config.skills.builtin_dir,
            Some(PathBuf::from("/etc/skillbot/skills"))
        );
    }

    #[test]
    fn test_partial_logging_section_keeps_defaults() {
        let config: GlobalConfig = toml::from_str("[logging]\notel = true\n").unwrap();
        assert!(config.logging.otel);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let result = toml::from_str::<GlobalConfig>("[logging]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(LogFormat::Pretty.to_string(), "pretty");
        assert_eq!(LogFormat::Json.to_string(), "json");
    }
}
