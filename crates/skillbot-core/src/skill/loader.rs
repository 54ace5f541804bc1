//! Built-in skill config loading.
//!
//! Each `*.toml` file in the built-in skill directory holds one
//! [`BuiltinSkillConfig`]. Files are read in file-name order so registration
//! order is stable across runs.

use std::path::Path;

use anyhow::Context;
use skillbot_types::skill::BuiltinSkillConfig;

/// Parse a single built-in skill config from TOML text.
pub fn parse_builtin_skill(content: &str) -> anyhow::Result<BuiltinSkillConfig> {
    toml::from_str(content).context("Failed to parse built-in skill config")
}

/// Serialize a built-in skill config to a TOML string.
pub fn serialize_builtin_skill(config: &BuiltinSkillConfig) -> anyhow::Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize built-in skill config")
}

/// Load every `*.toml` built-in skill config in `dir`, sorted by file name.
///
/// Non-TOML files and subdirectories are ignored. The first unreadable or
/// malformed file aborts the load with an error naming its path.
pub async fn load_builtin_skill_configs(dir: &Path) -> anyhow::Result<Vec<BuiltinSkillConfig>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read skill directory {}", dir.display()))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to list skill directory {}", dir.display()))?
    {
        let path = entry.path();
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        if is_toml && entry.file_type().await.is_ok_and(|t| t.is_file()) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut configs = Vec::with_capacity(paths.len());
    for path in paths {
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = parse_builtin_skill(&content)
            .with_context(|| format!("Invalid built-in skill file {}", path.display()))?;
        tracing::debug!(skill = %config.name, path = %path.display(), "loaded built-in skill config");
        configs.push(config);
    }

    Ok(configs)
}
