//! Startup wiring for built-in skills.
//!
//! Loads the built-in skill configs named by [`SkillsConfig::builtin_dir`],
//! pairs each with its handler by skill name, registers them, and then
//! applies the `disabled` list.

use std::collections::HashMap;

use anyhow::Context;
use skillbot_types::config::SkillsConfig;
use skillbot_types::id::SkillId;

use super::handler::SkillHandler;
use super::loader::load_builtin_skill_configs;
use super::registry::BuiltinSkillRegistry;

/// Register the built-in skills described by `config`.
///
/// Configs without a matching entry in `handlers` are skipped with a warning.
/// When `builtin_dir` is unset nothing is loaded, but `disabled` is still
/// applied to whatever the registry already holds. Returns the ids of the
/// newly registered skills in load order.
pub async fn register_builtin_skills(
    registry: &mut BuiltinSkillRegistry,
    config: &SkillsConfig,
    handlers: &HashMap<String, SkillHandler>,
) -> anyhow::Result<Vec<SkillId>> {
    let mut registered = Vec::new();

    if let Some(dir) = &config.builtin_dir {
        let configs = load_builtin_skill_configs(dir).await?;

        for skill_config in configs {
            let Some(handler) = handlers.get(&skill_config.name) else {
                tracing::warn!(skill = %skill_config.name, "no handler for built-in skill, skipping");
                continue;
            };

            let name = skill_config.name.clone();
            let id = registry
                .register(skill_config, handler.clone())
                .with_context(|| format!("Failed to register built-in skill '{name}'"))?;

            if config.is_disabled(&name) {
                tracing::info!(skill = %name, "built-in skill registered as disabled");
            }
            registered.push(id);
        }
    } else {
        tracing::debug!("no builtin_dir configured, skipping built-in skill loading");
    }

    registry.apply_config(config);
    Ok(registered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::handler::handler_fn;
    use skillbot_types::error::SkillError;
    use skillbot_types::id::{bot_id, session_id, user_id};
    use skillbot_types::message::{IncomingMessage, ProcessedResponse};
    use skillbot_types::skill::BuiltinSkillConfig;
    use tempfile::TempDir;

    fn reply_with(text: &'static str) -> SkillHandler {
        handler_fn(move |message: IncomingMessage| async move {
            Ok(ProcessedResponse::reply_to(&message, text))
        })
    }

    fn handlers() -> HashMap<String, SkillHandler> {
        HashMap::from([
            ("echo".to_string(), reply_with("echo")),
            ("weather".to_string(), reply_with("sunny")),
        ])
    }

    fn message(content: &str) -> IncomingMessage {
        IncomingMessage::new(session_id("s-1"), bot_id("b-1"), user_id("u-1"), content)
    }

    async fn write_skill_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("echo.toml"),
            "name = \"echo\"\ndescription = \"Repeat\"\ntriggers = [\"/echo\"]\n",
        )
        .await
        .unwrap();
        tokio::fs::write(
            tmp.path().join("weather.toml"),
            "name = \"weather\"\ndescription = \"Weather\"\ntriggers = [\"forecast\"]\n",
        )
        .await
        .unwrap();
        tokio::fs::write(
            tmp.path().join("orphan.toml"),
            "name = \"orphan\"\ndescription = \"No handler\"\ntriggers = [\"/orphan\"]\n",
        )
        .await
        .unwrap();
        tmp
    }

    #[tokio::test]
    async fn test_registers_configs_with_handlers() {
        let tmp = write_skill_dir().await;
        let config = SkillsConfig {
            disabled: Vec::new(),
            builtin_dir: Some(tmp.path().to_path_buf()),
        };
        let mut registry = BuiltinSkillRegistry::new();

        let ids = register_builtin_skills(&mut registry, &config, &handlers())
            .await
            .unwrap();

        assert_eq!(ids.len(), 2);
        assert_eq!(registry.len(), 2);
        assert!(registry.find_by_name("orphan").is_none());

        let response = registry.dispatch(message("any forecast today?")).await.unwrap();
        assert_eq!(response.content, "sunny");
        assert_eq!(response.skill_id.as_ref(), registry.find_by_name("weather").map(|d| &d.id));
    }

    #[tokio::test]
    async fn test_disabled_builtin_is_registered_inactive() {
        let tmp = write_skill_dir().await;
        let config = SkillsConfig {
            disabled: vec!["echo".to_string()],
            builtin_dir: Some(tmp.path().to_path_buf()),
        };
        let mut registry = BuiltinSkillRegistry::new();

        register_builtin_skills(&mut registry, &config, &handlers())
            .await
            .unwrap();

        let echo = registry.find_by_name("echo").unwrap();
        assert!(!echo.is_active);
        assert!(registry.find_by_name("weather").unwrap().is_active);

        let err = registry.dispatch(message("/echo hi")).await.unwrap_err();
        assert!(matches!(err, SkillError::NoMatchingSkill));
    }

    #[tokio::test]
    async fn test_without_builtin_dir_only_applies_disabled() {
        let mut registry = BuiltinSkillRegistry::new();
        registry
            .register(
                BuiltinSkillConfig::new("echo", "Repeat").with_trigger("/echo"),
                reply_with("echo"),
            )
            .unwrap();
        let config = SkillsConfig {
            disabled: vec!["echo".to_string()],
            builtin_dir: None,
        };

        let ids = register_builtin_skills(&mut registry, &config, &handlers())
            .await
            .unwrap();

        assert!(ids.is_empty());
        assert!(!registry.find_by_name("echo").unwrap().is_active);
    }

    #[tokio::test]
    async fn test_name_clash_with_existing_skill_errors() {
        let tmp = write_skill_dir().await;
        let config = SkillsConfig {
            disabled: Vec::new(),
            builtin_dir: Some(tmp.path().to_path_buf()),
        };
        let mut registry = BuiltinSkillRegistry::new();
        registry
            .register(
                BuiltinSkillConfig::new("echo", "Already here").with_trigger("/echo"),
                reply_with("first"),
            )
            .unwrap();

        let err = register_builtin_skills(&mut registry, &config, &handlers())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("echo"));
    }

    #[tokio::test]
    async fn test_missing_builtin_dir_errors() {
        let tmp = TempDir::new().unwrap();
        let config = SkillsConfig {
            disabled: Vec::new(),
            builtin_dir: Some(tmp.path().join("absent")),
        };
        let mut registry = BuiltinSkillRegistry::new();

        assert!(
            register_builtin_skills(&mut registry, &config, &handlers())
                .await
                .is_err()
        );
    }
}
