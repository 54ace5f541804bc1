//! Built-in skill registry.
//!
//! Skill authors hand over a [`BuiltinSkillConfig`] and a handler; the
//! registry assigns the managed fields (id, owner, version, activation flag,
//! score, timestamps) and routes incoming messages to the best matching
//! active skill.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument;

use skillbot_types::config::SkillsConfig;
use skillbot_types::error::SkillError;
use skillbot_types::id::SkillId;
use skillbot_types::message::{IncomingMessage, ProcessedResponse};
use skillbot_types::skill::{BuiltinSkillConfig, SkillDefinition};

use super::handler::SkillHandler;

/// A registered skill: its definition plus the callback that runs it.
pub struct RegisteredSkill {
    definition: SkillDefinition,
    handler: SkillHandler,
}

impl RegisteredSkill {
    pub fn definition(&self) -> &SkillDefinition {
        &self.definition
    }

    pub fn handler(&self) -> SkillHandler {
        Arc::clone(&self.handler)
    }
}

impl std::fmt::Debug for RegisteredSkill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredSkill")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Registry of built-in skills, indexed by id and by name.
///
/// Mutation takes `&mut self`; dispatch only needs `&self`, so a populated
/// registry can be shared behind an `Arc` and serve concurrent messages.
#[derive(Debug, Default)]
pub struct BuiltinSkillRegistry {
    skills: HashMap<SkillId, RegisteredSkill>,
    by_name: HashMap<String, SkillId>,
}

impl BuiltinSkillRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built-in skill and return its assigned id.
    ///
    /// The new definition is system-owned (`user_id = None`), active, at
    /// version 1 with a score of 0. Names must be unique.
    pub fn register(
        &mut self,
        config: BuiltinSkillConfig,
        handler: SkillHandler,
    ) -> Result<SkillId, SkillError> {
        validate_config(&config)?;

        if self.by_name.contains_key(&config.name) {
            return Err(SkillError::DuplicateName(config.name));
        }

        let id = SkillId::generate();
        let definition = SkillDefinition::builtin(id.clone(), config, Utc::now());

        tracing::info!(skill = %definition.name(), skill_id = %id, "registered built-in skill");

        self.by_name.insert(definition.name().to_owned(), id.clone());
        self.skills
            .insert(id.clone(), RegisteredSkill { definition, handler });

        Ok(id)
    }

    /// Remove a skill, returning its definition.
    pub fn unregister(&mut self, id: &SkillId) -> Result<SkillDefinition, SkillError> {
        let skill = self
            .skills
            .remove(id)
            .ok_or_else(|| SkillError::NotFound(id.clone()))?;
        self.by_name.remove(skill.definition.name());
        tracing::info!(skill = %skill.definition.name(), skill_id = %id, "unregistered skill");
        Ok(skill.definition)
    }

    pub fn get(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.skills.get(id).map(|s| &s.definition)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SkillDefinition> {
        self.by_name.get(name).and_then(|id| self.get(id))
    }

    /// All definitions, sorted by name.
    pub fn list(&self) -> Vec<&SkillDefinition> {
        let mut defs: Vec<&SkillDefinition> = self.skills.values().map(|s| &s.definition).collect();
        defs.sort_by(|a, b| a.name().cmp(b.name()));
        defs
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Activate or deactivate a skill. Bumps the version even if unchanged.
    pub fn set_active(&mut self, id: &SkillId, active: bool) -> Result<(), SkillError> {
        let definition = self.definition_mut(id)?;
        definition.is_active = active;
        definition.touch(Utc::now());
        tracing::debug!(skill = %definition.name(), active, version = definition.version, "skill activation changed");
        Ok(())
    }

    /// Add `delta` to a skill's score and return the new score.
    pub fn adjust_score(&mut self, id: &SkillId, delta: f64) -> Result<f64, SkillError> {
        let definition = self.definition_mut(id)?;
        definition.score += delta;
        definition.touch(Utc::now());
        Ok(definition.score)
    }

    /// Deactivate every registered skill that `config` marks as disabled.
    ///
    /// Disabled names that are not registered are logged and skipped.
    pub fn apply_config(&mut self, config: &SkillsConfig) {
        let to_disable: Vec<SkillId> = self
            .by_name
            .iter()
            .filter(|(name, _)| config.is_disabled(name))
            .map(|(_, id)| id.clone())
            .collect();

        for id in &to_disable {
            if let Err(err) = self.set_active(id, false) {
                tracing::warn!(skill_id = %id, error = %err, "failed to disable skill");
            }
        }

        for name in config.disabled.iter().filter(|n| !self.by_name.contains_key(*n)) {
            tracing::warn!(skill = %name, "disabled skill is not registered");
        }
    }

    /// Pick the active skill that should handle `message`.
    ///
    /// Among matching skills the highest `priority` wins, then the highest
    /// `score`, then the alphabetically first name.
    pub fn resolve(&self, message: &IncomingMessage) -> Option<&RegisteredSkill> {
        self.skills
            .values()
            .filter(|s| s.definition.is_active && s.definition.config.matches(&message.content))
            .min_by(|a, b| routing_order(&a.definition, &b.definition))
    }

    /// Route `message` to the matching skill and run its handler.
    pub async fn dispatch(
        &self,
        message: IncomingMessage,
    ) -> Result<ProcessedResponse, SkillError> {
        let skill = self.resolve(&message).ok_or_else(|| {
            tracing::debug!(message_id = %message.id, "no skill matched message");
            SkillError::NoMatchingSkill
        })?;
        invoke(skill, message).await
    }

    /// Run a specific skill regardless of its triggers.
    pub async fn dispatch_to(
        &self,
        id: &SkillId,
        message: IncomingMessage,
    ) -> Result<ProcessedResponse, SkillError> {
        let skill = self
            .skills
            .get(id)
            .ok_or_else(|| SkillError::NotFound(id.clone()))?;
        if !skill.definition.is_active {
            return Err(SkillError::Inactive(id.clone()));
        }
        invoke(skill, message).await
    }

    fn definition_mut(&mut self, id: &SkillId) -> Result<&mut SkillDefinition, SkillError> {
        self.skills
            .get_mut(id)
            .map(|s| &mut s.definition)
            .ok_or_else(|| SkillError::NotFound(id.clone()))
    }
}

fn validate_config(config: &BuiltinSkillConfig) -> Result<(), SkillError> {
    if config.name.trim().is_empty() {
        return Err(SkillError::InvalidConfig(
            "skill name must not be empty".to_string(),
        ));
    }
    if config.name.trim() != config.name {
        return Err(SkillError::InvalidConfig(format!(
            "skill name '{}' must not have leading or trailing whitespace",
            config.name
        )));
    }
    if config.description.trim().is_empty() {
        return Err(SkillError::InvalidConfig(format!(
            "skill '{}' must have a description",
            config.name
        )));
    }
    if config.triggers.is_empty() {
        tracing::warn!(
            skill = %config.name,
            "skill has no triggers; it can only be reached through dispatch_to"
        );
    }
    Ok(())
}

fn routing_order(a: &SkillDefinition, b: &SkillDefinition) -> Ordering {
    b.config
        .priority
        .cmp(&a.config.priority)
        .then_with(|| b.score.total_cmp(&a.score))
        .then_with(|| a.name().cmp(b.name()))
}

async fn invoke(
    skill: &RegisteredSkill,
    message: IncomingMessage,
) -> Result<ProcessedResponse, SkillError> {
    let skill_id = skill.definition.id.clone();
    let span = tracing::info_span!(
        "skill.dispatch",
        skill = %skill.definition.name(),
        skill_id = %skill_id,
        message_id = %message.id,
        session_id = %message.session_id,
    );
    let handler = skill.handler();

    async move {
        match handler(message).await {
            Ok(mut response) => {
                response.skill_id = Some(skill_id);
                tracing::debug!(message_id = %response.message_id, "skill produced response");
                Ok(response)
            }
            Err(err) => {
                tracing::warn!(error = %err, "skill handler failed");
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}
