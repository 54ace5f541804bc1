//! Skill definition types.
//!
//! A [`SkillDefinition`] is what the skill registry stores: the author-supplied
//! [`BuiltinSkillConfig`] plus the fields the registry manages itself (id,
//! owner, version, activation flag, score, timestamps). Built-in skills are
//! written as a `BuiltinSkillConfig` only; the registry fills in the rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::id::{SkillId, ToolRegistryId, UserId};

// ---------------------------------------------------------------------------
// Author-supplied configuration
// ---------------------------------------------------------------------------

/// The portion of a skill definition that a skill author supplies.
///
/// Registry-managed fields are not representable here. Deserializing a config
/// document that sets any of them (e.g. `id` or `is_active`) is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuiltinSkillConfig {
    /// Unique skill name (e.g. "weather").
    pub name: String,
    /// Short human-readable summary.
    pub description: String,
    /// Keywords or `/commands` that route a message to this skill.
    #[serde(default)]
    pub triggers: Vec<String>,
    /// Prompt text injected when the skill runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Tool registry entries the skill is allowed to call.
    #[serde(default)]
    pub tools: Vec<ToolRegistryId>,
    /// Higher priority wins when several skills match the same message.
    #[serde(default)]
    pub priority: i32,
    /// Free-form author parameters passed through to the handler.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

impl BuiltinSkillConfig {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            triggers: Vec::new(),
            system_prompt: None,
            tools: Vec::new(),
            priority: 0,
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.triggers.push(trigger.into());
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_tool(mut self, tool: ToolRegistryId) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Whether `text` should be routed to this skill.
    ///
    /// Matching is case-insensitive. A trigger starting with `/` is a command
    /// and must equal the first word of the message; any other trigger matches
    /// when it appears anywhere in the message. Empty triggers never match.
    pub fn matches(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        let first_word = lowered.split_whitespace().next().unwrap_or("");

        self.triggers.iter().any(|trigger| {
            let trigger = trigger.trim().to_lowercase();
            if trigger.is_empty() {
                false
            } else if trigger.starts_with('/') {
                first_word == trigger
            } else {
                lowered.contains(&trigger)
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Full definition
// ---------------------------------------------------------------------------

/// A skill as stored by the registry.
///
/// Serialized flat: managed fields sit next to the author fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: SkillId,
    /// Owning user. `None` for system-owned built-in skills.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Starts at 1, bumped on every registry mutation.
    pub version: u32,
    pub is_active: bool,
    /// Ranking score used to break ties between equally prioritised skills.
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub config: BuiltinSkillConfig,
}

impl SkillDefinition {
    /// Build a fresh system-owned definition around an author config.
    pub fn builtin(id: SkillId, config: BuiltinSkillConfig, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: None,
            version: 1,
            is_active: true,
            score: 0.0,
            created_at: now,
            updated_at: now,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &BuiltinSkillConfig {
        &self.config
    }

    /// Drop the managed fields, keeping only what the author wrote.
    pub fn into_config(self) -> BuiltinSkillConfig {
        self.config
    }

    /// Record a mutation: bump the version and refresh `updated_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.version += 1;
        self.updated_at = now;
    }
}
