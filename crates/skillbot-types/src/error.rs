use std::path::PathBuf;

use thiserror::Error;

use crate::id::SkillId;

/// Errors from skill registration and dispatch.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("skill not found: {0}")]
    NotFound(SkillId),

    #[error("skill name '{0}' already registered")]
    DuplicateName(String),

    #[error("invalid skill config: {0}")]
    InvalidConfig(String),

    #[error("skill '{0}' is not active")]
    Inactive(SkillId),

    #[error("no active skill matches the message")]
    NoMatchingSkill,

    #[error("skill '{skill}' failed: {reason}")]
    HandlerFailed { skill: String, reason: String },
}

/// Errors from reading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
