//! Business logic for skillbot.
//!
//! Holds the built-in skill registry and dispatcher, the skill handler
//! callback type, and loaders for `config.toml` and built-in skill files.
//! Depends only on `skillbot-types` for its domain model.

pub mod config;
pub mod skill;
