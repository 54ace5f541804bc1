//! Shared domain types for skillbot.
//!
//! Nominal identifiers, skill definitions and their author-supplied built-in
//! config, messages and processed responses, global configuration, and the
//! error enums used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod id;
pub mod message;
pub mod skill;
