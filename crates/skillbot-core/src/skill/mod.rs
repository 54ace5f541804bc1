//! Built-in skill system.
//!
//! - `bootstrap` -- `register_builtin_skills`: loads `builtin_dir`, pairs configs with handlers, applies `disabled`
//! - `handler` -- `SkillHandler` callback type and the `handler_fn` adapter
//! - `registry` -- `BuiltinSkillRegistry`: registration, activation, routing and dispatch
//! - `loader` -- reads built-in skill configs from a directory of TOML files

pub mod bootstrap;
pub mod handler;
pub mod loader;
pub mod registry;

pub use bootstrap::register_builtin_skills;
pub use handler::{SkillHandler, handler_fn};
pub use registry::BuiltinSkillRegistry;
