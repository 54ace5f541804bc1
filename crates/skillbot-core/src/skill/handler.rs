//! Skill handler callback type.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use skillbot_types::error::SkillError;
use skillbot_types::message::{IncomingMessage, ProcessedResponse};

/// Callback that turns an incoming message into a processed response.
///
/// Shared (`Arc`) so the registry can hand out clones and await them without
/// holding a borrow of itself.
pub type SkillHandler = Arc<
    dyn Fn(IncomingMessage) -> BoxFuture<'static, Result<ProcessedResponse, SkillError>>
        + Send
        + Sync,
>;

/// Wrap an async closure as a [`SkillHandler`].
pub fn handler_fn<F, Fut>(f: F) -> SkillHandler
where
    F: Fn(IncomingMessage) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ProcessedResponse, SkillError>> + Send + 'static,
{
    Arc::new(
        move |message: IncomingMessage| -> BoxFuture<'static, Result<ProcessedResponse, SkillError>> {
            Box::pin(f(message))
        },
    )
}
