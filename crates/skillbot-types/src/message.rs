//! Message, usage and processed-response types.
//!
//! An [`IncomingMessage`] is what a skill handler receives; a
//! [`ProcessedResponse`] is what it hands back to the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::id::{BotId, MessageId, SessionId, SkillId, UsageId, UserId};

/// A user message addressed to a bot within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: MessageId,
    pub session_id: SessionId,
    pub bot_id: BotId,
    pub user_id: UserId,
    pub content: String,
    pub received_at: DateTime<Utc>,
}

impl IncomingMessage {
    /// Create a message with a freshly generated id, received now.
    pub fn new(
        session_id: SessionId,
        bot_id: BotId,
        user_id: UserId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            session_id,
            bot_id,
            user_id,
            content: content.into(),
            received_at: Utc::now(),
        }
    }
}

/// Token usage attributed to producing a single response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub id: UsageId,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl UsageRecord {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            id: UsageId::generate(),
            input_tokens,
            output_tokens,
        }
    }

    pub fn total_tokens(&self) -> u64 {
        u64::from(self.input_tokens) + u64::from(self.output_tokens)
    }
}

/// The reply produced for an [`IncomingMessage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedResponse {
    /// Id of the reply message itself (not the message being answered).
    pub message_id: MessageId,
    pub session_id: SessionId,
    pub bot_id: BotId,
    /// Skill that produced the reply, stamped by the dispatcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<SkillId>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageRecord>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ProcessedResponse {
    /// Start a reply to `message` in the same session and bot.
    pub fn reply_to(message: &IncomingMessage, content: impl Into<String>) -> Self {
        Self {
            message_id: MessageId::generate(),
            session_id: message.session_id.clone(),
            bot_id: message.bot_id.clone(),
            skill_id: None,
            content: content.into(),
            usage: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_usage(mut self, usage: UsageRecord) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{bot_id, session_id, user_id};
    use serde_json::json;

    fn message() -> IncomingMessage {
        IncomingMessage::new(session_id("s-1"), bot_id("b-1"), user_id("u-1"), "hi")
    }

    #[test]
    fn test_reply_copies_session_and_bot() {
        let msg = message();
        let reply = ProcessedResponse::reply_to(&msg, "hello");
        assert_eq!(reply.session_id, msg.session_id);
        assert_eq!(reply.bot_id, msg.bot_id);
        assert_ne!(reply.message_id, msg.id);
        assert!(reply.skill_id.is_none());
        assert_eq!(reply.content, "hello");
    }

    #[test]
    fn test_usage_total_does_not_overflow() {
        let usage = UsageRecord::new(u32::MAX, u32::MAX);
        assert_eq!(usage.total_tokens(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_response_json_omits_empty_fields() {
        let reply = ProcessedResponse::reply_to(&message(), "ok");
        let json_str = serde_json::to_string(&reply).unwrap();
        assert!(!json_str.contains("skill_id"));
        assert!(!json_str.contains("usage"));
        assert!(!json_str.contains("metadata"));
        assert!(json_str.contains("\"session_id\":\"s-1\""));
    }

    #[test]
    fn test_response_json_roundtrip_with_usage() {
        let reply = ProcessedResponse::reply_to(&message(), "ok")
            .with_usage(UsageRecord::new(12, 30))
            .with_metadata("model", json!("claude-sonnet"));
        let json_str = serde_json::to_string(&reply).unwrap();
        let parsed: ProcessedResponse = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed, reply);
        assert_eq!(parsed.usage.unwrap().total_tokens(), 42);
    }
}
