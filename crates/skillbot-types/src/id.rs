//! Nominal identifier types.
//!
//! Every identifier in skillbot is plain text on the wire, but each kind gets
//! its own newtype so that a `UserId` can never be handed to something that
//! expects a `SkillId`. Construction never validates: any string, including
//! the empty string, is accepted byte-for-byte.
//!
//! Passing one kind where another is expected is a type error:
//!
//! ```compile_fail
//! use skillbot_types::id::{SkillId, UserId};
//!
//! fn load_skill(_id: &SkillId) {}
//!
//! let user = UserId::new("u-42");
//! load_skill(&user);
//! ```
//!
//! There is no implicit conversion either:
//!
//! ```compile_fail
//! use skillbot_types::id::{BotId, UserId};
//!
//! let bot: BotId = UserId::new("x");
//! ```
//!
//! Changing the kind requires an explicit re-tag:
//!
//! ```
//! use skillbot_types::id::{BotId, StringId, UserId};
//!
//! let user = UserId::new("x");
//! let bot: BotId = user.retag();
//! assert_eq!(bot.as_str(), "x");
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

mod sealed {
    pub trait Sealed {}
}

/// Shared behaviour of every identifier kind.
///
/// Sealed: only the kinds defined in this module implement it.
pub trait StringId: sealed::Sealed + Sized {
    /// Tag a raw string as this identifier kind.
    fn from_string(value: String) -> Self;

    /// Borrow the underlying text.
    fn as_str(&self) -> &str;

    /// Unwrap the underlying text.
    fn into_inner(self) -> String;

    /// Explicitly re-tag this identifier as another kind, keeping its text.
    fn retag<T: StringId>(self) -> T {
        T::from_string(self.into_inner())
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $ctor:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap `value` without inspecting or altering it.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Create a fresh identifier from a UUID v7 (time-sortable).
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        #[doc = concat!("Construct a [`", stringify!($name), "`] from raw text. Never fails.")]
        pub fn $ctor(value: impl Into<String>) -> $name {
            $name::new(value)
        }

        impl sealed::Sealed for $name {}

        impl StringId for $name {
            fn from_string(value: String) -> Self {
                Self(value)
            }

            fn as_str(&self) -> &str {
                &self.0
            }

            fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_owned()))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifies a user.
    UserId,
    user_id
);

string_id!(
    /// Identifies a bot.
    BotId,
    bot_id
);

string_id!(
    /// Identifies a skill.
    SkillId,
    skill_id
);

string_id!(
    /// Identifies a chat session.
    SessionId,
    session_id
);

string_id!(
    /// Identifies a single message within a session.
    MessageId,
    message_id
);

string_id!(
    /// Identifies a token usage record.
    UsageId,
    usage_id
);

string_id!(
    /// Identifies an entry in the tool registry.
    ToolRegistryId,
    tool_registry_id
);
