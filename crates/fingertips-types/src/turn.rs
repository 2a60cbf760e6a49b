//! Conversation turn types.
//!
//! A turn is one message from either the user or the bot. Stored records keep
//! the legacy document shape on the wire (`user_message` for user turns,
//! `bot_message` for bot turns, discriminated by `role`), but in Rust a turn is
//! a tagged variant with a single [`Turn::text`] accessor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who authored a turn.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'bot'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Bot,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "bot" => Ok(TurnRole::Bot),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// A single turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum Turn {
    #[serde(rename = "user")]
    User {
        #[serde(rename = "user_message")]
        text: String,
    },
    #[serde(rename = "bot")]
    Bot {
        #[serde(rename = "bot_message")]
        text: String,
    },
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Turn::User { text: text.into() }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Turn::Bot { text: text.into() }
    }

    /// Rebuild a turn from its storage columns.
    pub fn from_parts(role: TurnRole, text: String) -> Self {
        match role {
            TurnRole::User => Turn::User { text },
            TurnRole::Bot => Turn::Bot { text },
        }
    }

    pub fn role(&self) -> TurnRole {
        match self {
            Turn::User { .. } => TurnRole::User,
            Turn::Bot { .. } => TurnRole::Bot,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Turn::User { text } | Turn::Bot { text } => text,
        }
    }
}

/// A persisted turn belonging to one user's history.
///
/// Records carry no identifier of their own. Their position in a history is
/// the per-user sequence number the store assigns at insert time, which never
/// leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub user_id: String,
    #[serde(flatten)]
    pub turn: Turn,
}

impl TurnRecord {
    pub fn new(user_id: impl Into<String>, turn: Turn) -> Self {
        Self {
            user_id: user_id.into(),
            turn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_roundtrip() {
        for role in [TurnRole::User, TurnRole::Bot] {
            let parsed: TurnRole = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
        assert!("assistant".parse::<TurnRole>().is_err());
    }

    #[test]
    fn test_user_record_uses_user_message_field() {
        let record = TurnRecord::new("alice", Turn::user("hi"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"user_id": "alice", "role": "user", "user_message": "hi"})
        );
    }

    #[test]
    fn test_bot_record_uses_bot_message_field() {
        let record = TurnRecord::new("alice", Turn::bot("hello"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"user_id": "alice", "role": "bot", "bot_message": "hello"})
        );
    }

    #[test]
    fn test_record_deserializes_legacy_document() {
        let record: TurnRecord = serde_json::from_str(
            r#"{"user_id": "bob", "role": "bot", "bot_message": "hey there"}"#,
        )
        .unwrap();
        assert_eq!(record.user_id, "bob");
        assert_eq!(record.turn.role(), TurnRole::Bot);
        assert_eq!(record.turn.text(), "hey there");
    }

    #[test]
    fn test_mismatched_field_is_rejected() {
        // A user turn must carry `user_message`, not `bot_message`.
        let result: Result<TurnRecord, _> =
            serde_json::from_str(r#"{"user_id": "bob", "role": "user", "bot_message": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_parts() {
        let turn = Turn::from_parts(TurnRole::User, "hi".to_string());
        assert_eq!(turn, Turn::user("hi"));
        assert_eq!(turn.text(), "hi");
    }
}
