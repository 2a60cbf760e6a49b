//! Chat request and response types.
//!
//! These are the inbound/outbound shapes of a single conversation turn,
//! shared by the HTTP API and the CLI.

use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::turn::TurnRecord;

/// A user message addressed to the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

impl ChatRequest {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
        }
    }

    /// Check the request shape before any collaborator is invoked.
    ///
    /// `user_id` must contain something other than whitespace. The message
    /// may be empty; it is forwarded as-is.
    pub fn validate(&self) -> Result<(), ChatError> {
        if self.user_id.trim().is_empty() {
            return Err(ChatError::Validation("user_id must not be empty".to_string()));
        }
        Ok(())
    }
}

/// The bot's reply plus the user's full history after the turn was stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub bot_response: String,
    pub chat_history: Vec<TurnRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::Turn;

    #[test]
    fn test_validate_accepts_plain_request() {
        assert!(ChatRequest::new("alice", "hi").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_user_id() {
        for user_id in ["", "   "] {
            let err = ChatRequest::new(user_id, "hi").validate().unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)));
        }
    }

    #[test]
    fn test_request_requires_both_fields() {
        let result: Result<ChatRequest, _> = serde_json::from_str(r#"{"user_id": "alice"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_response_serialize() {
        let response = ChatResponse {
            bot_response: "hello".to_string(),
            chat_history: vec![
                TurnRecord::new("alice", Turn::user("hi")),
                TurnRecord::new("alice", Turn::bot("hello")),
            ],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["bot_response"], "hello");
        assert_eq!(json["chat_history"][0]["user_message"], "hi");
        assert_eq!(json["chat_history"][1]["bot_message"], "hello");
    }
}
