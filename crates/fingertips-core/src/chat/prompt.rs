//! Prompt assembly from stored history.

use fingertips_types::llm::Message;
use fingertips_types::turn::{Turn, TurnRecord};

/// Build the ordered message sequence sent to the provider.
///
/// Stored turns map one-to-one onto messages in history order (user turns
/// become user messages, bot turns become assistant messages), followed by the
/// new user message. With no history the result is just the new message.
pub fn build_prompt(history: &[TurnRecord], message: &str) -> Vec<Message> {
    let mut messages: Vec<Message> = history
        .iter()
        .map(|record| match &record.turn {
            Turn::User { text } => Message::user(text.clone()),
            Turn::Bot { text } => Message::assistant(text.clone()),
        })
        .collect();

    messages.push(Message::user(message));
    messages
}
