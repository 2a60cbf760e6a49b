//! Entry point shared by every surface that runs a chat turn.

use fingertips_core::chat::handler::ConversationTurnHandler;
use fingertips_core::history::repository::HistoryRepository;
use fingertips_types::chat::{ChatRequest, ChatResponse};
use fingertips_types::error::ChatError;

/// User id of the demonstration flow.
pub const DEMO_USER: &str = "example_user";

/// Message sent by the demonstration flow.
pub const DEMO_MESSAGE: &str = "Hello, how are you?";

/// Validate `request`, then run it through the handler.
///
/// The HTTP route, `fingertips chat` and `fingertips flow` all call this, so a
/// malformed request never reaches the store or the provider.
pub async fn run_turn<H: HistoryRepository>(
    handler: &ConversationTurnHandler<H>,
    request: &ChatRequest,
) -> Result<ChatResponse, ChatError> {
    request.validate()?;
    handler.handle(request).await
}

/// The canned request used by `fingertips flow`.
pub fn demo_request() -> ChatRequest {
    ChatRequest::new(DEMO_USER, DEMO_MESSAGE)
}
