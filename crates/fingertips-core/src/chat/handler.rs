//! Conversation turn handler.
//!
//! `ConversationTurnHandler` runs one chat turn end to end: load the user's
//! history, build the prompt, call the provider, store the new user/bot pair,
//! and return the reloaded history. Every collaborator is injected at
//! construction, so tests swap in the in-memory store and a scripted provider.

use std::time::Instant;

use tracing::{Instrument, Span, error, field, info, info_span, warn};

use fingertips_types::chat::{ChatRequest, ChatResponse};
use fingertips_types::config::CompletionSettings;
use fingertips_types::error::{ChatError, UpstreamStage};
use fingertips_types::llm::CompletionRequest;
use fingertips_types::turn::{Turn, TurnRecord};

use crate::history::repository::HistoryRepository;
use crate::llm::box_provider::BoxLlmProvider;

use super::prompt::build_prompt;

pub const MISSING_CREDENTIAL: &str = "completion provider API key is missing";

/// Runs chat turns against a history store and a completion provider.
///
/// `provider` is `None` when no credential was configured at startup. The
/// process still serves requests, but every turn fails with
/// [`ChatError::Configuration`] before touching the store.
///
/// Concurrent turns for the same user are not serialized: each one reads the
/// history, calls the provider, and appends independently.
pub struct ConversationTurnHandler<H: HistoryRepository> {
    history: H,
    provider: Option<BoxLlmProvider>,
    settings: CompletionSettings,
}

impl<H: HistoryRepository> ConversationTurnHandler<H> {
    pub fn new(history: H, provider: Option<BoxLlmProvider>, settings: CompletionSettings) -> Self {
        Self {
            history,
            provider,
            settings,
        }
    }

    /// Access the history store.
    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    /// Whether a provider credential was configured.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Handle one turn.
    ///
    /// The request shape is assumed valid (see [`ChatRequest::validate`]).
    /// Writes happen only after the provider has answered; the user and bot
    /// turns are two independent appends.
    pub async fn handle(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let Some(provider) = self.provider.as_ref() else {
            warn!(user_id = %request.user_id, "Rejecting turn: no provider credential configured");
            return Err(ChatError::Configuration(MISSING_CREDENTIAL.to_string()));
        };

        let span = info_span!(
            "chat",
            gen_ai.operation.name = "chat",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %self.settings.model,
            gen_ai.usage.input_tokens = field::Empty,
            gen_ai.usage.output_tokens = field::Empty,
            user_id = %request.user_id,
            history_len = field::Empty,
        );

        self.run_turn(provider, request).instrument(span).await
    }

    async fn run_turn(
        &self,
        provider: &BoxLlmProvider,
        request: &ChatRequest,
    ) -> Result<ChatResponse, ChatError> {
        let started = Instant::now();
        let user_id = request.user_id.as_str();

        let history = self
            .history
            .list_turns(user_id)
            .await
            .map_err(|e| ChatError::upstream(UpstreamStage::LoadHistory, e))?;
        Span::current().record("history_len", history.len());

        let completion = CompletionRequest {
            model: self.settings.model.clone(),
            messages: build_prompt(&history, &request.message),
            system: None,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = provider.complete(&completion).await.map_err(|e| {
            warn!(error = %e, "Completion failed");
            ChatError::upstream(UpstreamStage::Completion, e)
        })?;

        let span = Span::current();
        span.record("gen_ai.usage.input_tokens", response.usage.input_tokens);
        span.record("gen_ai.usage.output_tokens", response.usage.output_tokens);

        let bot_response = response.content;

        self.append(user_id, Turn::user(request.message.clone()), UpstreamStage::PersistUser)
            .await?;
        self.append(user_id, Turn::bot(bot_response.clone()), UpstreamStage::PersistBot)
            .await?;

        let chat_history = self
            .history
            .list_turns(user_id)
            .await
            .map_err(|e| ChatError::upstream(UpstreamStage::ReloadHistory, e))?;

        info!(
            history_len = chat_history.len(),
            stop_reason = %response.stop_reason,
            latency_ms = started.elapsed().as_millis() as u64,
            "Turn completed"
        );

        Ok(ChatResponse {
            bot_response,
            chat_history,
        })
    }

    async fn append(&self, user_id: &str, turn: Turn, stage: UpstreamStage) -> Result<(), ChatError> {
        match self.history.append_turn(user_id, &turn).await {
            Ok(seq) => {
                tracing::debug!(seq, role = %turn.role(), "Turn stored");
                Ok(())
            }
            Err(e) => {
                if stage.leaves_orphan_turn() {
                    error!(error = %e, "Bot turn not stored; user turn is left without a reply");
                } else {
                    warn!(error = %e, %stage, "Failed to store turn");
                }
                Err(ChatError::upstream(stage, e))
            }
        }
    }

    /// Read a user's stored history without running a turn.
    pub async fn load_history(&self, user_id: &str) -> Result<Vec<TurnRecord>, ChatError> {
        self.history
            .list_turns(user_id)
            .await
            .map_err(|e| ChatError::upstream(UpstreamStage::LoadHistory, e))
    }
}
