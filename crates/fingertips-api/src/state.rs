//! Application state wiring the turn handler to its collaborators.
//!
//! The handler is generic over the history store; `AppState` defaults to the
//! SQLite store used by the binary, while router tests plug in the in-memory
//! one.

use std::sync::Arc;

use anyhow::Context;

use fingertips_core::chat::handler::ConversationTurnHandler;
use fingertips_core::history::repository::HistoryRepository;
use fingertips_infra::config::Settings;
use fingertips_infra::llm::create_provider;
use fingertips_infra::sqlite::history::SqliteHistoryRepository;
use fingertips_infra::sqlite::pool::DatabasePool;

/// Shared application state, used by both CLI commands and HTTP handlers.
pub struct AppState<H: HistoryRepository = SqliteHistoryRepository> {
    pub handler: Arc<ConversationTurnHandler<H>>,
}

impl<H: HistoryRepository> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: HistoryRepository> AppState<H> {
    pub fn new(handler: ConversationTurnHandler<H>) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

impl AppState {
    /// Open the database and build the handler from resolved settings.
    ///
    /// A missing provider credential is not an error here; requests fail
    /// individually instead.
    pub async fn init(settings: &Settings) -> anyhow::Result<Self> {
        let pool = DatabasePool::new(&settings.database_url)
            .await
            .with_context(|| format!("failed to open database at {}", settings.database_url))?;

        let history = SqliteHistoryRepository::new(pool);
        let provider = create_provider(&settings.file, settings.api_key.as_ref());
        let handler =
            ConversationTurnHandler::new(history, provider, settings.file.completion.clone());

        Ok(Self::new(handler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fingertips_core::history::repository::HistoryRepository as _;
    use fingertips_types::config::FileConfig;

    #[tokio::test]
    async fn test_init_without_credential_still_opens_store() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            database_url: format!("sqlite://{}?mode=rwc", dir.path().join("app.db").display()),
            api_key: None,
            file: FileConfig::default(),
        };

        let state = AppState::init(&settings).await.unwrap();
        assert!(!state.handler.is_configured());
        assert!(state.handler.history().list_turns("alice").await.unwrap().is_empty());
    }
}
