use std::fmt;

use thiserror::Error;

/// Errors from repository operations (used by trait definitions in fingertips-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// The step of a conversation turn at which an upstream collaborator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStage {
    /// Reading prior turns before the completion call.
    LoadHistory,
    /// The completion provider call itself.
    Completion,
    /// Inserting the user turn. Nothing has been written yet.
    PersistUser,
    /// Inserting the bot turn. The user turn is already stored without a reply.
    PersistBot,
    /// Reading the history back after both inserts.
    ReloadHistory,
}

impl UpstreamStage {
    /// Whether a failure at this stage leaves a user turn without its bot turn.
    pub fn leaves_orphan_turn(self) -> bool {
        matches!(self, UpstreamStage::PersistBot)
    }
}

impl fmt::Display for UpstreamStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamStage::LoadHistory => write!(f, "load_history"),
            UpstreamStage::Completion => write!(f, "completion"),
            UpstreamStage::PersistUser => write!(f, "persist_user"),
            UpstreamStage::PersistBot => write!(f, "persist_bot"),
            UpstreamStage::ReloadHistory => write!(f, "reload_history"),
        }
    }
}

/// Errors raised while handling a chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A required setting (the provider credential) is missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A collaborator (store or provider) failed.
    #[error("upstream error during {stage}: {message}")]
    Upstream {
        stage: UpstreamStage,
        message: String,
    },

    /// The inbound request is malformed.
    #[error("invalid request: {0}")]
    Validation(String),
}

impl ChatError {
    pub fn upstream(stage: UpstreamStage, cause: impl fmt::Display) -> Self {
        ChatError::Upstream {
            stage,
            message: cause.to_string(),
        }
    }
}
