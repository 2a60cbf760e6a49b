//! HistoryRepository trait definition.

use fingertips_types::error::RepositoryError;
use fingertips_types::turn::{Turn, TurnRecord};

/// Repository trait for per-user conversation history.
///
/// Ordering contract: every appended turn receives a sequence number that is
/// strictly greater than every earlier sequence number for the same user, and
/// `list_turns` returns turns sorted by that number. Implementations must not
/// rely on incidental read order.
///
/// Implementations live in fingertips-infra (e.g., `SqliteHistoryRepository`)
/// and in [`super::memory`]. Uses native async fn in traits (RPITIT, Rust 2024
/// edition).
pub trait HistoryRepository: Send + Sync {
    /// Append one turn to a user's history and return its sequence number.
    ///
    /// Each call is an independent write; two calls are never atomic together.
    fn append_turn(
        &self,
        user_id: &str,
        turn: &Turn,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Get all turns for a user, ordered by sequence number ascending.
    fn list_turns(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<TurnRecord>, RepositoryError>> + Send;
}
