//! In-process history store.
//!
//! Keeps every user's turns in a `Mutex<HashMap>`. Used wherever a store is
//! needed without a database, chiefly the handler and router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use fingertips_types::error::RepositoryError;
use fingertips_types::turn::{Turn, TurnRecord};

use super::repository::HistoryRepository;

#[derive(Debug, Default)]
pub struct InMemoryHistoryRepository {
    users: Mutex<HashMap<String, Vec<(u64, Turn)>>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with one user's history, in order.
    pub fn with_history(user_id: &str, turns: impl IntoIterator<Item = Turn>) -> Self {
        let turns = turns
            .into_iter()
            .enumerate()
            .map(|(i, turn)| (i as u64 + 1, turn))
            .collect();
        let mut users = HashMap::new();
        users.insert(user_id.to_string(), turns);
        Self {
            users: Mutex::new(users),
        }
    }

    /// Number of turns stored for a user.
    pub fn turn_count(&self, user_id: &str) -> usize {
        self.users
            .lock()
            .map(|users| users.get(user_id).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl HistoryRepository for InMemoryHistoryRepository {
    async fn append_turn(&self, user_id: &str, turn: &Turn) -> Result<u64, RepositoryError> {
        let mut users = self.users.lock().map_err(|_| RepositoryError::Connection)?;
        let turns = users.entry(user_id.to_string()).or_default();
        let seq = turns.last().map_or(1, |(last, _)| last + 1);
        turns.push((seq, turn.clone()));
        Ok(seq)
    }

    async fn list_turns(&self, user_id: &str) -> Result<Vec<TurnRecord>, RepositoryError> {
        let users = self.users.lock().map_err(|_| RepositoryError::Connection)?;
        let mut turns = users.get(user_id).cloned().unwrap_or_default();
        turns.sort_by_key(|(seq, _)| *seq);
        Ok(turns
            .into_iter()
            .map(|(_, turn)| TurnRecord::new(user_id, turn))
            .collect())
    }
}
