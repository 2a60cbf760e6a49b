//! SQLite history repository implementation.
//!
//! Implements `HistoryRepository` from `fingertips-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, writes on the writer
//! pool and reads on the reader pool.

use chrono::Utc;
use sqlx::Row;

use fingertips_core::history::repository::HistoryRepository;
use fingertips_types::error::RepositoryError;
use fingertips_types::turn::{Turn, TurnRecord, TurnRole};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `HistoryRepository`.
pub struct SqliteHistoryRepository {
    pool: DatabasePool,
}

impl SqliteHistoryRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain TurnRecord.
struct TurnRow {
    user_id: String,
    role: String,
    content: String,
}

impl TurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            user_id: row.try_get("user_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
        })
    }

    fn into_record(self) -> Result<TurnRecord, RepositoryError> {
        let role: TurnRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(TurnRecord::new(self.user_id, Turn::from_parts(role, self.content)))
    }
}

impl HistoryRepository for SqliteHistoryRepository {
    async fn append_turn(&self, user_id: &str, turn: &Turn) -> Result<u64, RepositoryError> {
        // The sequence number is computed inside the INSERT so the read of
        // MAX(seq) and the write happen in one statement on the single writer.
        let seq: i64 = sqlx::query_scalar(
            r#"INSERT INTO turns (user_id, seq, role, content, created_at)
               VALUES (?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM turns WHERE user_id = ?), ?, ?, ?)
               RETURNING seq"#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(turn.role().to_string())
        .bind(turn.text())
        .bind(Utc::now().to_rfc3339())
        .fetch_one(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(seq as u64)
    }

    async fn list_turns(&self, user_id: &str) -> Result<Vec<TurnRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT user_id, role, content FROM turns WHERE user_id = ? ORDER BY seq ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let turn_row =
                TurnRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            records.push(turn_row.into_record()?);
        }

        Ok(records)
    }
}
