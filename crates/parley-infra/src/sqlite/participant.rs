//! SQLite participant repository implementation.
//!
//! Implements `ParticipantRepository` from `parley-core` using sqlx with
//! split read/write pools: raw queries, a private Row struct, reads on the
//! reader pool, writes on the writer pool.
//!
//! `last_status` is stored as epoch milliseconds so the reap's staleness
//! filter is a plain indexed integer comparison.

use chrono::{DateTime, Utc};
use sqlx::Row;

use parley_core::presence::ParticipantRepository;
use parley_types::error::RepositoryError;
use parley_types::participant::Participant;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ParticipantRepository`.
pub struct SqliteParticipantRepository {
    pool: DatabasePool,
}

impl SqliteParticipantRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Participant.
struct ParticipantRow {
    name: String,
    last_status: i64,
}

impl ParticipantRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            name: row.try_get("name")?,
            last_status: row.try_get("last_status")?,
        })
    }

    fn into_participant(self) -> Result<Participant, RepositoryError> {
        let last_status = millis_to_datetime(self.last_status)?;
        Ok(Participant {
            name: self.name,
            last_status,
        })
    }
}

fn millis_to_datetime(ms: i64) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| RepositoryError::Query(format!("invalid timestamp: {ms}")))
}

impl ParticipantRepository for SqliteParticipantRepository {
    async fn insert(&self, participant: &Participant) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO participants (name, last_status) VALUES (?, ?)")
            .bind(&participant.name)
            .bind(participant.last_status.timestamp_millis())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    RepositoryError::Conflict(participant.name.clone())
                }
                _ => RepositoryError::Query(e.to_string()),
            })?;

        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Participant>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM participants WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let participant_row = ParticipantRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(participant_row.into_participant()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Participant>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM participants ORDER BY name")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut participants = Vec::with_capacity(rows.len());
        for row in &rows {
            let participant_row = ParticipantRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            participants.push(participant_row.into_participant()?);
        }

        Ok(participants)
    }

    async fn touch(&self, name: &str, at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE participants SET last_status = ? WHERE name = ?")
            .bind(at.timestamp_millis())
            .bind(name)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_stale(&self, cutoff: DateTime<Utc>) -> Result<Vec<Participant>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM participants WHERE last_status < ?")
            .bind(cutoff.timestamp_millis())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut participants = Vec::with_capacity(rows.len());
        for row in &rows {
            let participant_row = ParticipantRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            participants.push(participant_row.into_participant()?);
        }

        Ok(participants)
    }

    async fn remove_batch(&self, names: &[String]) -> Result<u64, RepositoryError> {
        if names.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; names.len()].join(", ");
        let sql = format!("DELETE FROM participants WHERE name IN ({placeholders})");

        let mut query = sqlx::query(&sql);
        for name in names {
            query = query.bind(name);
        }

        let result = query
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
