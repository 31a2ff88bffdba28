//! Participant directory

use tracing::instrument;

use super::Database;
use crate::models::{Message, Participant};

impl Database {
    /// Look up a participant by name
    pub async fn get_participant(&self, name: &str) -> Result<Option<Participant>, sqlx::Error> {
        sqlx::query_as("SELECT name, last_heartbeat FROM participants WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
    }

    /// All participants, in registration order
    pub async fn list_participants(&self) -> Result<Vec<Participant>, sqlx::Error> {
        sqlx::query_as("SELECT name, last_heartbeat FROM participants ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
    }

    /// Register a participant and announce the arrival in the same transaction.
    ///
    /// Returns `false` without writing anything if the name is already taken.
    #[instrument(skip(self, time))]
    pub async fn register_participant(
        &self,
        name: &str,
        now_ms: i64,
        time: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // The insert must be the first statement: a deferred transaction that
        // reads first cannot wait for the write lock and fails with BUSY.
        let inserted = sqlx::query("INSERT INTO participants (name, last_heartbeat) VALUES (?, ?)")
            .bind(name)
            .bind(now_ms)
            .execute(&mut *tx)
            .await;
        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => return Ok(false),
            Err(e) => return Err(e),
        }

        Self::insert_message(&mut *tx, &Message::join_notice(name, time)).await?;
        tx.commit().await?;

        Ok(true)
    }

    /// Record a heartbeat. Returns `false` if the participant does not exist.
    pub async fn touch_participant(&self, name: &str, now_ms: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE participants SET last_heartbeat = ? WHERE name = ?")
            .bind(now_ms)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every participant whose last heartbeat is at or before `cutoff_ms`
    /// and append one departure notice per removed participant.
    ///
    /// The delete reports exactly the rows it removed, so notices never
    /// disagree with the directory.
    #[instrument(skip(self, time))]
    pub async fn evict_inactive(
        &self,
        cutoff_ms: i64,
        time: &str,
    ) -> Result<Vec<Participant>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let evicted: Vec<Participant> = sqlx::query_as(
            "DELETE FROM participants WHERE last_heartbeat <= ? RETURNING name, last_heartbeat",
        )
        .bind(cutoff_ms)
        .fetch_all(&mut *tx)
        .await?;

        if evicted.is_empty() {
            return Ok(evicted);
        }

        let notices: Vec<Message> = evicted
            .iter()
            .map(|p| Message::leave_notice(p.name.as_str(), time))
            .collect();
        Self::insert_messages(&mut *tx, &notices).await?;
        tx.commit().await?;

        Ok(evicted)
    }
}
