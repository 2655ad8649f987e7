//! Event repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventEntity;
use crate::metrics::QueryTimer;

/// Repository for event-level database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All events owned by a producer, most recently updated first.
    pub async fn list_by_producer(
        &self,
        producer_id: Uuid,
    ) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events_by_producer");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT * FROM events
            WHERE producer_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(producer_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an event owned by the producer. Child rows cascade.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, event_id: Uuid, producer_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query(
            r#"
            DELETE FROM events WHERE id = $1 AND producer_id = $2
            "#,
        )
        .bind(event_id)
        .bind(producer_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
