//! Batch entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::rows::BatchRow;

/// Database row mapping for the batches table.
#[derive(Debug, Clone, FromRow)]
pub struct BatchEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub position: i32,
}

impl From<BatchEntity> for BatchRow {
    fn from(entity: BatchEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            position: entity.position,
        }
    }
}
