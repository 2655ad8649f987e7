//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::rows::EventRow;
use domain::models::EventSummary;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub producer_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub cover_image_url: Option<String>,
    pub buyer_fee_percent: Decimal,
    pub producer_absorbs_percent: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for EventRow {
    fn from(entity: EventEntity) -> Self {
        Self {
            name: entity.name,
            description: entity.description,
            starts_at: entity.starts_at,
            venue: entity.venue,
            cover_image_url: entity.cover_image_url,
            buyer_fee_percent: entity.buyer_fee_percent,
            producer_absorbs_percent: entity.producer_absorbs_percent,
        }
    }
}

impl From<EventEntity> for EventSummary {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            starts_at: entity.starts_at,
            venue: entity.venue,
            cover_image_url: entity.cover_image_url,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create_test_event_entity() -> EventEntity {
        EventEntity {
            id: Uuid::new_v4(),
            producer_id: Uuid::new_v4(),
            name: "Festival da Serra".to_string(),
            description: Some("Três dias de música".to_string()),
            starts_at: None,
            venue: Some("Arena Norte".to_string()),
            cover_image_url: None,
            buyer_fee_percent: Decimal::from_str("10").unwrap(),
            producer_absorbs_percent: Decimal::ZERO,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_event_entity_to_row() {
        let entity = create_test_event_entity();
        let row: EventRow = entity.clone().into();
        assert_eq!(row.name, entity.name);
        assert_eq!(row.venue, entity.venue);
        assert_eq!(row.buyer_fee_percent, entity.buyer_fee_percent);
    }

    #[test]
    fn test_event_entity_to_summary() {
        let entity = create_test_event_entity();
        let summary: EventSummary = entity.clone().into();
        assert_eq!(summary.id, entity.id);
        assert_eq!(summary.name, entity.name);
        assert_eq!(summary.updated_at, entity.updated_at);
    }
}
