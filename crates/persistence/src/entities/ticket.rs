//! Ticket entity (database row mapping).

use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::rows::TicketRow;

/// Database row mapping for the tickets table. The owning sector is
/// denormalized onto each row (name and capacity).
#[derive(Debug, Clone, FromRow)]
pub struct TicketEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub sector_name: String,
    pub sector_capacity: Option<i32>,
    pub batch_id: Option<Uuid>,
    pub name: String,
    pub price: Decimal,
    pub quantity: Option<i32>,
    pub position: i32,
}

impl From<TicketEntity> for TicketRow {
    fn from(entity: TicketEntity) -> Self {
        Self {
            id: entity.id,
            sector_name: entity.sector_name,
            sector_capacity: entity.sector_capacity,
            batch_id: entity.batch_id,
            name: entity.name,
            price: entity.price,
            quantity: entity.quantity,
            position: entity.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ticket_entity_to_row() {
        let entity = TicketEntity {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            sector_name: "Pista".to_string(),
            sector_capacity: Some(1000),
            batch_id: None,
            name: "Inteira".to_string(),
            price: Decimal::from_str("100.00").unwrap(),
            quantity: Some(50),
            position: 0,
        };
        let row: TicketRow = entity.clone().into();
        assert_eq!(row.id, entity.id);
        assert_eq!(row.sector_name, "Pista");
        assert_eq!(row.price, entity.price);
        assert!(row.batch_id.is_none());
    }
}
