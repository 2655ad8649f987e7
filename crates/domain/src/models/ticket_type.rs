//! Ticket type domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A single priced, quantity-limited admission item within a sector or batch.
///
/// Price and quantity stay optional while the producer is editing the row;
/// submission validation requires a name and a price. A `None` quantity means
/// the ticket type is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub id: Uuid,
    pub name: String,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
}

impl TicketType {
    /// Creates an empty ticket row for the producer to fill in.
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            price: None,
            quantity: None,
        }
    }
}

/// Full-row update payload for a ticket type. The editor pushes the whole
/// row on every change, so all fields are carried each time.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeInput {
    #[validate(length(max = 100, message = "Ticket name must be at most 100 characters"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price: Option<Decimal>,

    #[validate(custom(function = "shared::validation::validate_quantity"))]
    pub quantity: Option<i32>,
}
