//! Batch ("lote") domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::TicketType;

/// A time-windowed group of ticket types within a sector, used for staged
/// ("lote") pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: Uuid,
    pub name: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub ticket_types: Vec<TicketType>,
}

impl Batch {
    /// Creates a batch with one empty ticket row.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::with_ticket_types(name, vec![TicketType::empty()])
    }

    /// Creates a batch holding the given ticket types.
    pub fn with_ticket_types(name: impl Into<String>, ticket_types: Vec<TicketType>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            starts_at: None,
            ends_at: None,
            ticket_types,
        }
    }
}

/// Full-row update payload for a batch's name and validity window.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_batch_window"))]
pub struct BatchInput {
    #[validate(length(max = 100, message = "Batch name must be at most 100 characters"))]
    pub name: String,

    pub starts_at: Option<DateTime<Utc>>,

    pub ends_at: Option<DateTime<Utc>>,
}

fn validate_batch_window(input: &BatchInput) -> Result<(), ValidationError> {
    if let (Some(starts), Some(ends)) = (input.starts_at, input.ends_at) {
        if ends <= starts {
            let mut err = ValidationError::new("window_inverted");
            err.message = Some("Batch end must be after its start".into());
            return Err(err);
        }
    }
    Ok(())
}
