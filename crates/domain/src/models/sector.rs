//! Sector ("setor") domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Batch, TicketType};

/// A named subdivision of the venue (e.g. "VIP", "Pista") holding either
/// flat ticket types or batches of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: Uuid,
    pub name: String,
    pub capacity: Option<i32>,
    pub contents: SectorContents,
}

/// The two shapes a sector's inventory can take. A sector is either flat or
/// batched, never both; the batched variant carries an `unbatched` leftover
/// list so rows without a batch id can survive a partial migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum SectorContents {
    #[serde(rename_all = "camelCase")]
    Flat { ticket_types: Vec<TicketType> },
    #[serde(rename_all = "camelCase")]
    Batched {
        batches: Vec<Batch>,
        unbatched: Vec<TicketType>,
    },
}

impl Sector {
    /// Creates a flat sector with one empty ticket row.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            capacity: None,
            contents: SectorContents::Flat {
                ticket_types: vec![TicketType::empty()],
            },
        }
    }

    /// Whether this sector groups its ticket types into batches.
    pub fn uses_batches(&self) -> bool {
        matches!(self.contents, SectorContents::Batched { .. })
    }

    /// All ticket types under this sector, in display order.
    pub fn ticket_types(&self) -> Vec<&TicketType> {
        match &self.contents {
            SectorContents::Flat { ticket_types } => ticket_types.iter().collect(),
            SectorContents::Batched { batches, unbatched } => batches
                .iter()
                .flat_map(|b| b.ticket_types.iter())
                .chain(unbatched.iter())
                .collect(),
        }
    }

    /// Number of ticket types under this sector.
    pub fn ticket_count(&self) -> usize {
        match &self.contents {
            SectorContents::Flat { ticket_types } => ticket_types.len(),
            SectorContents::Batched { batches, unbatched } => {
                batches.iter().map(|b| b.ticket_types.len()).sum::<usize>() + unbatched.len()
            }
        }
    }
}

/// Full-row update payload for a sector's name and capacity.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SectorInput {
    #[validate(length(max = 100, message = "Sector name must be at most 100 characters"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_capacity"))]
    pub capacity: Option<i32>,
}
