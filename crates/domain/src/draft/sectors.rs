//! Sector builder: transforms over the sector list.
//!
//! Removal helpers return the ids of every ticket type they dropped so the
//! aggregate can prune coupon override entries keyed by those ids.

use uuid::Uuid;

use crate::draft::error::DraftError;
use crate::models::batch::BatchInput;
use crate::models::sector::SectorInput;
use crate::models::ticket_type::TicketTypeInput;
use crate::models::{Batch, Sector, SectorContents, TicketType};

pub(crate) fn add_sector(sectors: &mut Vec<Sector>) {
    let name = format!("Sector {}", sectors.len() + 1);
    sectors.push(Sector::empty(name));
}

pub(crate) fn update_sector(
    sectors: &mut [Sector],
    sector_id: Uuid,
    input: SectorInput,
) -> Result<(), DraftError> {
    let sector = find_sector(sectors, sector_id)?;
    sector.name = input.name;
    sector.capacity = input.capacity;
    Ok(())
}

/// Removes a sector. Refused on the last remaining sector; the sector count
/// never reaches zero. Returns the removed ticket type ids.
pub(crate) fn remove_sector(
    sectors: &mut Vec<Sector>,
    sector_id: Uuid,
) -> Result<Vec<Uuid>, DraftError> {
    let index = sectors
        .iter()
        .position(|s| s.id == sector_id)
        .ok_or(DraftError::SectorNotFound(sector_id))?;
    if sectors.len() == 1 {
        return Err(DraftError::LastSector);
    }
    let removed = sectors.remove(index);
    Ok(removed.ticket_types().iter().map(|t| t.id).collect())
}

/// Switches a sector between flat and batched representation without losing
/// already-entered ticket data: flat tickets move into a single new batch,
/// batched tickets (leftovers included) concatenate back into a flat list.
pub(crate) fn toggle_batches(sectors: &mut [Sector], sector_id: Uuid) -> Result<(), DraftError> {
    let sector = find_sector(sectors, sector_id)?;
    sector.contents = match std::mem::replace(
        &mut sector.contents,
        SectorContents::Flat { ticket_types: vec![] },
    ) {
        SectorContents::Flat { ticket_types } => SectorContents::Batched {
            batches: vec![Batch::with_ticket_types("Lote 1", ticket_types)],
            unbatched: vec![],
        },
        SectorContents::Batched { batches, unbatched } => {
            let mut ticket_types: Vec<TicketType> = batches
                .into_iter()
                .flat_map(|b| b.ticket_types)
                .collect();
            ticket_types.extend(unbatched);
            SectorContents::Flat { ticket_types }
        }
    };
    Ok(())
}

pub(crate) fn add_batch(sectors: &mut [Sector], sector_id: Uuid) -> Result<(), DraftError> {
    let sector = find_sector(sectors, sector_id)?;
    match &mut sector.contents {
        SectorContents::Batched { batches, .. } => {
            let name = format!("Lote {}", batches.len() + 1);
            batches.push(Batch::empty(name));
            Ok(())
        }
        SectorContents::Flat { .. } => Err(DraftError::SectorNotBatched(sector_id)),
    }
}

pub(crate) fn update_batch(
    sectors: &mut [Sector],
    sector_id: Uuid,
    batch_id: Uuid,
    input: BatchInput,
) -> Result<(), DraftError> {
    let sector = find_sector(sectors, sector_id)?;
    let batch = find_batch(sector, batch_id)?;
    batch.name = input.name;
    batch.starts_at = input.starts_at;
    batch.ends_at = input.ends_at;
    Ok(())
}

/// Removes a batch. Refused on the last remaining batch of a batched sector
/// (removing it would empty the container). Returns the removed ticket ids.
pub(crate) fn remove_batch(
    sectors: &mut [Sector],
    sector_id: Uuid,
    batch_id: Uuid,
) -> Result<Vec<Uuid>, DraftError> {
    let sector = find_sector(sectors, sector_id)?;
    match &mut sector.contents {
        SectorContents::Batched { batches, .. } => {
            let index = batches
                .iter()
                .position(|b| b.id == batch_id)
                .ok_or(DraftError::BatchNotFound(batch_id))?;
            if batches.len() == 1 {
                return Err(DraftError::LastBatch);
            }
            let removed = batches.remove(index);
            Ok(removed.ticket_types.iter().map(|t| t.id).collect())
        }
        SectorContents::Flat { .. } => Err(DraftError::BatchNotFound(batch_id)),
    }
}

pub(crate) fn add_ticket_type(
    sectors: &mut [Sector],
    sector_id: Uuid,
    batch_id: Option<Uuid>,
) -> Result<(), DraftError> {
    let sector = find_sector(sectors, sector_id)?;
    container_mut(sector, batch_id)?.push(TicketType::empty());
    Ok(())
}

pub(crate) fn update_ticket_type(
    sectors: &mut [Sector],
    sector_id: Uuid,
    batch_id: Option<Uuid>,
    ticket_type_id: Uuid,
    input: TicketTypeInput,
) -> Result<(), DraftError> {
    let sector = find_sector(sectors, sector_id)?;
    let container = container_mut(sector, batch_id)?;
    let ticket = container
        .iter_mut()
        .find(|t| t.id == ticket_type_id)
        .ok_or(DraftError::TicketTypeNotFound(ticket_type_id))?;
    ticket.name = input.name;
    ticket.price = input.price;
    ticket.quantity = input.quantity;
    Ok(())
}

/// Removes a ticket type from its container. Refused on the container's last
/// remaining ticket type. Returns the removed id.
pub(crate) fn remove_ticket_type(
    sectors: &mut [Sector],
    sector_id: Uuid,
    batch_id: Option<Uuid>,
    ticket_type_id: Uuid,
) -> Result<Uuid, DraftError> {
    let sector = find_sector(sectors, sector_id)?;
    let container = container_mut(sector, batch_id)?;
    let index = container
        .iter()
        .position(|t| t.id == ticket_type_id)
        .ok_or(DraftError::TicketTypeNotFound(ticket_type_id))?;
    if container.len() == 1 {
        return Err(DraftError::LastTicketType);
    }
    let removed = container.remove(index);
    Ok(removed.id)
}

fn find_sector(sectors: &mut [Sector], sector_id: Uuid) -> Result<&mut Sector, DraftError> {
    sectors
        .iter_mut()
        .find(|s| s.id == sector_id)
        .ok_or(DraftError::SectorNotFound(sector_id))
}

fn find_batch(sector: &mut Sector, batch_id: Uuid) -> Result<&mut Batch, DraftError> {
    match &mut sector.contents {
        SectorContents::Batched { batches, .. } => batches
            .iter_mut()
            .find(|b| b.id == batch_id)
            .ok_or(DraftError::BatchNotFound(batch_id)),
        SectorContents::Flat { .. } => Err(DraftError::BatchNotFound(batch_id)),
    }
}

/// Resolves the ticket list a command targets: a batch's list when a batch
/// id is given, the sector's flat (or leftover) list otherwise.
fn container_mut(
    sector: &mut Sector,
    batch_id: Option<Uuid>,
) -> Result<&mut Vec<TicketType>, DraftError> {
    match (&mut sector.contents, batch_id) {
        (SectorContents::Flat { ticket_types }, None) => Ok(ticket_types),
        (SectorContents::Flat { .. }, Some(id)) => Err(DraftError::BatchNotFound(id)),
        (SectorContents::Batched { unbatched, .. }, None) => Ok(unbatched),
        (SectorContents::Batched { batches, .. }, Some(id)) => batches
            .iter_mut()
            .find(|b| b.id == id)
            .map(|b| &mut b.ticket_types)
            .ok_or(DraftError::BatchNotFound(id)),
    }
}
