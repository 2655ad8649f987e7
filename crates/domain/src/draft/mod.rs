//! The event draft aggregate.
//!
//! An `EventDraft` is the in-memory tree a producer builds while creating or
//! editing an event: sectors (flat or batched ticket types), coupons with
//! override pricing, add-on products, a fee plan, and event metadata. The
//! aggregate is an explicit struct owned by the caller; every builder
//! operation is a `DraftCommand` applied through [`EventDraft::apply`], and
//! each successful command bumps the revision counter so the owning layer
//! can push the full updated tree outward.

pub mod command;
pub mod error;
pub mod validate;

mod coupons;
mod flatten;
mod products;
mod sectors;
mod unflatten;

use serde::Serialize;
use uuid::Uuid;

use crate::models::rows::FlattenedEvent;
use crate::models::{Coupon, EventDetails, FeePlan, Product, Sector};

pub use command::DraftCommand;
pub use error::DraftError;
pub use validate::{ValidationIssue, ValidationReport};

/// The event configuration under construction. Flattened into normalized
/// rows on submission; rebuilt from rows when an existing event is edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// Set when the draft edits an already-persisted event; submission then
    /// replaces that event's rows.
    pub event_id: Option<Uuid>,
    pub details: EventDetails,
    pub sectors: Vec<Sector>,
    pub coupons: Vec<Coupon>,
    pub products: Vec<Product>,
    pub fee_plan: Option<FeePlan>,
    /// Bumped on every successful command.
    pub revision: u64,
}

impl EventDraft {
    /// A fresh draft: one sector holding one empty ticket row.
    pub fn new() -> Self {
        let mut sectors = Vec::new();
        sectors::add_sector(&mut sectors);
        Self {
            event_id: None,
            details: EventDetails::default(),
            sectors,
            coupons: Vec::new(),
            products: Vec::new(),
            fee_plan: None,
            revision: 0,
        }
    }

    /// Applies one command. On success the revision is bumped; on error the
    /// draft is unchanged.
    pub fn apply(&mut self, command: DraftCommand) -> Result<(), DraftError> {
        match command {
            DraftCommand::UpdateDetails { details } => {
                self.details = details;
            }
            DraftCommand::SelectFeePlan { fee_plan } => {
                self.fee_plan = Some(fee_plan);
            }

            DraftCommand::AddSector => sectors::add_sector(&mut self.sectors),
            DraftCommand::UpdateSector { sector_id, sector } => {
                sectors::update_sector(&mut self.sectors, sector_id, sector)?
            }
            DraftCommand::RemoveSector { sector_id } => {
                let removed = sectors::remove_sector(&mut self.sectors, sector_id)?;
                coupons::prune_ticket_entries(&mut self.coupons, &removed);
            }
            DraftCommand::ToggleBatches { sector_id } => {
                sectors::toggle_batches(&mut self.sectors, sector_id)?
            }
            DraftCommand::AddBatch { sector_id } => {
                sectors::add_batch(&mut self.sectors, sector_id)?
            }
            DraftCommand::UpdateBatch {
                sector_id,
                batch_id,
                batch,
            } => sectors::update_batch(&mut self.sectors, sector_id, batch_id, batch)?,
            DraftCommand::RemoveBatch {
                sector_id,
                batch_id,
            } => {
                let removed = sectors::remove_batch(&mut self.sectors, sector_id, batch_id)?;
                coupons::prune_ticket_entries(&mut self.coupons, &removed);
            }
            DraftCommand::AddTicketType {
                sector_id,
                batch_id,
            } => sectors::add_ticket_type(&mut self.sectors, sector_id, batch_id)?,
            DraftCommand::UpdateTicketType {
                sector_id,
                batch_id,
                ticket_type_id,
                ticket_type,
            } => sectors::update_ticket_type(
                &mut self.sectors,
                sector_id,
                batch_id,
                ticket_type_id,
                ticket_type,
            )?,
            DraftCommand::RemoveTicketType {
                sector_id,
                batch_id,
                ticket_type_id,
            } => {
                let removed = sectors::remove_ticket_type(
                    &mut self.sectors,
                    sector_id,
                    batch_id,
                    ticket_type_id,
                )?;
                coupons::prune_ticket_entries(&mut self.coupons, &[removed]);
            }

            DraftCommand::AddCoupon { copy_from } => {
                coupons::add_coupon(
                    &mut self.coupons,
                    &self.sectors,
                    &mut self.products,
                    copy_from,
                )?;
            }
            DraftCommand::UpdateCoupon { coupon_id, coupon } => {
                coupons::update_coupon(&mut self.coupons, coupon_id, coupon)?
            }
            DraftCommand::RemoveCoupon { coupon_id } => {
                coupons::remove_coupon(&mut self.coupons, &mut self.products, coupon_id)?
            }
            DraftCommand::ApplyPercentDiscount { coupon_id, percent } => {
                coupons::apply_percent_discount(
                    &mut self.coupons,
                    &self.sectors,
                    &mut self.products,
                    coupon_id,
                    percent,
                )?
            }
            DraftCommand::SetOverridePrice {
                coupon_id,
                ticket_type_id,
                price,
            } => coupons::set_override_price(
                &mut self.coupons,
                &self.sectors,
                coupon_id,
                ticket_type_id,
                price,
            )?,

            DraftCommand::AddProduct => products::add_product(&mut self.products),
            DraftCommand::UpdateProduct {
                product_id,
                product,
            } => products::update_product(&mut self.products, product_id, product)?,
            DraftCommand::RemoveProduct { product_id } => {
                products::remove_product(&mut self.products, product_id)?
            }
            DraftCommand::SetAcceptsCoupons {
                product_id,
                accepts,
            } => products::set_accepts_coupons(
                &mut self.products,
                &self.coupons,
                product_id,
                accepts,
            )?,
            DraftCommand::SetProductCouponPrice {
                product_id,
                coupon_id,
                price,
            } => products::set_coupon_price(
                &mut self.products,
                &self.coupons,
                product_id,
                coupon_id,
                price,
            )?,
        }

        self.revision += 1;
        Ok(())
    }

    /// Validates and flattens the draft into normalized rows.
    pub fn flatten(&self) -> Result<FlattenedEvent, ValidationReport> {
        flatten::flatten(self)
    }

    /// Rebuilds a draft from persisted rows (the load path).
    pub fn from_rows(event_id: Option<Uuid>, rows: FlattenedEvent) -> Self {
        unflatten::unflatten(event_id, rows)
    }
}

impl Default for EventDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_shape() {
        let draft = EventDraft::new();
        assert_eq!(draft.sectors.len(), 1);
        assert_eq!(draft.sectors[0].ticket_count(), 1);
        assert!(draft.coupons.is_empty());
        assert!(draft.products.is_empty());
        assert!(draft.fee_plan.is_none());
        assert!(draft.event_id.is_none());
        assert_eq!(draft.revision, 0);
    }

    #[test]
    fn test_successful_command_bumps_revision() {
        let mut draft = EventDraft::new();
        draft.apply(DraftCommand::AddSector).unwrap();
        assert_eq!(draft.revision, 1);
        draft.apply(DraftCommand::AddProduct).unwrap();
        assert_eq!(draft.revision, 2);
    }

    #[test]
    fn test_refused_command_leaves_draft_unchanged() {
        let mut draft = EventDraft::new();
        let sector_id = draft.sectors[0].id;

        let err = draft
            .apply(DraftCommand::RemoveSector { sector_id })
            .unwrap_err();
        assert_eq!(err, DraftError::LastSector);
        assert_eq!(draft.sectors.len(), 1);
        assert_eq!(draft.revision, 0);
    }

    #[test]
    fn test_removing_sector_prunes_coupon_overrides() {
        let mut draft = EventDraft::new();
        draft.apply(DraftCommand::AddSector).unwrap();

        // Price both tickets so the coupon seeds both.
        for i in 0..2 {
            let sector_id = draft.sectors[i].id;
            let ticket_id = draft.sectors[i].ticket_types()[0].id;
            draft
                .apply(DraftCommand::UpdateTicketType {
                    sector_id,
                    batch_id: None,
                    ticket_type_id: ticket_id,
                    ticket_type: crate::models::ticket_type::TicketTypeInput {
                        name: format!("Ticket {}", i),
                        price: Some(rust_decimal::Decimal::new(5000, 2)),
                        quantity: Some(10),
                    },
                })
                .unwrap();
        }
        draft.apply(DraftCommand::AddCoupon { copy_from: None }).unwrap();
        assert_eq!(draft.coupons[0].ticket_prices.len(), 2);

        let doomed_sector = draft.sectors[1].id;
        let doomed_ticket = draft.sectors[1].ticket_types()[0].id;
        draft
            .apply(DraftCommand::RemoveSector {
                sector_id: doomed_sector,
            })
            .unwrap();

        assert_eq!(draft.coupons[0].ticket_prices.len(), 1);
        assert!(!draft.coupons[0].ticket_prices.contains_key(&doomed_ticket));
    }

    #[test]
    fn test_draft_snapshot_serializes_full_tree() {
        let draft = EventDraft::new();
        let json = serde_json::to_string(&draft).unwrap();
        assert!(json.contains("\"sectors\""));
        assert!(json.contains("\"coupons\""));
        assert!(json.contains("\"products\""));
        assert!(json.contains("\"revision\":0"));
        assert!(json.contains("\"feePlan\":null"));
    }
}
