//! Flattening: the nested draft decomposed into normalized row sets.

use std::collections::HashSet;

use uuid::Uuid;

use crate::draft::validate::{self, ValidationReport};
use crate::draft::EventDraft;
use crate::models::rows::{
    BatchRow, CouponProductPriceRow, CouponRow, CouponTicketPriceRow, EventRow, FlattenedEvent,
    ProductRow, TicketRow,
};
use crate::models::SectorContents;
use rust_decimal::Decimal;

/// Flattens a draft into the row sets the persistence layer writes.
/// Validation runs first; an invalid draft produces no rows at all.
///
/// Each ticket row carries its sector denormalized (name and capacity) and a
/// nullable batch id. Coupon and product override entries become join rows;
/// only non-zero override prices are emitted.
pub(crate) fn flatten(draft: &EventDraft) -> Result<FlattenedEvent, ValidationReport> {
    validate::validate(draft)?;

    // Validation guarantees the fee plan and every price below are present.
    let fee_plan = draft.fee_plan.unwrap_or_default();
    let event = EventRow {
        name: draft.details.name.clone(),
        description: draft.details.description.clone(),
        starts_at: draft.details.starts_at,
        venue: draft.details.venue.clone(),
        cover_image_url: draft.details.cover_image_url.clone(),
        buyer_fee_percent: fee_plan.buyer_fee_percent,
        producer_absorbs_percent: fee_plan.producer_absorbs_percent,
    };

    let mut batches = Vec::new();
    let mut tickets = Vec::new();
    for sector in &draft.sectors {
        match &sector.contents {
            SectorContents::Flat { ticket_types } => {
                for ticket in ticket_types {
                    push_ticket(&mut tickets, sector, None, ticket);
                }
            }
            SectorContents::Batched {
                batches: sector_batches,
                unbatched,
            } => {
                for batch in sector_batches {
                    batches.push(BatchRow {
                        id: batch.id,
                        name: batch.name.clone(),
                        starts_at: batch.starts_at,
                        ends_at: batch.ends_at,
                        position: batches.len() as i32,
                    });
                    for ticket in &batch.ticket_types {
                        push_ticket(&mut tickets, sector, Some(batch.id), ticket);
                    }
                }
                for ticket in unbatched {
                    push_ticket(&mut tickets, sector, None, ticket);
                }
            }
        }
    }

    let ticket_ids: HashSet<Uuid> = tickets.iter().map(|t| t.id).collect();

    let mut coupons = Vec::new();
    let mut coupon_ticket_prices = Vec::new();
    for coupon in &draft.coupons {
        coupons.push(CouponRow {
            id: coupon.id,
            code: coupon.code.clone(),
            description: coupon.description.clone(),
            max_uses: coupon.max_uses,
            starts_at: coupon.starts_at,
            ends_at: coupon.ends_at,
            position: coupons.len() as i32,
        });
        for (ticket_id, price) in &coupon.ticket_prices {
            if *price > Decimal::ZERO && ticket_ids.contains(ticket_id) {
                coupon_ticket_prices.push(CouponTicketPriceRow {
                    coupon_id: coupon.id,
                    ticket_id: *ticket_id,
                    price: *price,
                });
            }
        }
    }

    let coupon_ids: HashSet<Uuid> = coupons.iter().map(|c| c.id).collect();

    let mut products = Vec::new();
    let mut coupon_product_prices = Vec::new();
    for product in &draft.products {
        products.push(ProductRow {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.unwrap_or_default(),
            quantity: product.quantity.unwrap_or_default(),
            size: product.size.clone(),
            category: product.category,
            image_url: product.image_url.clone(),
            accepts_coupons: product.accepts_coupons,
            position: products.len() as i32,
        });
        if product.accepts_coupons {
            for (coupon_id, price) in &product.coupon_prices {
                if *price > Decimal::ZERO && coupon_ids.contains(coupon_id) {
                    coupon_product_prices.push(CouponProductPriceRow {
                        coupon_id: *coupon_id,
                        product_id: product.id,
                        price: *price,
                    });
                }
            }
        }
    }

    Ok(FlattenedEvent {
        event,
        batches,
        tickets,
        coupons,
        coupon_ticket_prices,
        products,
        coupon_product_prices,
    })
}

fn push_ticket(
    tickets: &mut Vec<TicketRow>,
    sector: &crate::models::Sector,
    batch_id: Option<Uuid>,
    ticket: &crate::models::TicketType,
) {
    tickets.push(TicketRow {
        id: ticket.id,
        sector_name: sector.name.clone(),
        sector_capacity: sector.capacity,
        batch_id,
        name: ticket.name.clone(),
        price: ticket.price.unwrap_or_default(),
        quantity: ticket.quantity,
        position: tickets.len() as i32,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::command::DraftCommand;
    use crate::models::ticket_type::TicketTypeInput;
    use crate::models::FeePlan;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn pista_draft() -> EventDraft {
        let mut draft = EventDraft::new();
        draft.details.name = "Festival da Serra".to_string();
        draft.fee_plan = Some(FeePlan {
            buyer_fee_percent: dec("10"),
            producer_absorbs_percent: Decimal::ZERO,
        });
        let sector_id = draft.sectors[0].id;
        draft
            .apply(DraftCommand::UpdateSector {
                sector_id,
                sector: crate::models::sector::SectorInput {
                    name: "Pista".to_string(),
                    capacity: None,
                },
            })
            .unwrap();
        let ticket_id = draft.sectors[0].ticket_types()[0].id;
        draft
            .apply(DraftCommand::UpdateTicketType {
                sector_id,
                batch_id: None,
                ticket_type_id: ticket_id,
                ticket_type: TicketTypeInput {
                    name: "Inteira".to_string(),
                    price: Some(dec("100.00")),
                    quantity: Some(50),
                },
            })
            .unwrap();
        draft
    }

    #[test]
    fn test_invalid_draft_produces_no_rows() {
        let draft = EventDraft::new();
        assert!(flatten(&draft).is_err());
    }

    #[test]
    fn test_example_scenario_rows() {
        // Sector "Pista" (flat), ticket "Inteira" 100.00 x50, coupon PROMO
        // at 20% off: one ticket row, one coupon row, one join row at 80.00.
        let mut draft = pista_draft();
        draft.apply(DraftCommand::AddCoupon { copy_from: None }).unwrap();
        let coupon_id = draft.coupons[0].id;
        draft
            .apply(DraftCommand::UpdateCoupon {
                coupon_id,
                coupon: crate::models::coupon::CouponInput {
                    code: "PROMO".to_string(),
                    description: None,
                    max_uses: None,
                    starts_at: None,
                    ends_at: None,
                },
            })
            .unwrap();
        draft
            .apply(DraftCommand::ApplyPercentDiscount {
                coupon_id,
                percent: dec("20"),
            })
            .unwrap();

        let flat = flatten(&draft).unwrap();

        assert_eq!(flat.tickets.len(), 1);
        let ticket = &flat.tickets[0];
        assert_eq!(ticket.sector_name, "Pista");
        assert_eq!(ticket.name, "Inteira");
        assert_eq!(ticket.price, dec("100.00"));
        assert_eq!(ticket.quantity, Some(50));
        assert!(ticket.batch_id.is_none());

        assert_eq!(flat.coupons.len(), 1);
        assert_eq!(flat.coupons[0].code, "PROMO");

        assert_eq!(flat.coupon_ticket_prices.len(), 1);
        let join = &flat.coupon_ticket_prices[0];
        assert_eq!(join.coupon_id, coupon_id);
        assert_eq!(join.ticket_id, ticket.id);
        assert_eq!(join.price, dec("80.00"));

        assert!(flat.batches.is_empty());
        assert!(flat.products.is_empty());
    }

    #[test]
    fn test_zero_price_overrides_are_not_emitted() {
        let mut draft = pista_draft();
        draft.apply(DraftCommand::AddCoupon { copy_from: None }).unwrap();
        let coupon_id = draft.coupons[0].id;
        let ticket_id = draft.sectors[0].ticket_types()[0].id;
        draft
            .apply(DraftCommand::UpdateCoupon {
                coupon_id,
                coupon: crate::models::coupon::CouponInput {
                    code: "FREE".to_string(),
                    description: None,
                    max_uses: None,
                    starts_at: None,
                    ends_at: None,
                },
            })
            .unwrap();
        draft
            .apply(DraftCommand::SetOverridePrice {
                coupon_id,
                ticket_type_id: ticket_id,
                price: Decimal::ZERO,
            })
            .unwrap();

        let flat = flatten(&draft).unwrap();
        assert!(flat.coupon_ticket_prices.is_empty());
    }

    #[test]
    fn test_batched_sector_emits_batch_rows_and_links() {
        let mut draft = pista_draft();
        let sector_id = draft.sectors[0].id;
        draft.apply(DraftCommand::ToggleBatches { sector_id }).unwrap();

        let flat = flatten(&draft).unwrap();
        assert_eq!(flat.batches.len(), 1);
        assert_eq!(flat.batches[0].name, "Lote 1");
        assert_eq!(flat.tickets.len(), 1);
        assert_eq!(flat.tickets[0].batch_id, Some(flat.batches[0].id));
    }

    #[test]
    fn test_positions_follow_display_order() {
        let mut draft = pista_draft();
        draft.apply(DraftCommand::AddSector).unwrap();
        let second = draft.sectors[1].id;
        let ticket_id = draft.sectors[1].ticket_types()[0].id;
        draft
            .apply(DraftCommand::UpdateTicketType {
                sector_id: second,
                batch_id: None,
                ticket_type_id: ticket_id,
                ticket_type: TicketTypeInput {
                    name: "Meia".to_string(),
                    price: Some(dec("50.00")),
                    quantity: Some(25),
                },
            })
            .unwrap();

        let flat = flatten(&draft).unwrap();
        let positions: Vec<i32> = flat.tickets.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1]);
        assert_eq!(flat.tickets[0].sector_name, "Pista");
        assert_eq!(flat.tickets[1].sector_name, "Sector 2");
    }
}
