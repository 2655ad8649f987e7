//! The load path: normalized rows regrouped into the nested draft.

use std::collections::{HashMap, HashSet};

use tracing::warn;
use uuid::Uuid;

use crate::draft::EventDraft;
use crate::models::rows::{BatchRow, FlattenedEvent, TicketRow};
use crate::models::{
    Batch, Coupon, EventDetails, FeePlan, Product, Sector, SectorContents, TicketType,
};

/// Rebuilds a draft from persisted rows.
///
/// Ticket rows group by sector name in first-appearance order. A sector is
/// batched when any of its rows carries a batch id; rows without one in a
/// batched sector become unbatched leftovers (both shapes can coexist after
/// a partial migration). Override join rows referencing an unknown ticket,
/// coupon, or product are skipped with a warning rather than failing the
/// load.
pub(crate) fn unflatten(event_id: Option<Uuid>, mut rows: FlattenedEvent) -> EventDraft {
    rows.batches.sort_by_key(|b| b.position);
    rows.tickets.sort_by_key(|t| t.position);
    rows.coupons.sort_by_key(|c| c.position);
    rows.products.sort_by_key(|p| p.position);

    let details = EventDetails {
        name: rows.event.name,
        description: rows.event.description,
        starts_at: rows.event.starts_at,
        venue: rows.event.venue,
        cover_image_url: rows.event.cover_image_url,
    };
    let fee_plan = Some(FeePlan {
        buyer_fee_percent: rows.event.buyer_fee_percent,
        producer_absorbs_percent: rows.event.producer_absorbs_percent,
    });

    let batch_meta: HashMap<Uuid, &BatchRow> = rows.batches.iter().map(|b| (b.id, b)).collect();

    // Group ticket rows by sector name, preserving first-appearance order.
    let mut sector_order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<&TicketRow>> = HashMap::new();
    for ticket in &rows.tickets {
        if !grouped.contains_key(&ticket.sector_name) {
            sector_order.push(ticket.sector_name.clone());
        }
        grouped.entry(ticket.sector_name.clone()).or_default().push(ticket);
    }

    let mut sectors = Vec::new();
    for name in sector_order {
        let sector_rows = grouped.remove(&name).unwrap_or_default();
        let capacity = sector_rows.iter().find_map(|r| r.sector_capacity);
        let uses_batches = sector_rows.iter().any(|r| r.batch_id.is_some());

        let contents = if uses_batches {
            let mut batch_order: Vec<Uuid> = Vec::new();
            let mut by_batch: HashMap<Uuid, Vec<TicketType>> = HashMap::new();
            let mut unbatched = Vec::new();
            for row in &sector_rows {
                match row.batch_id {
                    Some(batch_id) => {
                        if !by_batch.contains_key(&batch_id) {
                            batch_order.push(batch_id);
                        }
                        by_batch.entry(batch_id).or_default().push(ticket_type(row));
                    }
                    None => unbatched.push(ticket_type(row)),
                }
            }

            let batches = batch_order
                .into_iter()
                .map(|batch_id| {
                    let ticket_types = by_batch.remove(&batch_id).unwrap_or_default();
                    match batch_meta.get(&batch_id) {
                        Some(meta) => Batch {
                            id: batch_id,
                            name: meta.name.clone(),
                            starts_at: meta.starts_at,
                            ends_at: meta.ends_at,
                            ticket_types,
                        },
                        None => {
                            warn!(batch_id = %batch_id, "Ticket rows reference a missing batch row");
                            Batch {
                                id: batch_id,
                                name: String::new(),
                                starts_at: None,
                                ends_at: None,
                                ticket_types,
                            }
                        }
                    }
                })
                .collect();

            SectorContents::Batched { batches, unbatched }
        } else {
            SectorContents::Flat {
                ticket_types: sector_rows.iter().map(|r| ticket_type(r)).collect(),
            }
        };

        sectors.push(Sector {
            id: Uuid::new_v4(),
            name,
            capacity,
            contents,
        });
    }

    let ticket_ids: HashSet<Uuid> = rows.tickets.iter().map(|t| t.id).collect();

    let mut coupons: Vec<Coupon> = rows
        .coupons
        .iter()
        .map(|row| Coupon {
            id: row.id,
            code: row.code.clone(),
            description: row.description.clone(),
            max_uses: row.max_uses,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            ticket_prices: Default::default(),
        })
        .collect();

    for join in &rows.coupon_ticket_prices {
        if !ticket_ids.contains(&join.ticket_id) {
            warn!(ticket_id = %join.ticket_id, "Skipping coupon price for unknown ticket");
            continue;
        }
        match coupons.iter_mut().find(|c| c.id == join.coupon_id) {
            Some(coupon) => {
                coupon.ticket_prices.insert(join.ticket_id, join.price);
            }
            None => warn!(coupon_id = %join.coupon_id, "Skipping price for unknown coupon"),
        }
    }

    let mut products: Vec<Product> = rows
        .products
        .iter()
        .map(|row| Product {
            id: row.id,
            name: row.name.clone(),
            description: row.description.clone(),
            price: Some(row.price),
            quantity: Some(row.quantity),
            size: row.size.clone(),
            category: row.category,
            image_url: row.image_url.clone(),
            accepts_coupons: row.accepts_coupons,
            coupon_prices: Default::default(),
        })
        .collect();

    let coupon_ids: HashSet<Uuid> = coupons.iter().map(|c| c.id).collect();
    for join in &rows.coupon_product_prices {
        if !coupon_ids.contains(&join.coupon_id) {
            warn!(coupon_id = %join.coupon_id, "Skipping product price for unknown coupon");
            continue;
        }
        match products.iter_mut().find(|p| p.id == join.product_id) {
            Some(product) => {
                product.coupon_prices.insert(join.coupon_id, join.price);
            }
            None => warn!(product_id = %join.product_id, "Skipping price for unknown product"),
        }
    }

    EventDraft {
        event_id,
        details,
        sectors,
        coupons,
        products,
        fee_plan,
        revision: 0,
    }
}

fn ticket_type(row: &TicketRow) -> TicketType {
    TicketType {
        id: row.id,
        name: row.name.clone(),
        price: Some(row.price),
        quantity: row.quantity,
    }
}
