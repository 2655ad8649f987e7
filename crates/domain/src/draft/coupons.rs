//! Coupon builder: the override-price map kept consistent with the live
//! sector/ticket tree and the product list.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::draft::error::DraftError;
use crate::models::coupon::CouponInput;
use crate::models::{Coupon, Product, Sector};
use shared::money;

/// Creates a coupon. The override map is seeded with every existing ticket
/// type's current price, so an un-edited coupon is price-neutral; with
/// `copy_from`, the map is deep-copied from that coupon instead. Products
/// that accept coupons get an entry for the new coupon the same way.
pub(crate) fn add_coupon(
    coupons: &mut Vec<Coupon>,
    sectors: &[Sector],
    products: &mut [Product],
    copy_from: Option<Uuid>,
) -> Result<Uuid, DraftError> {
    let mut coupon = Coupon::empty();

    match copy_from {
        Some(source_id) => {
            let source = coupons
                .iter()
                .find(|c| c.id == source_id)
                .ok_or(DraftError::CouponNotFound(source_id))?;
            coupon.ticket_prices = source.ticket_prices.clone();
            for product in products.iter_mut().filter(|p| p.accepts_coupons) {
                let seeded = product
                    .coupon_prices
                    .get(&source_id)
                    .copied()
                    .or(product.price);
                if let Some(price) = seeded {
                    product.coupon_prices.insert(coupon.id, price);
                }
            }
        }
        None => {
            for sector in sectors {
                for ticket in sector.ticket_types() {
                    if let Some(price) = ticket.price {
                        coupon.ticket_prices.insert(ticket.id, price);
                    }
                }
            }
            for product in products.iter_mut().filter(|p| p.accepts_coupons) {
                if let Some(price) = product.price {
                    product.coupon_prices.insert(coupon.id, price);
                }
            }
        }
    }

    let id = coupon.id;
    coupons.push(coupon);
    Ok(id)
}

/// Full-row update. The code is case-normalized to uppercase; cross-coupon
/// code uniqueness is left to the persistence layer's constraint.
pub(crate) fn update_coupon(
    coupons: &mut [Coupon],
    coupon_id: Uuid,
    input: CouponInput,
) -> Result<(), DraftError> {
    let coupon = find_coupon(coupons, coupon_id)?;
    coupon.code = Coupon::normalize_code(&input.code);
    coupon.description = input.description;
    coupon.max_uses = input.max_uses;
    coupon.starts_at = input.starts_at;
    coupon.ends_at = input.ends_at;
    Ok(())
}

/// Removes a coupon and prunes its per-product entries.
pub(crate) fn remove_coupon(
    coupons: &mut Vec<Coupon>,
    products: &mut [Product],
    coupon_id: Uuid,
) -> Result<(), DraftError> {
    let index = coupons
        .iter()
        .position(|c| c.id == coupon_id)
        .ok_or(DraftError::CouponNotFound(coupon_id))?;
    coupons.remove(index);
    for product in products.iter_mut() {
        product.coupon_prices.remove(&coupon_id);
    }
    Ok(())
}

/// Recomputes every mapped override as `round(live * (1 - percent/100), 2)`,
/// reading the live ticket (and product base) price rather than the previous
/// override. Re-applying the same percent is therefore idempotent, not
/// cumulative. Entries whose live price was cleared are left untouched.
pub(crate) fn apply_percent_discount(
    coupons: &mut [Coupon],
    sectors: &[Sector],
    products: &mut [Product],
    coupon_id: Uuid,
    percent: Decimal,
) -> Result<(), DraftError> {
    if !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&percent) {
        return Err(DraftError::InvalidPercent);
    }
    let coupon = find_coupon(coupons, coupon_id)?;

    for sector in sectors {
        for ticket in sector.ticket_types() {
            if !coupon.ticket_prices.contains_key(&ticket.id) {
                continue;
            }
            if let Some(live) = ticket.price {
                coupon
                    .ticket_prices
                    .insert(ticket.id, money::percent_off(live, percent));
            }
        }
    }

    for product in products.iter_mut().filter(|p| p.accepts_coupons) {
        if !product.coupon_prices.contains_key(&coupon_id) {
            continue;
        }
        if let Some(base) = product.price {
            product
                .coupon_prices
                .insert(coupon_id, money::percent_off(base, percent));
        }
    }

    Ok(())
}

/// Manual override edit. The price is clamped to be non-negative; there is
/// no upper bound, a coupon price above the original is allowed.
pub(crate) fn set_override_price(
    coupons: &mut [Coupon],
    sectors: &[Sector],
    coupon_id: Uuid,
    ticket_type_id: Uuid,
    price: Decimal,
) -> Result<(), DraftError> {
    let exists = sectors
        .iter()
        .any(|s| s.ticket_types().iter().any(|t| t.id == ticket_type_id));
    if !exists {
        return Err(DraftError::TicketTypeNotFound(ticket_type_id));
    }
    let coupon = find_coupon(coupons, coupon_id)?;
    coupon
        .ticket_prices
        .insert(ticket_type_id, money::clamp_non_negative(price));
    Ok(())
}

/// Drops override entries for ticket types that no longer exist.
pub(crate) fn prune_ticket_entries(coupons: &mut [Coupon], removed: &[Uuid]) {
    for coupon in coupons.iter_mut() {
        for id in removed {
            coupon.ticket_prices.remove(id);
        }
    }
}

fn find_coupon(coupons: &mut [Coupon], coupon_id: Uuid) -> Result<&mut Coupon, DraftError> {
    coupons
        .iter_mut()
        .find(|c| c.id == coupon_id)
        .ok_or(DraftError::CouponNotFound(coupon_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SectorContents, TicketType};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn priced_ticket(name: &str, price: &str) -> TicketType {
        TicketType {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price: Some(dec(price)),
            quantity: Some(50),
        }
    }

    fn pista(tickets: Vec<TicketType>) -> Sector {
        Sector {
            id: Uuid::new_v4(),
            name: "Pista".to_string(),
            capacity: None,
            contents: SectorContents::Flat { ticket_types: tickets },
        }
    }

    #[test]
    fn test_new_coupon_seeds_current_prices() {
        let inteira = priced_ticket("Inteira", "100.00");
        let meia = priced_ticket("Meia", "50.00");
        let inteira_id = inteira.id;
        let meia_id = meia.id;
        let sectors = vec![pista(vec![inteira, meia])];
        let mut coupons = Vec::new();

        add_coupon(&mut coupons, &sectors, &mut [], None).unwrap();

        let coupon = &coupons[0];
        assert_eq!(coupon.ticket_prices.get(&inteira_id), Some(&dec("100.00")));
        assert_eq!(coupon.ticket_prices.get(&meia_id), Some(&dec("50.00")));
    }

    #[test]
    fn test_new_coupon_skips_unpriced_tickets() {
        let unpriced = TicketType::empty();
        let unpriced_id = unpriced.id;
        let sectors = vec![pista(vec![unpriced, priced_ticket("Inteira", "80.00")])];
        let mut coupons = Vec::new();

        add_coupon(&mut coupons, &sectors, &mut [], None).unwrap();
        assert!(!coupons[0].ticket_prices.contains_key(&unpriced_id));
        assert_eq!(coupons[0].ticket_prices.len(), 1);
    }

    #[test]
    fn test_copy_previous_deep_copies_map() {
        let ticket = priced_ticket("Inteira", "100.00");
        let ticket_id = ticket.id;
        let sectors = vec![pista(vec![ticket])];
        let mut coupons = Vec::new();

        let first = add_coupon(&mut coupons, &sectors, &mut [], None).unwrap();
        coupons[0]
            .ticket_prices
            .insert(ticket_id, dec("60.00"));

        let second = add_coupon(&mut coupons, &sectors, &mut [], Some(first)).unwrap();
        assert_eq!(coupons[1].ticket_prices.get(&ticket_id), Some(&dec("60.00")));

        // Editing the copy must not touch the source.
        let second_index = coupons.iter().position(|c| c.id == second).unwrap();
        coupons[second_index]
            .ticket_prices
            .insert(ticket_id, dec("10.00"));
        assert_eq!(coupons[0].ticket_prices.get(&ticket_id), Some(&dec("60.00")));
    }

    #[test]
    fn test_copy_from_unknown_coupon() {
        let ghost = Uuid::new_v4();
        let mut coupons = Vec::new();
        assert_eq!(
            add_coupon(&mut coupons, &[], &mut [], Some(ghost)),
            Err(DraftError::CouponNotFound(ghost))
        );
        assert!(coupons.is_empty());
    }

    #[test]
    fn test_percent_discount_reads_live_price() {
        let ticket = priced_ticket("Inteira", "100.00");
        let ticket_id = ticket.id;
        let sectors = vec![pista(vec![ticket])];
        let mut coupons = Vec::new();
        let coupon_id = add_coupon(&mut coupons, &sectors, &mut [], None).unwrap();

        apply_percent_discount(&mut coupons, &sectors, &mut [], coupon_id, dec("20")).unwrap();
        assert_eq!(coupons[0].ticket_prices.get(&ticket_id), Some(&dec("80.00")));

        // Applying twice yields the same map: source is the live price,
        // not the previous override.
        apply_percent_discount(&mut coupons, &sectors, &mut [], coupon_id, dec("20")).unwrap();
        assert_eq!(coupons[0].ticket_prices.get(&ticket_id), Some(&dec("80.00")));
    }

    #[test]
    fn test_percent_discount_rejects_out_of_range() {
        let sectors = vec![pista(vec![priced_ticket("Inteira", "100.00")])];
        let mut coupons = Vec::new();
        let coupon_id = add_coupon(&mut coupons, &sectors, &mut [], None).unwrap();

        assert_eq!(
            apply_percent_discount(&mut coupons, &sectors, &mut [], coupon_id, dec("101")),
            Err(DraftError::InvalidPercent)
        );
        assert_eq!(
            apply_percent_discount(&mut coupons, &sectors, &mut [], coupon_id, dec("-1")),
            Err(DraftError::InvalidPercent)
        );
    }

    #[test]
    fn test_set_override_price_clamps_negative() {
        let ticket = priced_ticket("Inteira", "100.00");
        let ticket_id = ticket.id;
        let sectors = vec![pista(vec![ticket])];
        let mut coupons = Vec::new();
        let coupon_id = add_coupon(&mut coupons, &sectors, &mut [], None).unwrap();

        set_override_price(&mut coupons, &sectors, coupon_id, ticket_id, dec("-5")).unwrap();
        assert_eq!(coupons[0].ticket_prices.get(&ticket_id), Some(&Decimal::ZERO));
    }

    #[test]
    fn test_set_override_price_allows_above_original() {
        let ticket = priced_ticket("Inteira", "100.00");
        let ticket_id = ticket.id;
        let sectors = vec![pista(vec![ticket])];
        let mut coupons = Vec::new();
        let coupon_id = add_coupon(&mut coupons, &sectors, &mut [], None).unwrap();

        set_override_price(&mut coupons, &sectors, coupon_id, ticket_id, dec("150.00")).unwrap();
        assert_eq!(
            coupons[0].ticket_prices.get(&ticket_id),
            Some(&dec("150.00"))
        );
    }

    #[test]
    fn test_set_override_price_requires_live_ticket() {
        let sectors = vec![pista(vec![priced_ticket("Inteira", "100.00")])];
        let mut coupons = Vec::new();
        let coupon_id = add_coupon(&mut coupons, &sectors, &mut [], None).unwrap();

        let ghost = Uuid::new_v4();
        assert_eq!(
            set_override_price(&mut coupons, &sectors, coupon_id, ghost, dec("10")),
            Err(DraftError::TicketTypeNotFound(ghost))
        );
    }

    #[test]
    fn test_update_coupon_uppercases_code() {
        let mut coupons = Vec::new();
        let coupon_id = add_coupon(&mut coupons, &[], &mut [], None).unwrap();

        update_coupon(
            &mut coupons,
            coupon_id,
            CouponInput {
                code: "  promo10 ".to_string(),
                description: Some("Early bird".to_string()),
                max_uses: Some(100),
                starts_at: None,
                ends_at: None,
            },
        )
        .unwrap();

        assert_eq!(coupons[0].code, "PROMO10");
        assert_eq!(coupons[0].max_uses, Some(100));
    }

    #[test]
    fn test_remove_coupon_prunes_product_entries() {
        let mut product = Product::empty();
        product.price = Some(dec("30.00"));
        product.accepts_coupons = true;
        let mut products = vec![product];

        let mut coupons = Vec::new();
        let coupon_id = add_coupon(&mut coupons, &[], &mut products, None).unwrap();
        assert!(products[0].coupon_prices.contains_key(&coupon_id));

        remove_coupon(&mut coupons, &mut products, coupon_id).unwrap();
        assert!(coupons.is_empty());
        assert!(!products[0].coupon_prices.contains_key(&coupon_id));
    }

    #[test]
    fn test_prune_ticket_entries() {
        let ticket = priced_ticket("Inteira", "100.00");
        let ticket_id = ticket.id;
        let sectors = vec![pista(vec![ticket])];
        let mut coupons = Vec::new();
        add_coupon(&mut coupons, &sectors, &mut [], None).unwrap();

        prune_ticket_entries(&mut coupons, &[ticket_id]);
        assert!(coupons[0].ticket_prices.is_empty());
    }
}
