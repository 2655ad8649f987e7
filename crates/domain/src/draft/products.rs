//! Product builder: the add-on list and its per-coupon override pricing.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::draft::error::DraftError;
use crate::models::product::ProductInput;
use crate::models::{Coupon, Product};
use shared::money;

pub(crate) fn add_product(products: &mut Vec<Product>) {
    products.push(Product::empty());
}

pub(crate) fn update_product(
    products: &mut [Product],
    product_id: Uuid,
    input: ProductInput,
) -> Result<(), DraftError> {
    let product = find_product(products, product_id)?;
    product.name = input.name;
    product.description = input.description;
    product.price = input.price;
    product.quantity = input.quantity;
    product.size = input.size;
    product.category = input.category;
    product.image_url = input.image_url;
    Ok(())
}

pub(crate) fn remove_product(
    products: &mut Vec<Product>,
    product_id: Uuid,
) -> Result<(), DraftError> {
    let index = products
        .iter()
        .position(|p| p.id == product_id)
        .ok_or(DraftError::ProductNotFound(product_id))?;
    products.remove(index);
    Ok(())
}

/// Flips coupon acceptance. On the false-to-true transition the per-coupon
/// map is seeded with the product's current base price for every known
/// coupon, mirroring how coupon creation seeds ticket overrides.
pub(crate) fn set_accepts_coupons(
    products: &mut [Product],
    coupons: &[Coupon],
    product_id: Uuid,
    accepts: bool,
) -> Result<(), DraftError> {
    let product = find_product(products, product_id)?;
    let enabling = accepts && !product.accepts_coupons;
    product.accepts_coupons = accepts;
    if enabling {
        if let Some(base) = product.price {
            for coupon in coupons {
                product.coupon_prices.insert(coupon.id, base);
            }
        }
    }
    Ok(())
}

/// Manual per-coupon product price, clamped to be non-negative.
pub(crate) fn set_coupon_price(
    products: &mut [Product],
    coupons: &[Coupon],
    product_id: Uuid,
    coupon_id: Uuid,
    price: Decimal,
) -> Result<(), DraftError> {
    if !coupons.iter().any(|c| c.id == coupon_id) {
        return Err(DraftError::CouponNotFound(coupon_id));
    }
    let product = find_product(products, product_id)?;
    if !product.accepts_coupons {
        return Err(DraftError::CouponsNotAccepted(product_id));
    }
    product
        .coupon_prices
        .insert(coupon_id, money::clamp_non_negative(price));
    Ok(())
}

fn find_product(products: &mut [Product], product_id: Uuid) -> Result<&mut Product, DraftError> {
    products
        .iter_mut()
        .find(|p| p.id == product_id)
        .ok_or(DraftError::ProductNotFound(product_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductCategory;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_add_product_appends_blank_row() {
        let mut products = Vec::new();
        add_product(&mut products);
        assert_eq!(products.len(), 1);
        assert!(products[0].name.is_empty());
        assert!(!products[0].accepts_coupons);
    }

    #[test]
    fn test_update_product_replaces_row() {
        let mut products = Vec::new();
        add_product(&mut products);
        let id = products[0].id;

        update_product(
            &mut products,
            id,
            ProductInput {
                name: "Camiseta".to_string(),
                description: Some("Edição do festival".to_string()),
                price: Some(dec("79.90")),
                quantity: Some(200),
                size: Some("M".to_string()),
                category: ProductCategory::Apparel,
                image_url: None,
            },
        )
        .unwrap();

        assert_eq!(products[0].name, "Camiseta");
        assert_eq!(products[0].price, Some(dec("79.90")));
        assert_eq!(products[0].category, ProductCategory::Apparel);
    }

    #[test]
    fn test_enabling_coupons_seeds_base_price_per_coupon() {
        let coupons = vec![Coupon::empty(), Coupon::empty()];
        let mut products = Vec::new();
        add_product(&mut products);
        let id = products[0].id;
        products[0].price = Some(dec("30.00"));

        set_accepts_coupons(&mut products, &coupons, id, true).unwrap();

        assert!(products[0].accepts_coupons);
        assert_eq!(products[0].coupon_prices.len(), 2);
        for coupon in &coupons {
            assert_eq!(products[0].coupon_prices.get(&coupon.id), Some(&dec("30.00")));
        }
    }

    #[test]
    fn test_re_enabling_reseeds_only_on_transition() {
        let coupons = vec![Coupon::empty()];
        let coupon_id = coupons[0].id;
        let mut products = Vec::new();
        add_product(&mut products);
        let id = products[0].id;
        products[0].price = Some(dec("30.00"));

        set_accepts_coupons(&mut products, &coupons, id, true).unwrap();
        set_coupon_price(&mut products, &coupons, id, coupon_id, dec("25.00")).unwrap();

        // Setting true again is not a transition; the edited price stays.
        set_accepts_coupons(&mut products, &coupons, id, true).unwrap();
        assert_eq!(products[0].coupon_prices.get(&coupon_id), Some(&dec("25.00")));

        // Toggling off and back on reseeds from the base price.
        set_accepts_coupons(&mut products, &coupons, id, false).unwrap();
        set_accepts_coupons(&mut products, &coupons, id, true).unwrap();
        assert_eq!(products[0].coupon_prices.get(&coupon_id), Some(&dec("30.00")));
    }

    #[test]
    fn test_set_coupon_price_requires_acceptance() {
        let coupons = vec![Coupon::empty()];
        let coupon_id = coupons[0].id;
        let mut products = Vec::new();
        add_product(&mut products);
        let id = products[0].id;

        assert_eq!(
            set_coupon_price(&mut products, &coupons, id, coupon_id, dec("10")),
            Err(DraftError::CouponsNotAccepted(id))
        );
    }

    #[test]
    fn test_set_coupon_price_clamps_negative() {
        let coupons = vec![Coupon::empty()];
        let coupon_id = coupons[0].id;
        let mut products = Vec::new();
        add_product(&mut products);
        let id = products[0].id;
        products[0].price = Some(dec("30.00"));
        set_accepts_coupons(&mut products, &coupons, id, true).unwrap();

        set_coupon_price(&mut products, &coupons, id, coupon_id, dec("-1")).unwrap();
        assert_eq!(products[0].coupon_prices.get(&coupon_id), Some(&Decimal::ZERO));
    }

    #[test]
    fn test_set_coupon_price_unknown_coupon() {
        let mut products = Vec::new();
        add_product(&mut products);
        let id = products[0].id;
        let ghost = Uuid::new_v4();

        assert_eq!(
            set_coupon_price(&mut products, &[], id, ghost, dec("10")),
            Err(DraftError::CouponNotFound(ghost))
        );
    }

    #[test]
    fn test_remove_product() {
        let mut products = Vec::new();
        add_product(&mut products);
        let id = products[0].id;
        remove_product(&mut products, id).unwrap();
        assert!(products.is_empty());

        assert_eq!(
            remove_product(&mut products, id),
            Err(DraftError::ProductNotFound(id))
        );
    }
}
