//! Product entity (database row mapping).

use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::rows::ProductRow;
use domain::models::ProductCategory;

/// Database row mapping for the products table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub size: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
    pub accepts_coupons: bool,
    pub position: i32,
}

impl From<ProductEntity> for ProductRow {
    fn from(entity: ProductEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            price: entity.price,
            quantity: entity.quantity,
            size: entity.size,
            // Unknown categories fall back to "other".
            category: ProductCategory::parse(&entity.category).unwrap_or_default(),
            image_url: entity.image_url,
            accepts_coupons: entity.accepts_coupons,
            position: entity.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create_test_product_entity() -> ProductEntity {
        ProductEntity {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            name: "Camiseta".to_string(),
            description: None,
            price: Decimal::from_str("79.90").unwrap(),
            quantity: 300,
            size: Some("M".to_string()),
            category: "apparel".to_string(),
            image_url: None,
            accepts_coupons: true,
            position: 0,
        }
    }

    #[test]
    fn test_product_entity_to_row() {
        let entity = create_test_product_entity();
        let row: ProductRow = entity.clone().into();
        assert_eq!(row.id, entity.id);
        assert_eq!(row.category, ProductCategory::Apparel);
        assert!(row.accepts_coupons);
    }

    #[test]
    fn test_unknown_category_falls_back_to_other() {
        let mut entity = create_test_product_entity();
        entity.category = "vehicle".to_string();
        let row: ProductRow = entity.into();
        assert_eq!(row.category, ProductCategory::Other);
    }
}
