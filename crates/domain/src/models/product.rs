//! Add-on product domain model.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A non-admission add-on (merchandise, parking, food) sold alongside
/// tickets, optionally coupon-priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub size: Option<String>,
    pub category: ProductCategory,
    pub image_url: Option<String>,
    pub accepts_coupons: bool,
    /// Override price per coupon id; populated only while `accepts_coupons`.
    pub coupon_prices: BTreeMap<Uuid, Decimal>,
}

impl Product {
    /// Creates an empty product row for the producer to fill in.
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: None,
            price: None,
            quantity: None,
            size: None,
            category: ProductCategory::Other,
            image_url: None,
            accepts_coupons: false,
            coupon_prices: BTreeMap::new(),
        }
    }
}

/// Product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Drink,
    Food,
    Apparel,
    Gift,
    #[default]
    Other,
}

impl ProductCategory {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Drink => "drink",
            ProductCategory::Food => "food",
            ProductCategory::Apparel => "apparel",
            ProductCategory::Gift => "gift",
            ProductCategory::Other => "other",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "drink" => Some(ProductCategory::Drink),
            "food" => Some(ProductCategory::Food),
            "apparel" => Some(ProductCategory::Apparel),
            "gift" => Some(ProductCategory::Gift),
            "other" => Some(ProductCategory::Other),
            _ => None,
        }
    }
}

/// Full-row update payload for a product.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(length(max = 120, message = "Product name must be at most 120 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price: Option<Decimal>,

    #[validate(custom(function = "shared::validation::validate_quantity"))]
    pub quantity: Option<i32>,

    #[validate(length(max = 30, message = "Size must be at most 30 characters"))]
    pub size: Option<String>,

    #[serde(default)]
    pub category: ProductCategory,

    #[validate(length(max = 500, message = "Image URL must be at most 500 characters"))]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_empty_product() {
        let product = Product::empty();
        assert!(product.name.is_empty());
        assert!(product.price.is_none());
        assert!(!product.accepts_coupons);
        assert_eq!(product.category, ProductCategory::Other);
        assert!(product.coupon_prices.is_empty());
    }

    #[test]
    fn test_category_round_trip() {
        for category in [
            ProductCategory::Drink,
            ProductCategory::Food,
            ProductCategory::Apparel,
            ProductCategory::Gift,
            ProductCategory::Other,
        ] {
            assert_eq!(ProductCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(ProductCategory::parse("vehicle"), None);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&ProductCategory::Apparel).unwrap();
        assert_eq!(json, "\"apparel\"");
        let parsed: ProductCategory = serde_json::from_str("\"drink\"").unwrap();
        assert_eq!(parsed, ProductCategory::Drink);
    }

    #[test]
    fn test_input_defaults_category() {
        let json = r#"{"name": "Estacionamento", "price": "30.00", "quantity": 100}"#;
        let input: ProductInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.category, ProductCategory::Other);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_input_rejects_negative_price() {
        let input = ProductInput {
            name: "Copo".to_string(),
            description: None,
            price: Some(Decimal::from_str("-5").unwrap()),
            quantity: Some(10),
            size: None,
            category: ProductCategory::Gift,
            image_url: None,
        };
        assert!(input.validate().is_err());
    }
}
