//! Coupon ("cupom") domain model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A named discount code carrying a per-ticket-type override price.
///
/// Override prices are keyed by the stable generated ticket type id, so
/// renaming a sector or a ticket cannot orphan an entry. The map is seeded
/// with each ticket's current price at coupon creation time; an un-edited
/// coupon is price-neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    pub description: Option<String>,
    pub max_uses: Option<i32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    /// Override price per ticket type id.
    pub ticket_prices: BTreeMap<Uuid, Decimal>,
}

impl Coupon {
    /// Creates a coupon with a blank code and an empty override map.
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            code: String::new(),
            description: None,
            max_uses: None,
            starts_at: None,
            ends_at: None,
            ticket_prices: BTreeMap::new(),
        }
    }

    /// Case-normalizes a coupon code: trimmed, uppercase.
    pub fn normalize_code(code: &str) -> String {
        code.trim().to_uppercase()
    }
}

/// Full-row update payload for a coupon's code, caps, and validity window.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_coupon_window"))]
pub struct CouponInput {
    #[validate(custom(function = "shared::validation::validate_coupon_code"))]
    pub code: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "shared::validation::validate_quantity"))]
    pub max_uses: Option<i32>,

    pub starts_at: Option<DateTime<Utc>>,

    pub ends_at: Option<DateTime<Utc>>,
}

fn validate_coupon_window(input: &CouponInput) -> Result<(), ValidationError> {
    if let (Some(starts), Some(ends)) = (input.starts_at, input.ends_at) {
        if ends <= starts {
            let mut err = ValidationError::new("window_inverted");
            err.message = Some("Coupon validity end must be after its start".into());
            return Err(err);
        }
    }
    Ok(())
}
