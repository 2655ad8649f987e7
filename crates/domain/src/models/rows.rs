//! Normalized row shapes exchanged with the persistence layer.
//!
//! Flattening an event draft produces these row sets; loading an event
//! fetches them back and regroups them into the nested draft structure.
//! Ticket rows denormalize their sector onto each row (sector name and
//! capacity travel with the ticket); batches and products get their own
//! rows; coupon override prices become join rows keyed by stable ids.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ProductCategory;

/// The event row itself: metadata plus the selected fee plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub name: String,
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub cover_image_url: Option<String>,
    pub buyer_fee_percent: Decimal,
    pub producer_absorbs_percent: Decimal,
}

/// One row per batch; tickets reference it by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    pub id: Uuid,
    pub name: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub position: i32,
}

/// One row per ticket type, carrying its sector denormalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRow {
    pub id: Uuid,
    pub sector_name: String,
    pub sector_capacity: Option<i32>,
    pub batch_id: Option<Uuid>,
    pub name: String,
    pub price: Decimal,
    pub quantity: Option<i32>,
    pub position: i32,
}

/// One row per coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponRow {
    pub id: Uuid,
    pub code: String,
    pub description: Option<String>,
    pub max_uses: Option<i32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub position: i32,
}

/// Join row linking a coupon to a ticket type's override price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponTicketPriceRow {
    pub coupon_id: Uuid,
    pub ticket_id: Uuid,
    pub price: Decimal,
}

/// One row per add-on product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub size: Option<String>,
    pub category: ProductCategory,
    pub image_url: Option<String>,
    pub accepts_coupons: bool,
    pub position: i32,
}

/// Join row linking a coupon to a product's override price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponProductPriceRow {
    pub coupon_id: Uuid,
    pub product_id: Uuid,
    pub price: Decimal,
}

/// Every row set an event decomposes into; the unit the persistence layer
/// writes in one transaction and reads back for the load path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FlattenedEvent {
    pub event: EventRow,
    pub batches: Vec<BatchRow>,
    pub tickets: Vec<TicketRow>,
    pub coupons: Vec<CouponRow>,
    pub coupon_ticket_prices: Vec<CouponTicketPriceRow>,
    pub products: Vec<ProductRow>,
    pub coupon_product_prices: Vec<CouponProductPriceRow>,
}

impl Default for EventRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            starts_at: None,
            venue: None,
            cover_image_url: None,
            buyer_fee_percent: Decimal::ZERO,
            producer_absorbs_percent: Decimal::ZERO,
        }
    }
}
