//! Coupon override price join entities (database row mappings).

use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::rows::{CouponProductPriceRow, CouponTicketPriceRow};

/// Database row mapping for the coupon_ticket_prices join table.
#[derive(Debug, Clone, FromRow)]
pub struct CouponTicketPriceEntity {
    pub coupon_id: Uuid,
    pub ticket_id: Uuid,
    pub price: Decimal,
}

impl From<CouponTicketPriceEntity> for CouponTicketPriceRow {
    fn from(entity: CouponTicketPriceEntity) -> Self {
        Self {
            coupon_id: entity.coupon_id,
            ticket_id: entity.ticket_id,
            price: entity.price,
        }
    }
}

/// Database row mapping for the coupon_product_prices join table.
#[derive(Debug, Clone, FromRow)]
pub struct CouponProductPriceEntity {
    pub coupon_id: Uuid,
    pub product_id: Uuid,
    pub price: Decimal,
}

impl From<CouponProductPriceEntity> for CouponProductPriceRow {
    fn from(entity: CouponProductPriceEntity) -> Self {
        Self {
            coupon_id: entity.coupon_id,
            product_id: entity.product_id,
            price: entity.price,
        }
    }
}
