//! Coupon entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::rows::CouponRow;

/// Database row mapping for the coupons table.
#[derive(Debug, Clone, FromRow)]
pub struct CouponEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub code: String,
    pub description: Option<String>,
    pub max_uses: Option<i32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub position: i32,
}

impl From<CouponEntity> for CouponRow {
    fn from(entity: CouponEntity) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            description: entity.description,
            max_uses: entity.max_uses,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            position: entity.position,
        }
    }
}
