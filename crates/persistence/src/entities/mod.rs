//! Entity definitions (database row mappings).

pub mod batch;
pub mod coupon;
pub mod coupon_price;
pub mod event;
pub mod product;
pub mod ticket;

pub use batch::BatchEntity;
pub use coupon::CouponEntity;
pub use coupon_price::{CouponProductPriceEntity, CouponTicketPriceEntity};
pub use event::EventEntity;
pub use product::ProductEntity;
pub use ticket::TicketEntity;
