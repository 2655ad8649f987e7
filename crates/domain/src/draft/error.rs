//! Draft command errors.

use thiserror::Error;
use uuid::Uuid;

/// Error produced by applying a command to an event draft. The draft is
/// never left half-mutated: a command either applies fully or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Deletion guard: an event must keep at least one sector.
    #[error("An event must keep at least one sector")]
    LastSector,

    /// Deletion guard: a batched sector must keep at least one batch.
    #[error("A sector must keep at least one batch")]
    LastBatch,

    /// Deletion guard: a sector or batch must keep at least one ticket type.
    #[error("A sector or batch must keep at least one ticket type")]
    LastTicketType,

    #[error("Sector not found: {0}")]
    SectorNotFound(Uuid),

    #[error("Batch not found: {0}")]
    BatchNotFound(Uuid),

    #[error("Ticket type not found: {0}")]
    TicketTypeNotFound(Uuid),

    #[error("Coupon not found: {0}")]
    CouponNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// The targeted sector holds flat ticket types, not batches.
    #[error("Sector does not use batches: {0}")]
    SectorNotBatched(Uuid),

    #[error("Discount percent must be between 0 and 100")]
    InvalidPercent,

    /// Per-coupon product prices require the product to accept coupons.
    #[error("Product does not accept coupons: {0}")]
    CouponsNotAccepted(Uuid),
}

impl DraftError {
    /// Whether this is a deletion guard: the command was refused to protect
    /// the draft's shape, and the UI should show a warning rather than an
    /// error.
    pub fn is_guard(&self) -> bool {
        matches!(
            self,
            DraftError::LastSector | DraftError::LastBatch | DraftError::LastTicketType
        )
    }
}
