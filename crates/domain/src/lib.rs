//! Domain layer for the Ingresso backend.
//!
//! This crate contains:
//! - The event ticket configuration models (sectors, batches, ticket types,
//!   coupons, products, fee plans)
//! - The draft aggregate and its command set (the producer-facing builders)
//! - Submission validation and the flatten/unflatten persistence boundary

pub mod draft;
pub mod models;
