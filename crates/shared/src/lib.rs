//! Shared utilities and common types for the Ingresso backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Price arithmetic (rounding, percent discounts)
//! - Common validation logic
//! - Session token (JWT) verification

pub mod jwt;
pub mod money;
pub mod validation;
