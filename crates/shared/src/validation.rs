//! Common validation utilities.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Maximum length of a coupon code.
const MAX_COUPON_CODE_LENGTH: usize = 32;

/// Validates that a price is non-negative.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price >= Decimal::ZERO {
        Ok(())
    } else {
        let mut err = ValidationError::new("price_negative");
        err.message = Some("Price must be non-negative".into());
        Err(err)
    }
}

/// Validates that a percentage is within 0 to 100.
pub fn validate_percent(percent: &Decimal) -> Result<(), ValidationError> {
    if (Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(percent) {
        Ok(())
    } else {
        let mut err = ValidationError::new("percent_range");
        err.message = Some("Percent must be between 0 and 100".into());
        Err(err)
    }
}

/// Validates that a quantity is positive. Quantities are optional in draft
/// rows; when bounded they must be at least 1.
pub fn validate_quantity(quantity: i32) -> Result<(), ValidationError> {
    if quantity > 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("quantity_range");
        err.message = Some("Quantity must be positive".into());
        Err(err)
    }
}

/// Validates that a sector capacity is positive.
pub fn validate_capacity(capacity: i32) -> Result<(), ValidationError> {
    if capacity > 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("capacity_range");
        err.message = Some("Capacity must be positive".into());
        Err(err)
    }
}

/// Validates a coupon code: non-blank after trimming, at most 32 characters,
/// letters, digits, and dashes only. Codes are case-normalized to uppercase
/// by the coupon builder; validation accepts either case.
pub fn validate_coupon_code(code: &str) -> Result<(), ValidationError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("code_blank");
        err.message = Some("Coupon code must not be blank".into());
        return Err(err);
    }
    if trimmed.len() > MAX_COUPON_CODE_LENGTH {
        let mut err = ValidationError::new("code_too_long");
        err.message = Some("Coupon code must be at most 32 characters".into());
        return Err(err);
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        let mut err = ValidationError::new("code_charset");
        err.message = Some("Coupon code may contain only letters, digits, and dashes".into());
        return Err(err);
    }
    Ok(())
}
