//! Fee plan domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The service-fee split chosen for an event: how much the buyer pays on top
/// of the face price, and how much of the fee the producer absorbs.
/// Exactly one plan must be selected before submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeePlan {
    #[validate(custom(function = "shared::validation::validate_percent"))]
    pub buyer_fee_percent: Decimal,

    #[validate(custom(function = "shared::validation::validate_percent"))]
    pub producer_absorbs_percent: Decimal,
}
