//! The draft command set.
//!
//! Every producer-facing builder operation is a `DraftCommand` applied to an
//! `EventDraft`. Row edits carry the full editable row (the editor pushes
//! the whole row on every change), so updates replace rather than merge.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::models::batch::BatchInput;
use crate::models::coupon::CouponInput;
use crate::models::product::ProductInput;
use crate::models::sector::SectorInput;
use crate::models::ticket_type::TicketTypeInput;
use crate::models::{EventDetails, FeePlan};

/// A single mutation of an event draft.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DraftCommand {
    // Event metadata and fees
    #[serde(rename_all = "camelCase")]
    UpdateDetails { details: EventDetails },
    #[serde(rename_all = "camelCase")]
    SelectFeePlan { fee_plan: FeePlan },

    // Sector builder
    AddSector,
    #[serde(rename_all = "camelCase")]
    UpdateSector { sector_id: Uuid, sector: SectorInput },
    #[serde(rename_all = "camelCase")]
    RemoveSector { sector_id: Uuid },
    #[serde(rename_all = "camelCase")]
    ToggleBatches { sector_id: Uuid },
    #[serde(rename_all = "camelCase")]
    AddBatch { sector_id: Uuid },
    #[serde(rename_all = "camelCase")]
    UpdateBatch {
        sector_id: Uuid,
        batch_id: Uuid,
        batch: BatchInput,
    },
    #[serde(rename_all = "camelCase")]
    RemoveBatch { sector_id: Uuid, batch_id: Uuid },
    #[serde(rename_all = "camelCase")]
    AddTicketType {
        sector_id: Uuid,
        #[serde(default)]
        batch_id: Option<Uuid>,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTicketType {
        sector_id: Uuid,
        #[serde(default)]
        batch_id: Option<Uuid>,
        ticket_type_id: Uuid,
        ticket_type: TicketTypeInput,
    },
    #[serde(rename_all = "camelCase")]
    RemoveTicketType {
        sector_id: Uuid,
        #[serde(default)]
        batch_id: Option<Uuid>,
        ticket_type_id: Uuid,
    },

    // Coupon builder
    #[serde(rename_all = "camelCase")]
    AddCoupon {
        #[serde(default)]
        copy_from: Option<Uuid>,
    },
    #[serde(rename_all = "camelCase")]
    UpdateCoupon { coupon_id: Uuid, coupon: CouponInput },
    #[serde(rename_all = "camelCase")]
    RemoveCoupon { coupon_id: Uuid },
    #[serde(rename_all = "camelCase")]
    ApplyPercentDiscount { coupon_id: Uuid, percent: Decimal },
    #[serde(rename_all = "camelCase")]
    SetOverridePrice {
        coupon_id: Uuid,
        ticket_type_id: Uuid,
        price: Decimal,
    },

    // Product builder
    AddProduct,
    #[serde(rename_all = "camelCase")]
    UpdateProduct { product_id: Uuid, product: ProductInput },
    #[serde(rename_all = "camelCase")]
    RemoveProduct { product_id: Uuid },
    #[serde(rename_all = "camelCase")]
    SetAcceptsCoupons { product_id: Uuid, accepts: bool },
    #[serde(rename_all = "camelCase")]
    SetProductCouponPrice {
        product_id: Uuid,
        coupon_id: Uuid,
        price: Decimal,
    },
}

impl Validate for DraftCommand {
    /// Validates the row payload carried by the command, if any. Structural
    /// rules (guards, id lookups, percent range) live in `EventDraft::apply`.
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            DraftCommand::UpdateDetails { details } => details.validate(),
            DraftCommand::SelectFeePlan { fee_plan } => fee_plan.validate(),
            DraftCommand::UpdateSector { sector, .. } => sector.validate(),
            DraftCommand::UpdateBatch { batch, .. } => batch.validate(),
            DraftCommand::UpdateTicketType { ticket_type, .. } => ticket_type.validate(),
            DraftCommand::UpdateCoupon { coupon, .. } => coupon.validate(),
            DraftCommand::UpdateProduct { product, .. } => product.validate(),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_unit_command_deserialization() {
        let command: DraftCommand = serde_json::from_str(r#"{"type": "addSector"}"#).unwrap();
        assert!(matches!(command, DraftCommand::AddSector));

        let command: DraftCommand = serde_json::from_str(r#"{"type": "addProduct"}"#).unwrap();
        assert!(matches!(command, DraftCommand::AddProduct));
    }

    #[test]
    fn test_add_coupon_copy_from_defaults_to_none() {
        let command: DraftCommand = serde_json::from_str(r#"{"type": "addCoupon"}"#).unwrap();
        assert!(matches!(command, DraftCommand::AddCoupon { copy_from: None }));
    }

    #[test]
    fn test_update_ticket_type_deserialization() {
        let sector_id = Uuid::new_v4();
        let ticket_type_id = Uuid::new_v4();
        let json = format!(
            r#"{{
                "type": "updateTicketType",
                "sectorId": "{}",
                "ticketTypeId": "{}",
                "ticketType": {{"name": "Inteira", "price": "100.00", "quantity": 50}}
            }}"#,
            sector_id, ticket_type_id
        );

        let command: DraftCommand = serde_json::from_str(&json).unwrap();
        match command {
            DraftCommand::UpdateTicketType {
                sector_id: s,
                batch_id,
                ticket_type_id: t,
                ticket_type,
            } => {
                assert_eq!(s, sector_id);
                assert!(batch_id.is_none());
                assert_eq!(t, ticket_type_id);
                assert_eq!(ticket_type.name, "Inteira");
                assert_eq!(ticket_type.price, Some(Decimal::from_str("100.00").unwrap()));
                assert_eq!(ticket_type.quantity, Some(50));
            }
            other => panic!("Expected UpdateTicketType, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_percent_discount_deserialization() {
        let coupon_id = Uuid::new_v4();
        let json = format!(
            r#"{{"type": "applyPercentDiscount", "couponId": "{}", "percent": 20}}"#,
            coupon_id
        );
        let command: DraftCommand = serde_json::from_str(&json).unwrap();
        match command {
            DraftCommand::ApplyPercentDiscount { coupon_id: c, percent } => {
                assert_eq!(c, coupon_id);
                assert_eq!(percent, Decimal::from_str("20").unwrap());
            }
            other => panic!("Expected ApplyPercentDiscount, got {:?}", other),
        }
    }

    #[test]
    fn test_command_validation_delegates_to_row_payload() {
        let command = DraftCommand::UpdateCoupon {
            coupon_id: Uuid::new_v4(),
            coupon: CouponInput {
                code: " ".to_string(),
                description: None,
                max_uses: None,
                starts_at: None,
                ends_at: None,
            },
        };
        assert!(command.validate().is_err());

        assert!(DraftCommand::AddSector.validate().is_ok());
    }
}
