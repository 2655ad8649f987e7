//! Submission validation.
//!
//! Runs before any row is written; a failed report means no network call is
//! attempted. Cross-coupon code uniqueness is deliberately not checked here:
//! the persistence layer's unique constraint rejects duplicates at insert.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::draft::EventDraft;

/// A single field-level problem found at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

/// Everything wrong with a draft, reported at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.issues.iter().map(|i| i.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationReport {}

impl ValidationReport {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            field: field.into(),
            message: message.into(),
        });
    }
}

/// Validates a draft for submission. Returns `Ok(())` when every invariant
/// holds, or the full list of issues otherwise.
pub(crate) fn validate(draft: &EventDraft) -> Result<(), ValidationReport> {
    let mut report = ValidationReport { issues: Vec::new() };

    if draft.details.name.trim().is_empty() {
        report.push("event.name", "Event name must not be blank");
    }

    if draft.fee_plan.is_none() {
        report.push("feePlan", "A fee plan must be selected");
    }

    if draft.sectors.is_empty() {
        report.push("sectors", "At least one sector is required");
    }

    let mut seen_names: HashSet<String> = HashSet::new();
    for (i, sector) in draft.sectors.iter().enumerate() {
        let trimmed = sector.name.trim();
        if trimmed.is_empty() {
            report.push(format!("sectors[{}].name", i), "Sector name must not be blank");
        } else if !seen_names.insert(trimmed.to_string()) {
            report.push(
                format!("sectors[{}].name", i),
                format!("Duplicate sector name: {}", trimmed),
            );
        }

        if sector.ticket_count() == 0 {
            report.push(
                format!("sectors[{}]", i),
                "Sector must have at least one ticket type",
            );
        }

        for (j, ticket) in sector.ticket_types().iter().enumerate() {
            let field = format!("sectors[{}].ticketTypes[{}]", i, j);
            if ticket.name.trim().is_empty() {
                report.push(format!("{}.name", field), "Ticket name must not be blank");
            }
            match ticket.price {
                None => report.push(format!("{}.price", field), "Ticket price is required"),
                Some(price) if price < Decimal::ZERO => {
                    report.push(format!("{}.price", field), "Ticket price must be non-negative")
                }
                Some(_) => {}
            }
            if let Some(quantity) = ticket.quantity {
                if quantity <= 0 {
                    report.push(
                        format!("{}.quantity", field),
                        "Ticket quantity must be positive when bounded",
                    );
                }
            }
        }
    }

    for (i, coupon) in draft.coupons.iter().enumerate() {
        if coupon.code.trim().is_empty() {
            report.push(
                format!("coupons[{}].code", i),
                "Coupon code must not be blank",
            );
        }
        if let (Some(starts), Some(ends)) = (coupon.starts_at, coupon.ends_at) {
            if ends <= starts {
                report.push(
                    format!("coupons[{}]", i),
                    "Coupon validity end must be after its start",
                );
            }
        }
    }

    for (i, product) in draft.products.iter().enumerate() {
        if product.name.trim().is_empty() {
            report.push(format!("products[{}].name", i), "Product name is required");
        }
        if product.price.is_none() {
            report.push(format!("products[{}].price", i), "Product price is required");
        }
        match product.quantity {
            None => report.push(
                format!("products[{}].quantity", i),
                "Product quantity is required",
            ),
            Some(quantity) if quantity <= 0 => report.push(
                format!("products[{}].quantity", i),
                "Product quantity must be positive",
            ),
            Some(_) => {}
        }
    }

    if report.issues.is_empty() {
        Ok(())
    } else {
        Err(report)
    }
}
