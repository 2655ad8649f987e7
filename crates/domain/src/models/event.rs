//! Event metadata domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Producer-editable event metadata. All fields stay optional or blank while
/// the draft is being edited; submission requires a non-blank name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[validate(length(max = 150, message = "Event name must be at most 150 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,

    #[validate(length(max = 150, message = "Venue must be at most 150 characters"))]
    pub venue: Option<String>,

    #[validate(length(max = 500, message = "Cover image URL must be at most 500 characters"))]
    pub cover_image_url: Option<String>,
}

/// Listing row for a producer's events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: Uuid,
    pub name: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub cover_image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}
