//! Media upload endpoint handlers.

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ProducerSession;
use crate::services::MediaStorage;

/// What the uploaded image is for; decides the failure fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Cover,
    #[default]
    Product,
}

/// Query parameters for media uploads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUploadQuery {
    pub filename: String,
    #[serde(default)]
    pub kind: MediaKind,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

/// Response for media uploads. `url` is null when a product image upload
/// failed; the product row proceeds without an image.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUploadResponse {
    pub url: Option<String>,
}

/// Upload an image through the object storage collaborator.
///
/// POST /api/v1/media?filename=cover.png&kind=cover
///
/// Upload failure is non-fatal: a cover falls back to the placeholder URL,
/// a product image yields a null URL.
pub async fn upload_media(
    State(state): State<AppState>,
    session: ProducerSession,
    Query(query): Query<MediaUploadQuery>,
    body: Bytes,
) -> Result<Json<MediaUploadResponse>, ApiError> {
    if query.filename.trim().is_empty() {
        return Err(ApiError::Validation("filename must not be blank".into()));
    }
    if body.is_empty() {
        return Err(ApiError::Validation("upload body must not be empty".into()));
    }

    let path = MediaStorage::object_path(session.producer_id, &query.filename);
    match state
        .storage
        .upload(&path, &query.content_type, body.to_vec())
        .await
    {
        Ok(url) => {
            info!(path = %path, "Media uploaded");
            Ok(Json(MediaUploadResponse { url: Some(url) }))
        }
        Err(err) => {
            warn!(path = %path, error = %err, "Media upload failed");
            let url = match query.kind {
                MediaKind::Cover => Some(state.storage.placeholder_url()),
                MediaKind::Product => None,
            };
            Ok(Json(MediaUploadResponse { url }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_defaults_to_product() {
        let query: MediaUploadQuery =
            serde_json::from_str(r#"{"filename": "foto.png"}"#).unwrap();
        assert_eq!(query.kind, MediaKind::Product);
        assert_eq!(query.content_type, "application/octet-stream");
    }

    #[test]
    fn test_media_kind_deserialization() {
        let query: MediaUploadQuery =
            serde_json::from_str(r#"{"filename": "capa.png", "kind": "cover"}"#).unwrap();
        assert_eq!(query.kind, MediaKind::Cover);
    }

    #[test]
    fn test_response_serializes_null_url() {
        let json = serde_json::to_string(&MediaUploadResponse { url: None }).unwrap();
        assert_eq!(json, "{\"url\":null}");
    }
}
