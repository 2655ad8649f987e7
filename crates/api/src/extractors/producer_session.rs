//! Producer session extractor.
//!
//! Validates the Bearer token in the Authorization header against the auth
//! service's public key and exposes the producer's stable user id, the
//! owning foreign key on every row this API writes.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// The authenticated producer for the current request.
#[derive(Debug, Clone)]
pub struct ProducerSession {
    /// Producer user ID from the token's subject claim.
    pub producer_id: Uuid,
    /// JWT ID (jti) for session tracking.
    pub jti: String,
}

#[async_trait]
impl FromRequestParts<AppState> for ProducerSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let claims = state
            .verifier
            .verify(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        let producer_id = shared::jwt::producer_id(&claims)
            .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;

        Ok(Self {
            producer_id,
            jti: claims.jti,
        })
    }
}
