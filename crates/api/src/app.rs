use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware};
use crate::routes::{drafts, events, health, media};
use crate::services::{DraftStore, MediaStorage};
use shared::jwt::{JwtError, JwtVerifier};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub verifier: Arc<JwtVerifier>,
    pub drafts: DraftStore,
    pub storage: MediaStorage,
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let verifier = JwtVerifier::from_rsa_pem(
        &config.session.public_key,
        config.session.leeway_secs,
    )?;
    let storage = MediaStorage::new(config.storage.clone());
    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);

    let config = Arc::new(config);
    let state = AppState {
        pool,
        config: config.clone(),
        verifier: Arc::new(verifier),
        drafts: DraftStore::new(),
        storage,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Producer routes (authenticated via the session extractor)
    let api_routes = Router::new()
        // Draft sessions (v1)
        .route("/api/v1/drafts", post(drafts::create_draft))
        .route(
            "/api/v1/drafts/:draft_id",
            get(drafts::get_draft).delete(drafts::discard_draft),
        )
        .route(
            "/api/v1/drafts/:draft_id/commands",
            post(drafts::apply_command),
        )
        .route("/api/v1/drafts/:draft_id/submit", post(drafts::submit_draft))
        // Events (v1)
        .route("/api/v1/events", get(events::list_events))
        .route(
            "/api/v1/events/:event_id",
            get(events::get_event).delete(events::delete_event),
        )
        .route("/api/v1/events/:event_id/draft", post(events::open_draft))
        // Media uploads (v1)
        .route("/api/v1/media", post(media::upload_media));

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/metrics", get(metrics_handler))
        .merge(api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state);

    Ok(app)
}
