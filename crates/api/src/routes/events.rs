//! Event endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ProducerSession;
use crate::routes::drafts::DraftResponse;
use domain::draft::EventDraft;
use domain::models::EventSummary;
use persistence::repositories::{EventRepository, SubmissionRepository};

/// Response for listing a producer's events.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    pub events: Vec<EventSummary>,
    pub total: usize,
}

/// List the authenticated producer's events.
///
/// GET /api/v1/events
pub async fn list_events(
    State(state): State<AppState>,
    session: ProducerSession,
) -> Result<Json<ListEventsResponse>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let entities = repo.list_by_producer(session.producer_id).await?;

    let events: Vec<EventSummary> = entities.into_iter().map(Into::into).collect();
    let total = events.len();

    Ok(Json(ListEventsResponse { events, total }))
}

/// Full nested configuration of one event (the load path).
///
/// GET /api/v1/events/:event_id
pub async fn get_event(
    State(state): State<AppState>,
    session: ProducerSession,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventDraft>, ApiError> {
    let loaded = load_owned_event(&state, &session, event_id).await?;
    Ok(Json(loaded))
}

/// Open a draft session seeded from a persisted event.
///
/// POST /api/v1/events/:event_id/draft
///
/// Submitting the returned draft replaces the event's rows.
pub async fn open_draft(
    State(state): State<AppState>,
    session: ProducerSession,
    Path(event_id): Path<Uuid>,
) -> Result<(StatusCode, Json<DraftResponse>), ApiError> {
    let draft = load_owned_event(&state, &session, event_id).await?;
    let draft_id = state.drafts.create(session.producer_id, draft.clone()).await;

    info!(
        draft_id = %draft_id,
        event_id = %event_id,
        "Draft opened from persisted event"
    );

    Ok((StatusCode::CREATED, Json(DraftResponse { draft_id, draft })))
}

/// Delete an event and all of its rows.
///
/// DELETE /api/v1/events/:event_id
pub async fn delete_event(
    State(state): State<AppState>,
    session: ProducerSession,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let rows_affected = repo.delete(event_id, session.producer_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }

    info!(event_id = %event_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Loads an event the producer owns and regroups its rows into the nested
/// draft shape. A failed row fetch aborts the whole load.
async fn load_owned_event(
    state: &AppState,
    session: &ProducerSession,
    event_id: Uuid,
) -> Result<EventDraft, ApiError> {
    let repo = SubmissionRepository::new(state.pool.clone());
    let loaded = repo
        .load(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    if loaded.event.producer_id != session.producer_id {
        return Err(ApiError::Forbidden("Event belongs to another producer".into()));
    }

    Ok(EventDraft::from_rows(Some(event_id), loaded.rows))
}
