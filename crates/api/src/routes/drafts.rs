//! Draft session endpoint handlers.
//!
//! The draft routes are the builder surface: every mutation is a command
//! POSTed against the draft, and every response carries the full updated
//! tree, so the client always renders the aggregate's latest state.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ProducerSession;
use crate::middleware::metrics::{record_draft_command, record_event_submitted};
use domain::draft::{DraftCommand, EventDraft};
use persistence::repositories::SubmissionRepository;

/// A draft session and its current tree.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub draft_id: Uuid,
    pub draft: EventDraft,
}

/// Response for a submitted draft.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub event_id: Uuid,
}

/// Open a new, empty draft.
///
/// POST /api/v1/drafts
pub async fn create_draft(
    State(state): State<AppState>,
    session: ProducerSession,
) -> (StatusCode, Json<DraftResponse>) {
    let draft = EventDraft::new();
    let draft_id = state.drafts.create(session.producer_id, draft.clone()).await;

    info!(draft_id = %draft_id, producer_id = %session.producer_id, "Draft opened");

    (StatusCode::CREATED, Json(DraftResponse { draft_id, draft }))
}

/// Current snapshot of a draft.
///
/// GET /api/v1/drafts/:draft_id
pub async fn get_draft(
    State(state): State<AppState>,
    session: ProducerSession,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<DraftResponse>, ApiError> {
    let draft = state.drafts.snapshot(draft_id, session.producer_id).await?;
    Ok(Json(DraftResponse { draft_id, draft }))
}

/// Apply one builder command to a draft.
///
/// POST /api/v1/drafts/:draft_id/commands
///
/// Responds with the full updated tree. Deletion guards come back as 409
/// with a warning message and leave the draft untouched.
pub async fn apply_command(
    State(state): State<AppState>,
    session: ProducerSession,
    Path(draft_id): Path<Uuid>,
    Json(command): Json<DraftCommand>,
) -> Result<Json<DraftResponse>, ApiError> {
    command.validate()?;
    record_draft_command(command_label(&command));

    let applied = state
        .drafts
        .with_draft(draft_id, session.producer_id, |draft| {
            draft.apply(command).map(|_| draft.clone())
        })
        .await?;
    let draft = applied?;

    Ok(Json(DraftResponse { draft_id, draft }))
}

/// Validate, flatten, and persist a draft in one transaction.
///
/// POST /api/v1/drafts/:draft_id/submit
///
/// A validation failure means nothing was written; a successful submit
/// closes the draft session and returns the event id.
pub async fn submit_draft(
    State(state): State<AppState>,
    session: ProducerSession,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let draft = state.drafts.snapshot(draft_id, session.producer_id).await?;
    let rows = draft.flatten()?;

    let repo = SubmissionRepository::new(state.pool.clone());
    let event_id = repo
        .submit(session.producer_id, draft.event_id, &rows)
        .await?;

    state.drafts.remove(draft_id, session.producer_id).await?;
    record_event_submitted();

    info!(
        draft_id = %draft_id,
        event_id = %event_id,
        producer_id = %session.producer_id,
        "Draft submitted"
    );

    Ok(Json(SubmitResponse { event_id }))
}

/// Discard a draft without submitting it.
///
/// DELETE /api/v1/drafts/:draft_id
pub async fn discard_draft(
    State(state): State<AppState>,
    session: ProducerSession,
    Path(draft_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.drafts.remove(draft_id, session.producer_id).await?;
    info!(draft_id = %draft_id, "Draft discarded");
    Ok(StatusCode::NO_CONTENT)
}

/// Static label for the command metrics counter.
fn command_label(command: &DraftCommand) -> &'static str {
    match command {
        DraftCommand::UpdateDetails { .. } => "update_details",
        DraftCommand::SelectFeePlan { .. } => "select_fee_plan",
        DraftCommand::AddSector => "add_sector",
        DraftCommand::UpdateSector { .. } => "update_sector",
        DraftCommand::RemoveSector { .. } => "remove_sector",
        DraftCommand::ToggleBatches { .. } => "toggle_batches",
        DraftCommand::AddBatch { .. } => "add_batch",
        DraftCommand::UpdateBatch { .. } => "update_batch",
        DraftCommand::RemoveBatch { .. } => "remove_batch",
        DraftCommand::AddTicketType { .. } => "add_ticket_type",
        DraftCommand::UpdateTicketType { .. } => "update_ticket_type",
        DraftCommand::RemoveTicketType { .. } => "remove_ticket_type",
        DraftCommand::AddCoupon { .. } => "add_coupon",
        DraftCommand::UpdateCoupon { .. } => "update_coupon",
        DraftCommand::RemoveCoupon { .. } => "remove_coupon",
        DraftCommand::ApplyPercentDiscount { .. } => "apply_percent_discount",
        DraftCommand::SetOverridePrice { .. } => "set_override_price",
        DraftCommand::AddProduct => "add_product",
        DraftCommand::UpdateProduct { .. } => "update_product",
        DraftCommand::RemoveProduct { .. } => "remove_product",
        DraftCommand::SetAcceptsCoupons { .. } => "set_accepts_coupons",
        DraftCommand::SetProductCouponPrice { .. } => "set_product_coupon_price",
    }
}
