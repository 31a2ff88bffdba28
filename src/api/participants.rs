use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::api::extract::ValidatedJson;
use crate::api::{now_clock, now_millis, AppState};
use crate::error::{AppError, AppResult};
use crate::models::{Participant, RegisterParticipantRequest};

/// Join the chat room
#[utoipa::path(
    post,
    path = "/participants",
    tag = "participants",
    request_body = RegisterParticipantRequest,
    responses(
        (status = 201, description = "Participant registered"),
        (status = 409, description = "Name already in use"),
        (status = 422, description = "Missing or invalid name"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterParticipantRequest>,
) -> AppResult<StatusCode> {
    let registered = state
        .db
        .register_participant(&req.name, now_millis(), &now_clock())
        .await?;

    if !registered {
        return Err(AppError::Conflict(format!("Name already in use: {}", req.name)));
    }

    info!("Participant joined: {}", req.name);
    Ok(StatusCode::CREATED)
}

/// List participants currently in the room
#[utoipa::path(
    get,
    path = "/participants",
    tag = "participants",
    responses(
        (status = 200, description = "Current participants", body = Vec<Participant>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Participant>>> {
    let participants = state.db.list_participants().await?;
    Ok(Json(participants))
}
