use axum::{extract::State, http::StatusCode};

use crate::api::extract::User;
use crate::api::{now_millis, AppState};
use crate::error::{AppError, AppResult};

/// Record a liveness heartbeat for the `user` header
#[utoipa::path(
    post,
    path = "/status",
    tag = "participants",
    params(
        ("user" = String, Header, description = "Participant name")
    ),
    responses(
        (status = 200, description = "Heartbeat recorded"),
        (status = 404, description = "Participant not in the room"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn heartbeat(State(state): State<AppState>, User(name): User) -> AppResult<StatusCode> {
    let name = name.ok_or_else(|| AppError::NotFound("missing user header".to_string()))?;

    if !state.db.touch_participant(&name, now_millis()).await? {
        return Err(AppError::NotFound(format!("Participant not found: {}", name)));
    }

    Ok(StatusCode::OK)
}
