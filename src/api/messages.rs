use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extract::{User, ValidatedJson};
use crate::api::{now_clock, AppState};
use crate::error::{AppError, AppResult};
use crate::models::{Message, PostMessageRequest};
use crate::visibility;

/// Query parameters for reading messages
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMessagesQuery {
    /// Return only the newest `limit` visible messages. Values that are not
    /// positive integers are ignored.
    pub limit: Option<String>,
}

/// Post a message on behalf of the `user` header
#[utoipa::path(
    post,
    path = "/messages",
    tag = "messages",
    params(
        ("user" = String, Header, description = "Sender name")
    ),
    request_body = PostMessageRequest,
    responses(
        (status = 201, description = "Message stored"),
        (status = 422, description = "Invalid body or unregistered sender"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn post(
    State(state): State<AppState>,
    User(sender): User,
    body: Result<ValidatedJson<PostMessageRequest>, AppError>,
) -> AppResult<StatusCode> {
    // an unknown sender is reported even when the body is also invalid
    let sender = match sender {
        Some(name) => name,
        None => return Err(AppError::UnprocessableSender("missing user header".to_string())),
    };
    if state.db.get_participant(&sender).await?.is_none() {
        return Err(AppError::UnprocessableSender(sender));
    }

    let ValidatedJson(req) = body?;
    let message = req.into_message(sender, now_clock());
    state.db.append_message(&message).await?;

    Ok(StatusCode::CREATED)
}

/// Read the messages visible to the `user` header
#[utoipa::path(
    get,
    path = "/messages",
    tag = "messages",
    params(
        ("user" = Option<String>, Header, description = "Reader name"),
        ListMessagesQuery
    ),
    responses(
        (status = 200, description = "Visible messages, oldest first", body = Vec<Message>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    User(reader): User,
    Query(query): Query<ListMessagesQuery>,
) -> AppResult<Json<Vec<Message>>> {
    let messages = state.db.list_messages().await?;
    let limit = visibility::parse_limit(query.limit.as_deref());
    let visible = visibility::list_for(messages, reader.as_deref().unwrap_or_default(), limit);

    Ok(Json(visible))
}
