use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A named entity currently present in the chat room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    /// Last heartbeat, Unix epoch milliseconds
    #[schema(example = 1700000000000_i64)]
    pub last_heartbeat: i64,
}

/// Request to join the room
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RegisterParticipantRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[schema(example = "Alice")]
    pub name: String,
}
