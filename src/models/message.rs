use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Reserved recipient meaning "everyone in the room"
pub const BROADCAST_TARGET: &str = "Todos";

/// Status text appended when a participant joins
pub const JOIN_NOTICE: &str = "entra na sala...";

/// Status text appended when a participant is evicted
pub const LEAVE_NOTICE: &str = "sai da sala...";

/// Kind of chat message
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    /// Public message, visible to every reader
    #[default]
    Message,
    /// Visible only to sender and recipient
    PrivateMessage,
    /// System generated join/leave notice
    Status,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A chat message as stored in the log and returned to readers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Wall clock time, `HH:MM:SS`
    #[schema(example = "13:37:00")]
    pub time: String,
}

impl Message {
    /// Status notice broadcast to the room on behalf of `from`
    pub fn status(from: impl Into<String>, text: &str, time: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: BROADCAST_TARGET.to_string(),
            text: text.to_string(),
            kind: MessageKind::Status,
            time: time.into(),
        }
    }

    pub fn join_notice(from: impl Into<String>, time: impl Into<String>) -> Self {
        Self::status(from, JOIN_NOTICE, time)
    }

    pub fn leave_notice(from: impl Into<String>, time: impl Into<String>) -> Self {
        Self::status(from, LEAVE_NOTICE, time)
    }
}

/// Format a timestamp the way messages display it
pub fn clock_time(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Request to post a message to the room
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_postable_kind"))]
pub struct PostMessageRequest {
    #[validate(length(min = 1, message = "recipient must not be empty"))]
    #[schema(example = "Todos")]
    pub to: String,

    #[validate(length(min = 1, message = "text must not be empty"))]
    #[schema(example = "Hello everyone")]
    pub text: String,

    /// `message` or `private_message`; defaults to `message`
    #[serde(rename = "type", default, deserialize_with = "present_kind")]
    pub kind: Option<MessageKind>,
}

/// An omitted `type` falls back to the default, but an explicit `null` is not a kind
fn present_kind<'de, D>(deserializer: D) -> Result<Option<MessageKind>, D::Error>
where
    D: Deserializer<'de>,
{
    MessageKind::deserialize(deserializer).map(Some)
}

impl PostMessageRequest {
    pub fn into_message(self, from: String, time: String) -> Message {
        Message {
            from,
            to: self.to,
            text: self.text,
            kind: self.kind.unwrap_or_default(),
            time,
        }
    }
}

/// Status notices are reserved for the server
fn validate_postable_kind(req: &PostMessageRequest) -> Result<(), ValidationError> {
    match req.kind {
        Some(MessageKind::Status) => {
            let mut err = ValidationError::new("type");
            err.message = Some("type must be message or private_message".into());
            Err(err)
        }
        _ => Ok(()),
    }
}
