//! OpenAPI documentation for the chat room API

use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chatroom API",
        version = "1.0.0",
        description = "Polling chat room backend.\n\n## Features\n- Join the room with a display name\n- Post public, targeted or private messages\n- Keep presence alive with heartbeats\n- Inactive participants are evicted automatically",
        license(name = "MIT"),
        contact(name = "Chatroom Team")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    tags(
        (name = "participants", description = "Room membership and heartbeats"),
        (name = "messages", description = "Posting and reading messages"),
        (name = "health", description = "Service health")
    ),
    paths(
        crate::api::participants::register,
        crate::api::participants::list,
        crate::api::messages::post,
        crate::api::messages::list,
        crate::api::status::heartbeat,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::Participant,
            crate::models::RegisterParticipantRequest,
            crate::models::Message,
            crate::models::MessageKind,
            crate::models::PostMessageRequest,
            crate::api::health::HealthResponse,
        )
    )
)]
pub struct ApiDoc;
