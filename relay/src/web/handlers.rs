//! Producer endpoint handlers.
//!
//! `produce_message` does one thing: hand the fixed payload to the sender
//! and report whether the broker took it.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::{error, info};

use crate::queue::{MessageSender, TextMessage, HELLO_WORLD};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sender: Arc<dyn MessageSender>,
}

impl AppState {
    pub fn new(config: Config, sender: Arc<dyn MessageSender>) -> Self {
        Self {
            config: Arc::new(config),
            sender,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Produce Message
// =============================================================================

/// `GET /api/v1/produce-message`
///
/// Publishes [`HELLO_WORLD`] to the configured queue. Answers 202 with an
/// empty body once the broker accepted it, 500 with an empty body otherwise.
pub async fn produce_message(State(state): State<AppState>) -> StatusCode {
    let queue = state.config.queue_name.as_str();
    let message = TextMessage::new(HELLO_WORLD);

    if let Err(e) = state.sender.send(queue, &message).await {
        error!(queue = %queue, error = %format!("{:#}", e), "produce_message_failed");
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    info!(queue = %queue, "produce_message_enqueued");

    StatusCode::ACCEPTED
}
