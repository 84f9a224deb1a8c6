use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::models::{HealthResponse, MessageResponse};

/// Liveness message
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = MessageResponse)
    ),
    tag = "Health"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse { message: "Speech Copilot API is running!".to_string() })
}

/// Report whether a model API credential is configured
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health status", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let upstream_api =
        if state.speech_service.is_configured() { "connected" } else { "not configured" };

    Json(HealthResponse { status: "healthy".to_string(), upstream_api: upstream_api.to_string() })
}
