use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::models::{SpeechRequest, SpeechResponse};
use crate::utils::{ApiError, ApiResult};

/// Generate a speech from the given parameters
#[utoipa::path(
    post,
    path = "/api/generate-speech",
    request_body = SpeechRequest,
    responses(
        (status = 200, description = "Generated speech", body = SpeechResponse),
        (status = 422, description = "Missing or mistyped request fields"),
        (status = 500, description = "Speech generation failed", body = crate::utils::ApiErrorResponse)
    ),
    tag = "Speech"
)]
pub async fn generate_speech(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SpeechRequest>,
) -> ApiResult<Json<SpeechResponse>> {
    let response =
        state.speech_service.generate(&request).await.map_err(ApiError::generation_failed)?;
    Ok(Json(response))
}
