//! Diagnostic endpoints for checking the model API by hand.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::AppState;
use crate::models::{MultilingualTestResponse, UpstreamTestResponse};
use crate::utils::{ApiError, ApiResult};

/// Send a trivial message to the model API
#[utoipa::path(
    get,
    path = "/api/test-upstream",
    responses(
        (status = 200, description = "Raw model reply", body = UpstreamTestResponse),
        (status = 500, description = "Upstream call failed", body = crate::utils::ApiErrorResponse)
    ),
    tag = "Diagnostics"
)]
pub async fn test_upstream(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UpstreamTestResponse>> {
    let upstream_response =
        state.speech_service.test_upstream().await.map_err(ApiError::upstream_test_failed)?;
    Ok(Json(UpstreamTestResponse { upstream_response }))
}

/// Send a canned prompt with the given language's instruction block
#[utoipa::path(
    get,
    path = "/api/test-multilingual/{language}",
    params(("language" = String, Path, description = "english, dutch or french; anything else is treated as english")),
    responses(
        (status = 200, description = "Model reply and the prompt used", body = MultilingualTestResponse),
        (status = 500, description = "Upstream call failed", body = crate::utils::ApiErrorResponse)
    ),
    tag = "Diagnostics"
)]
pub async fn test_multilingual(
    State(state): State<Arc<AppState>>,
    Path(language): Path<String>,
) -> ApiResult<Json<MultilingualTestResponse>> {
    let response = state
        .speech_service
        .test_multilingual(&language)
        .await
        .map_err(ApiError::multilingual_test_failed)?;
    Ok(Json(response))
}
