use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// API Error returned by every handler.
///
/// Upstream failures are not classified for the caller: network, auth,
/// quota and malformed replies all surface as a 500 with the underlying
/// error text.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Speech generation failed: {0}")]
    GenerationFailed(String),

    #[error("Upstream API test failed: {0}")]
    UpstreamTestFailed(String),

    #[error("Multilingual test failed: {0}")]
    MultilingualTestFailed(String),
}

impl ApiError {
    pub fn generation_failed(err: impl std::fmt::Display) -> Self {
        Self::GenerationFailed(err.to_string())
    }

    pub fn upstream_test_failed(err: impl std::fmt::Display) -> Self {
        Self::UpstreamTestFailed(err.to_string())
    }

    pub fn multilingual_test_failed(err: impl std::fmt::Display) -> Self {
        Self::MultilingualTestFailed(err.to_string())
    }

    pub fn error_code(&self) -> i32 {
        match self {
            Self::GenerationFailed(_) => 5001,
            Self::UpstreamTestFailed(_) => 5002,
            Self::MultilingualTestFailed(_) => 5003,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Error body. `detail` carries the same text as `message` for clients
/// that read FastAPI-style errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        tracing::error!("Request failed with {}: {}", status.as_u16(), message);

        let response =
            ApiErrorResponse { code: self.error_code(), message: message.clone(), detail: message };

        (status, Json(response)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
