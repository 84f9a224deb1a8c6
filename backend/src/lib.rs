//! Speech Copilot backend
//!
//! HTTP service that turns structured speech parameters into a prompt,
//! forwards it to the Anthropic Messages API and returns the generated text.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{Config, CorsConfig};
use crate::models::{
    HealthResponse, MessageResponse, MultilingualTestResponse, SpeechRequest, SpeechResponse,
    SpeechStructure, UpstreamTestResponse,
};
use crate::services::SpeechService;
use crate::services::llm::LLMClient;
use crate::utils::ApiErrorResponse;

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub speech_service: SpeechService,
}

impl AppState {
    pub fn new(config: Config, llm_client: Arc<dyn LLMClient>) -> Self {
        let speech_service = SpeechService::new(llm_client, &config.llm);
        Self { config, speech_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::root,
        handlers::health::health_check,
        handlers::speech::generate_speech,
        handlers::diagnostics::test_upstream,
        handlers::diagnostics::test_multilingual,
    ),
    components(schemas(
        SpeechRequest,
        SpeechResponse,
        SpeechStructure,
        MessageResponse,
        HealthResponse,
        UpstreamTestResponse,
        MultilingualTestResponse,
        ApiErrorResponse,
    )),
    tags(
        (name = "Speech", description = "AI-powered speech generation"),
        (name = "Health", description = "Liveness and configuration status"),
        (name = "Diagnostics", description = "Manual checks against the model API"),
    ),
    info(title = "Speech Copilot API", description = "AI-powered speech generation")
)]
pub struct ApiDoc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/api/generate-speech", post(handlers::speech::generate_speech))
        .route("/api/test-upstream", get(handlers::diagnostics::test_upstream))
        .route("/api/test-multilingual/:language", get(handlers::diagnostics::test_multilingual))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Credentials are allowed, so methods and headers are mirrored instead of
/// using wildcards.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) if value == "*" => {
                tracing::warn!("Ignoring wildcard CORS origin; credentials require explicit origins");
                None
            },
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
