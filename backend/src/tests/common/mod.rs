// Common test utilities and helpers

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::services::llm::{Completion, CompletionRequest, LLMClient, LLMError};
use crate::{AppState, build_router};

/// Scripted stand-in for the model API. Records every request it receives.
pub struct FakeLLMClient {
    reply: Result<String, String>,
    configured: bool,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeLLMClient {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(text.to_string()), configured: true, requests: Mutex::default() })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(reason.to_string()),
            configured: true,
            requests: Mutex::default(),
        })
    }

    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            reply: Err("unused".to_string()),
            configured: false,
            requests: Mutex::default(),
        })
    }

    pub fn recorded(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for FakeLLMClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, LLMError> {
        self.requests.lock().unwrap().push(request);
        if !self.configured {
            return Err(LLMError::NoProviderConfigured);
        }
        match &self.reply {
            Ok(text) => Ok(Completion::from_text(text.clone())),
            Err(reason) => Err(LLMError::ApiError(reason.clone())),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Router wired to the given fake with default config.
pub fn test_app(client: Arc<FakeLLMClient>) -> Router {
    test_app_with_config(Config::default(), client)
}

pub fn test_app_with_config(config: Config, client: Arc<FakeLLMClient>) -> Router {
    let state = Arc::new(AppState::new(config, client));
    build_router(state)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request")
}
