//! LLM Client
//!
//! `LLMClient` is the seam between the service layer and the model provider.
//! `AnthropicClient` talks to the Anthropic Messages API; tests plug in fakes.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

use super::models::{
    Completion, CompletionRequest, ErrorResponse, LLMError, MessagesRequest, MessagesResponse,
    WireMessage,
};
use crate::config::LlmConfig;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
const MESSAGES_PATH: &str = "v1/messages";

#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Send one user message and return the first text segment of the reply.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, LLMError>;

    /// Whether a credential is available. No network call is made.
    fn is_configured(&self) -> bool;
}

pub struct AnthropicClient {
    http_client: Client,
    api_base: String,
    api_key: Option<String>,
    api_version: String,
}

impl AnthropicClient {
    pub fn new(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_base: api_base.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_version: ANTHROPIC_VERSION.to_string(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LLMError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| LLMError::ApiError(format!("Failed to build HTTP client: {}", e)))?;

        let mut client = Self::new(config.api_base.clone(), config.api_key.clone());
        client.http_client = http_client;
        Ok(client)
    }

    fn messages_url(&self) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), MESSAGES_PATH)
    }

    fn map_error_status(status: StatusCode, body: &str) -> LLMError {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| match e.error.kind {
                Some(kind) => format!("{} ({}): {}", status, kind, e.error.message),
                None => format!("{}: {}", status, e.error.message),
            })
            .unwrap_or_else(|_| format!("{}: {}", status, body));

        match status {
            StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimited(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => LLMError::Timeout(message),
            _ => LLMError::ApiError(message),
        }
    }
}

#[async_trait]
impl LLMClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, LLMError> {
        let api_key = self.api_key.as_deref().ok_or(LLMError::NoProviderConfigured)?;

        let body = MessagesRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            messages: vec![WireMessage { role: "user", content: &request.prompt }],
        };

        tracing::debug!(
            "Calling model API: scenario={}, model={}, max_tokens={}, prompt_len={}",
            request.scenario,
            request.model,
            request.max_tokens,
            request.prompt.len()
        );

        let start = Instant::now();
        let response = self
            .http_client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let latency_ms = start.elapsed().as_millis();

        if !status.is_success() {
            tracing::warn!(
                "Model API returned {} after {}ms (scenario={})",
                status,
                latency_ms,
                request.scenario
            );
            return Err(Self::map_error_status(status, &text));
        }

        let parsed: MessagesResponse = serde_json::from_str(&text)?;
        let completion = parsed.into_completion()?;

        tracing::info!(
            "Model API completed: scenario={}, model={}, latency={}ms, input_tokens={:?}, output_tokens={:?}",
            request.scenario,
            completion.model.as_deref().unwrap_or(&request.model),
            latency_ms,
            completion.input_tokens,
            completion.output_tokens
        );

        Ok(completion)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
