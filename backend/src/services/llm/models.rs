//! LLM Data Models
//!
//! Request/response types shared by the scenarios, plus the wire format of
//! the Anthropic Messages API.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("No API key configured for the model provider")]
    NoProviderConfigured,

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("LLM response contained no text content")]
    EmptyCompletion,
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LLMScenario {
    SpeechGeneration,
    UpstreamTest,
    MultilingualTest,
}

impl LLMScenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpeechGeneration => "speech_generation",
            Self::UpstreamTest => "upstream_test",
            Self::MultilingualTest => "multilingual_test",
        }
    }
}

impl fmt::Display for LLMScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Client-facing request / response
// ============================================================================

/// A single-turn completion: one user message in, one text out.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub scenario: LLMScenario,
    pub model: String,
    pub max_tokens: u32,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// First text segment of the reply
    pub text: String,
    pub model: Option<String>,
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
}

impl Completion {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into(), model: None, input_tokens: None, output_tokens: None }
    }
}

// ============================================================================
// Anthropic Messages API wire format
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagesResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Usage {
    #[serde(default)]
    pub input_tokens: Option<u32>,
    #[serde(default)]
    pub output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub message: String,
}

impl MessagesResponse {
    /// The completion is the first content segment, which must be text.
    pub fn into_completion(self) -> Result<Completion, LLMError> {
        let first = self.content.into_iter().next().ok_or(LLMError::EmptyCompletion)?;
        if first.kind != "text" {
            return Err(LLMError::ParseError(format!(
                "expected first content block of type 'text', got '{}'",
                first.kind
            )));
        }
        let text = first.text.ok_or(LLMError::EmptyCompletion)?;

        let (input_tokens, output_tokens) =
            self.usage.map(|u| (u.input_tokens, u.output_tokens)).unwrap_or((None, None));

        Ok(Completion { text, model: self.model, input_tokens, output_tokens })
    }
}
