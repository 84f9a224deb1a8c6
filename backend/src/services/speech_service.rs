use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::config::LlmConfig;
use crate::models::{MultilingualTestResponse, SpeechRequest, SpeechResponse};
use crate::services::llm::{
    CompletionRequest, LLMClient, LLMError, LLMScenario, Language, UPSTREAM_TEST_PROMPT,
    build_multilingual_test_prompt, build_speech_prompt,
};

/// Speech generation on top of an injected model client.
///
/// Stateless apart from the client and model settings, so one instance is
/// shared by every request.
#[derive(Clone)]
pub struct SpeechService {
    llm_client: Arc<dyn LLMClient>,
    model: String,
    max_tokens: u32,
    test_max_tokens: u32,
}

impl SpeechService {
    pub fn new(llm_client: Arc<dyn LLMClient>, config: &LlmConfig) -> Self {
        Self {
            llm_client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            test_max_tokens: config.test_max_tokens,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.llm_client.is_configured()
    }

    /// Build the prompt, ask the model, and wrap the reply.
    pub async fn generate(&self, request: &SpeechRequest) -> Result<SpeechResponse, LLMError> {
        let request_id = Uuid::new_v4();
        let language = Language::from_code(&request.language);
        if language.code() != request.language {
            tracing::debug!(
                "[{}] Unrecognized language '{}', using {}",
                request_id,
                request.language,
                language
            );
        }

        let prompt = build_speech_prompt(request);
        tracing::info!(
            "[{}] Generating speech: occasion='{}', language={}, prompt_len={}",
            request_id,
            request.occasion,
            language,
            prompt.len()
        );

        let start = Instant::now();
        let completion = self
            .llm_client
            .complete(CompletionRequest {
                scenario: LLMScenario::SpeechGeneration,
                model: self.model.clone(),
                max_tokens: self.max_tokens,
                prompt,
            })
            .await
            .map_err(|e| {
                tracing::error!("[{}] Speech generation failed: {}", request_id, e);
                e
            })?;

        tracing::info!(
            "[{}] Speech generated in {}ms ({} chars)",
            request_id,
            start.elapsed().as_millis(),
            completion.text.len()
        );

        Ok(SpeechResponse::from_speech(completion.text))
    }

    /// Trivial round trip to confirm the model API is reachable.
    pub async fn test_upstream(&self) -> Result<String, LLMError> {
        tracing::debug!("Running upstream connectivity test");
        let completion = self
            .llm_client
            .complete(CompletionRequest {
                scenario: LLMScenario::UpstreamTest,
                model: self.model.clone(),
                max_tokens: self.test_max_tokens,
                prompt: UPSTREAM_TEST_PROMPT.to_string(),
            })
            .await?;
        Ok(completion.text)
    }

    /// Send the language's instruction block with a short canned prompt.
    pub async fn test_multilingual(
        &self,
        language_code: &str,
    ) -> Result<MultilingualTestResponse, LLMError> {
        let language = Language::from_code(language_code);
        let prompt = build_multilingual_test_prompt(language);
        tracing::debug!("Running multilingual test for {} (requested '{}')", language, language_code);

        let completion = self
            .llm_client
            .complete(CompletionRequest {
                scenario: LLMScenario::MultilingualTest,
                model: self.model.clone(),
                max_tokens: self.test_max_tokens,
                prompt: prompt.clone(),
            })
            .await?;

        Ok(MultilingualTestResponse {
            language: language.code().to_string(),
            response: completion.text,
            prompt_used: prompt,
        })
    }
}
