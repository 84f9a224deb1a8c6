use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_LANGUAGE: &str = "english";

pub const STRUCTURE_INTRO: &str = "Generated introduction";
pub const STRUCTURE_BODY: &str = "Generated body";
pub const STRUCTURE_CONCLUSION: &str = "Generated conclusion";

pub const SUGGESTIONS: [&str; 2] =
    ["Consider adding a personal anecdote", "The conclusion could be more actionable"];

/// Parameters for one speech generation.
///
/// Only the JSON types are checked. `length` is free text (usually a number
/// of minutes) and `language` is matched against the supported languages
/// later, falling back to English.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpeechRequest {
    pub occasion: String,
    pub audience: String,
    pub tone: String,
    pub length: String,
    pub template: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub additional_context: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Section labels returned with every speech.
///
/// The values are placeholders and are not extracted from the generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SpeechStructure {
    pub intro: String,
    pub body: String,
    pub conclusion: String,
}

impl Default for SpeechStructure {
    fn default() -> Self {
        Self {
            intro: STRUCTURE_INTRO.to_string(),
            body: STRUCTURE_BODY.to_string(),
            conclusion: STRUCTURE_CONCLUSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpeechResponse {
    /// Raw model output
    pub speech: String,
    pub structure: SpeechStructure,
    pub suggestions: Vec<String>,
}

impl SpeechResponse {
    /// Wrap a completion in the fixed response envelope.
    pub fn from_speech(speech: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            structure: SpeechStructure::default(),
            suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// "connected" when a credential is configured, "not configured" otherwise
    #[serde(rename = "claude_api")]
    pub upstream_api: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpstreamTestResponse {
    #[serde(rename = "claude_response")]
    pub upstream_response: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MultilingualTestResponse {
    pub language: String,
    pub response: String,
    pub prompt_used: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: SpeechRequest = serde_json::from_str(
            r#"{"occasion":"wedding","audience":"family","tone":"warm","length":"3","template":"toast"}"#,
        )
        .unwrap();

        assert_eq!(req.topic, "");
        assert_eq!(req.additional_context, "");
        assert_eq!(req.language, "english");
    }

    #[test]
    fn test_request_rejects_non_string_fields() {
        let result = serde_json::from_str::<SpeechRequest>(
            r#"{"occasion":"wedding","audience":"family","tone":"warm","length":3,"template":"toast"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_request_requires_occasion() {
        let result = serde_json::from_str::<SpeechRequest>(
            r#"{"audience":"family","tone":"warm","length":"3","template":"toast"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_response_envelope_is_constant() {
        let a = SpeechResponse::from_speech("first speech");
        let b = SpeechResponse::from_speech("a completely different speech");

        assert_eq!(a.structure, b.structure);
        assert_eq!(a.suggestions, b.suggestions);
        assert_eq!(a.structure.intro, "Generated introduction");
        assert_eq!(a.structure.body, "Generated body");
        assert_eq!(a.structure.conclusion, "Generated conclusion");
        assert_eq!(
            a.suggestions,
            vec!["Consider adding a personal anecdote", "The conclusion could be more actionable"]
        );
    }

    #[test]
    fn test_response_serializes_expected_keys() {
        let json = serde_json::to_value(SpeechResponse::from_speech("hello")).unwrap();

        assert_eq!(json["speech"], "hello");
        assert_eq!(json["structure"]["intro"], "Generated introduction");
        assert_eq!(json["suggestions"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_diagnostic_bodies_keep_existing_wire_keys() {
        let health = HealthResponse {
            status: "healthy".to_string(),
            upstream_api: "connected".to_string(),
        };
        let json = serde_json::to_value(health).unwrap();
        assert_eq!(json, serde_json::json!({"status": "healthy", "claude_api": "connected"}));

        let test = UpstreamTestResponse { upstream_response: "Hello!".to_string() };
        let json = serde_json::to_value(test).unwrap();
        assert_eq!(json, serde_json::json!({"claude_response": "Hello!"}));
    }
}
