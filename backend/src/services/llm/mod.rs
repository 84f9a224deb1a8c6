//! LLM Service Module
//!
//! Everything that talks to, or builds text for, the model provider.
//!
//! # Architecture
//! ```text
//! ┌─────────────────┐
//! │    LLMClient    │  ← Trait (injected into AppState)
//! └────────┬────────┘
//!          │
//!    ┌─────┴─────┐
//!    ▼           ▼
//! ┌─────────┐  ┌──────────┐
//! │Anthropic│  │   Fake   │
//! │ Client  │  │ (tests)  │
//! └─────────┘  └──────────┘
//! ```

mod client;
mod models;
mod scenarios;

pub use client::{ANTHROPIC_VERSION, AnthropicClient, LLMClient};
pub use models::{Completion, CompletionRequest, LLMError, LLMScenario};
pub use scenarios::diagnostics::{UPSTREAM_TEST_PROMPT, build_multilingual_test_prompt};
pub use scenarios::language::{Language, LanguageProfile, build_language_prompt_section};
pub use scenarios::speech::build_speech_prompt;
