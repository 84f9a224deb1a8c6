//! Diagnostic prompts
//!
//! Canned prompts used to check that the model API is reachable and that
//! the language instructions are honored.

use super::language::Language;

pub const UPSTREAM_TEST_PROMPT: &str = "Say hello and confirm you're working!";

/// Instruction block followed by the language's short test prompt.
pub fn build_multilingual_test_prompt(language: Language) -> String {
    format!("{}\n\n{}", language.instruction(), language.profile().test_prompt)
}
