//! Language-aware helpers for LLM prompts
//!
//! This module centralizes how we decide the natural language that
//! the LLM should write in, based on the `language` field of a request.
//! Every language-specific string lives in one static profile per language.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Dutch,
    French,
}

/// Language-specific prompt wording.
#[derive(Debug)]
pub struct LanguageProfile {
    /// Used in the prompt body, e.g. "Dutch (Nederlands)"
    pub display_name: &'static str,
    /// Preamble that forces the answer language
    pub instruction: &'static str,
    /// Short prompt used by the multilingual diagnostic endpoint
    pub test_prompt: &'static str,
}

static ENGLISH: LanguageProfile = LanguageProfile {
    display_name: "English",
    instruction: "Generate the speech in English.",
    test_prompt: "Say hello and introduce yourself in one short sentence.",
};

static DUTCH: LanguageProfile = LanguageProfile {
    display_name: "Dutch (Nederlands)",
    instruction: "ABSOLUTELY CRITICAL: Write the ENTIRE response in Dutch (Nederlands) ONLY.\n\
KRITIEK: Schrijf de volledige speech uitsluitend in het Nederlands.\n\
- Every word, heading and note must be Nederlands.\n\
- Use proper Dutch grammar, vocabulary and cultural references appropriate for a Dutch-speaking audience.\n\
- Use natural, fluent language that sounds native.\n\
- Do NOT switch to any other language at any point.",
    test_prompt: "Zeg hallo en stel jezelf voor in één korte zin, in het Nederlands.",
};

static FRENCH: LanguageProfile = LanguageProfile {
    display_name: "French (Français)",
    instruction: "ABSOLUTELY CRITICAL: Write the ENTIRE response in French (Français) ONLY.\n\
CRITIQUE : Rédigez l'intégralité du discours uniquement en Français.\n\
- Every word, heading and note must be Français.\n\
- Use proper French grammar, vocabulary and cultural references appropriate for a French-speaking audience.\n\
- Use natural, fluent language that sounds native.\n\
- Do NOT switch to any other language at any point.",
    test_prompt: "Dites bonjour et présentez-vous en une courte phrase, en français.",
};

impl Language {
    /// Resolve a request's language field.
    ///
    /// Exact, case-sensitive match on "dutch" and "french". Everything else,
    /// including typos and the empty string, is English.
    pub fn from_code(code: &str) -> Self {
        match code {
            "dutch" => Self::Dutch,
            "french" => Self::French,
            _ => Self::English,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Dutch => "dutch",
            Self::French => "french",
        }
    }

    pub fn profile(&self) -> &'static LanguageProfile {
        match self {
            Self::English => &ENGLISH,
            Self::Dutch => &DUTCH,
            Self::French => &FRENCH,
        }
    }

    pub fn instruction(&self) -> &'static str {
        self.profile().instruction
    }

    pub fn display_name(&self) -> &'static str {
        self.profile().display_name
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Build a small prompt section that *hard constrains* the answer language.
pub fn build_language_prompt_section(language: Language) -> String {
    format!("LANGUAGE REQUIREMENT:\n{}\n", language.instruction())
}
