//! Speech Generation Scenario
//!
//! Turns a `SpeechRequest` into the single user message sent to the model.

use super::language::{Language, build_language_prompt_section};
use crate::models::SpeechRequest;

/// Build the full speech prompt.
///
/// User fields are inserted verbatim. There is no escaping and no length
/// limit, so whatever the caller sends reaches the model unchanged.
pub fn build_speech_prompt(request: &SpeechRequest) -> String {
    let language = Language::from_code(&request.language);
    let language_section = build_language_prompt_section(language);

    format!(
        "You are an expert speechwriter. Generate a {length}-minute speech with the following specifications:

{language_section}
CONTEXT:
- Occasion: {occasion}
- Audience: {audience}
- Tone: {tone}
- Template/Style: {template}
- Topic: {topic}
- Additional Context: {additional_context}

REQUIREMENTS:
1. Structure the speech with clear introduction, body, and conclusion
2. Match the specified tone throughout
3. Use language appropriate for the audience and cultural context
4. Include rhetorical devices suitable for the occasion
5. Ensure the speech fits the specified length
6. Follow the language requirement above for every part of the output

DELIVERABLES:
Please provide:
1. The complete speech text in {display_name}
2. Mark sections clearly: [INTRODUCTION], [BODY], [CONCLUSION]
3. Include suggested emphasis points with *emphasis*
4. Add timing notes in parentheses (pause here)

Generate a compelling, well-structured speech that meets these requirements.",
        length = request.length,
        occasion = request.occasion,
        audience = request.audience,
        tone = request.tone,
        template = request.template,
        topic = request.topic,
        additional_context = request.additional_context,
        display_name = language.display_name(),
    )
}
