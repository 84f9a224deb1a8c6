pub mod llm;
pub mod speech_service;

pub use speech_service::SpeechService;
