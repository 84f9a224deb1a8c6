//! LLM Scenarios
//!
//! One module per kind of prompt sent to the model.

pub mod diagnostics;
pub mod language;
pub mod speech;
