//! OpenAI chat-completions client used for query generation, summaries and cleanup passes.

pub mod client;
pub mod types;

pub use client::{LanguageModel, OpenAiClient, OpenAiError};
