use crate::exa::ExaError;
use crate::openai::OpenAiError;
use crate::tts::TtsError;

/// Named failure kinds for one pipeline run. Only the language prompt recovers locally.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no results returned by {stage}")]
    NoResults { stage: &'static str },

    #[error("expected {expected} similar articles, search returned {got}")]
    TooFewResults { expected: usize, got: usize },

    #[error("model call failed: {0}")]
    Model(#[from] OpenAiError),

    #[error("search failed: {0}")]
    Search(#[from] ExaError),

    #[error("synthesis failed: {0}")]
    Synthesis(#[from] TtsError),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("input closed before a {0} was entered")]
    InputClosed(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
