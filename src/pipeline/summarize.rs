use tracing::debug;

use super::prompts::{QUERY_INSTRUCTION, SUMMARY_INSTRUCTION};
use crate::openai::{LanguageModel, OpenAiError};

/// Article text beyond this many bytes is cut before any model call to stay inside the context window.
pub const MAX_SUMMARY_INPUT_BYTES: usize = 12_000;

/// Turns a free-text topic into one search query.
pub async fn generate_query(model: &impl LanguageModel, topic: &str) -> Result<String, OpenAiError> {
    let query = model.complete(QUERY_INSTRUCTION, topic).await?;
    Ok(strip_quotes(&query).to_string())
}

pub async fn summarize(model: &impl LanguageModel, content: &str) -> Result<String, OpenAiError> {
    let input = truncate(content, MAX_SUMMARY_INPUT_BYTES);
    if input.len() < content.len() {
        debug!(original = content.len(), kept = input.len(), "content truncated for summary");
    }
    model.complete(SUMMARY_INSTRUCTION, input).await
}

pub(super) fn truncate(text: &str, max: usize) -> &str {
    &text[..text.floor_char_boundary(max)]
}

/// Models often wrap a lone query in quotes.
fn strip_quotes(text: &str) -> &str {
    let trimmed = text.trim();
    for (open, close) in [('"', '"'), ('\'', '\''), ('“', '”')] {
        if let Some(inner) = trimmed
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner.trim();
        }
    }
    trimmed
}
