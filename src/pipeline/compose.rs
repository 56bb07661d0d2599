use super::article::Reading;
use super::prompts::CLEANUP_INSTRUCTION;
use super::summarize::{MAX_SUMMARY_INPUT_BYTES, truncate};
use crate::openai::{LanguageModel, OpenAiError};

/// Runs an interpolated draft through one model pass with `instruction`.
pub async fn compose_and_clean(
    model: &impl LanguageModel,
    draft: &str,
    instruction: &str,
) -> Result<String, OpenAiError> {
    model.complete(instruction, draft).await
}

/// Spoken narration. Only the first similar article contributes its summary.
/// The main article's text is capped like summary input, which also bounds the TTS request count.
pub fn narration_draft(reading: &Reading) -> String {
    let main = &reading.main;
    let [first, second, third] = &reading.similar;
    format!(
        "Here is {} written by {} on {}. {}. For further reading, check out {} by {} which discusses {}. \
         Additionally, you can check out {} by {} or {} by {}.",
        main.title,
        main.author_or_null(),
        main.date_or_null(),
        truncate(&main.content, MAX_SUMMARY_INPUT_BYTES),
        first.title,
        first.author_or_null(),
        first.summary,
        second.title,
        second.author_or_null(),
        third.title,
        third.author_or_null(),
    )
}

/// Printed message pointing at the similar articles.
pub fn closing_draft(reading: &Reading) -> String {
    let main = &reading.main;
    let [first, second, third] = &reading.similar;
    format!(
        "Happy listening! This article discusses {}. For further reads, check out {} by {} at {}, \
         {} by {} at {}, or {} by {} at {}. If you'd like to listen to any of these articles, \
         run the tool again and type the title into search!",
        main.summary,
        first.title,
        first.author_or_null(),
        first.url,
        second.title,
        second.author_or_null(),
        second.url,
        third.title,
        third.author_or_null(),
        third.url,
    )
}

pub async fn compose_script(model: &impl LanguageModel, reading: &Reading) -> Result<String, OpenAiError> {
    compose_and_clean(model, &narration_draft(reading), CLEANUP_INSTRUCTION).await
}

pub async fn compose_closing(model: &impl LanguageModel, reading: &Reading) -> Result<String, OpenAiError> {
    compose_and_clean(model, &closing_draft(reading), CLEANUP_INSTRUCTION).await
}
