use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info};

use super::article::Reading;
use super::compose::{compose_closing, compose_script};
use super::error::PipelineError;
use super::prompts::{LANGUAGE_PROMPT, LANGUAGE_RETRY_PROMPT, LOADING_MESSAGE, TOPIC_PROMPT};
use super::retriever::Retriever;
use super::speech::render_audio;
use super::summarize::generate_query;
use crate::config::Settings;
use crate::exa::ArticleSearch;
use crate::lang::LanguageTable;
use crate::openai::LanguageModel;
use crate::tts::SpeechSynthesizer;

/// Answers supplied up front (from CLI flags) instead of prompting.
#[derive(Debug, Default)]
pub struct Answers {
    pub topic: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub reading: Reading,
    pub script: String,
    pub audio_path: PathBuf,
    pub closing: String,
}

/// One topic-to-audio run over the configured collaborators.
pub struct Session<'a, M, S, T> {
    settings: &'a Settings,
    model: M,
    search: S,
    tts: T,
}

impl<'a, M, S, T> Session<'a, M, S, T>
where
    M: LanguageModel,
    S: ArticleSearch,
    T: SpeechSynthesizer,
{
    pub fn new(settings: &'a Settings, model: M, search: S, tts: T) -> Self {
        Self {
            settings,
            model,
            search,
            tts,
        }
    }

    /// Prompts for topic and language, then runs every stage in order. Any stage error ends the run.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        answers: Answers,
    ) -> Result<RunOutcome, PipelineError> {
        let topic = match answers.topic.filter(|t| !t.trim().is_empty()) {
            Some(topic) => topic,
            None => prompt_line(input, output, TOPIC_PROMPT, "topic")?,
        };
        let language = choose_language(&self.settings.languages, input, output, answers.language)?;
        let lang_code = self
            .settings
            .languages
            .code_for(&language)
            .ok_or_else(|| PipelineError::UnsupportedLanguage(language.clone()))?;

        info!(topic = %topic, lang = lang_code, "starting run");

        let query = generate_query(&self.model, &topic).await?;
        info!(query = %query, "search query generated");
        writeln!(output, "{LOADING_MESSAGE}")?;
        output.flush()?;

        let retriever = Retriever::new(&self.search, &self.model);
        let main = retriever.fetch_primary(&query).await?;
        let similar = retriever.fetch_similar(&main.url).await?;
        let reading = Reading { main, similar };

        let script = compose_script(&self.model, &reading).await?;
        debug!(chars = script.chars().count(), "script composed");
        let audio_path = render_audio(
            &self.tts,
            &script,
            lang_code,
            &self.settings.output_dir,
            &reading.main.title,
        )
        .await?;

        let closing = compose_closing(&self.model, &reading).await?;
        writeln!(output, "{closing}")?;
        output.flush()?;

        Ok(RunOutcome {
            reading,
            script,
            audio_path,
            closing,
        })
    }
}

/// Keeps asking until the answer names a supported language.
pub fn choose_language<R: BufRead, W: Write>(
    table: &LanguageTable,
    input: &mut R,
    output: &mut W,
    preset: Option<String>,
) -> Result<String, PipelineError> {
    let mut answer = match preset {
        Some(language) => language,
        None => prompt_line(input, output, LANGUAGE_PROMPT, "language")?,
    };

    while !table.is_supported(&answer) {
        debug!(answer = %answer, "unsupported language");
        answer = prompt_line(input, output, LANGUAGE_RETRY_PROMPT, "language")?;
    }

    Ok(answer.trim().to_string())
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    what: &'static str,
) -> Result<String, PipelineError> {
    writeln!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PipelineError::InputClosed(what));
    }
    Ok(line.trim().to_string())
}
