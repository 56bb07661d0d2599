use reqwest::Client;
use tracing::debug;

use super::chunk::{MAX_CHUNK_CHARS, split_text};
use crate::config::Settings;

#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("nothing to synthesize: text is empty")]
    EmptyText,

    #[error("invalid TTS URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("speech synthesis failed: status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Turns text in a given language into encoded audio.
/// Implemented by `GoogleTts` for production; mock implementations used in tests.
pub trait SpeechSynthesizer {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, TtsError>;
}

#[derive(Clone)]
pub struct GoogleTts {
    http: Client,
    base_url: String,
}

impl GoogleTts {
    pub fn new(http: Client, settings: &Settings) -> Self {
        Self {
            http,
            base_url: settings.tts_base_url.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    fn chunk_url(&self, chunk: &str, lang: &str) -> Result<url::Url, TtsError> {
        let url = url::Url::parse_with_params(
            &format!("{}/translate_tts", self.base_url),
            &[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang),
                ("q", chunk),
            ],
        )?;
        Ok(url)
    }

    async fn synthesize_chunk(&self, chunk: &str, lang: &str) -> Result<Vec<u8>, TtsError> {
        let response = self
            .http
            .get(self.chunk_url(chunk, lang)?)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl SpeechSynthesizer for GoogleTts {
    /// Synthesizes each chunk in order and concatenates the MP3 segments.
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, TtsError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::EmptyText);
        }

        let mut audio = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let segment = self.synthesize_chunk(chunk, lang).await?;
            debug!(chunk = i + 1, total = chunks.len(), bytes = segment.len(), "chunk synthesized");
            audio.extend_from_slice(&segment);
        }

        Ok(audio)
    }
}
