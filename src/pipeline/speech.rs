use std::path::{Path, PathBuf};

use tracing::info;

use super::error::PipelineError;
use crate::tts::SpeechSynthesizer;

pub const AUDIO_EXTENSION: &str = "mp3";

/// `<dir>/<title>.mp3`. The title is used as-is, without sanitizing.
pub fn audio_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{title}.{AUDIO_EXTENSION}"))
}

/// Synthesizes `script` and writes the audio to `audio_path(dir, title)`.
pub async fn render_audio(
    tts: &impl SpeechSynthesizer,
    script: &str,
    lang_code: &str,
    dir: &Path,
    title: &str,
) -> Result<PathBuf, PipelineError> {
    let audio = tts.synthesize(script, lang_code).await?;
    let path = audio_path(dir, title);

    tokio::fs::write(&path, &audio).await?;
    info!(path = %path.display(), bytes = audio.len(), "audio written");
    Ok(path)
}
