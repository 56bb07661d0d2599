//! Immutable run settings: credentials, service endpoints, output location and the language table.

use std::collections::HashMap;
use std::env;
use std::io::Read;
use std::path::PathBuf;

use crate::lang::LanguageTable;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EXA_BASE_URL: &str = "https://api.exa.ai";
pub const DEFAULT_TTS_BASE_URL: &str = "https://translate.google.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    MissingVar(&'static str),

    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
}

/// API credential that never shows up in `Debug` output or logs.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: Secret,
    pub openai_model: String,
    pub openai_base_url: String,
    pub exa_api_key: Secret,
    pub exa_base_url: String,
    pub tts_base_url: String,
    pub output_dir: PathBuf,
    pub languages: LanguageTable,
}

impl Settings {
    /// Reads configuration from the process environment, falling back to a `.env`
    /// file found in the working directory or one of its parents.
    ///
    /// - `OPENAI_API_KEY` (required), `OPENAI_MODEL`, `OPENAI_BASE_URL`
    /// - `EXA_API_KEY` or the legacy `METAPHOR_API_KEY` (required), `EXA_BASE_URL`
    /// - `AUDICLE_TTS_URL`
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = dotenvy::dotenv_iter().map(env_file_pairs).unwrap_or_default();
        Self::from_lookup(with_env_file(|key| env::var(key).ok(), file))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let openai_api_key = var("OPENAI_API_KEY").ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;
        let exa_api_key = var("EXA_API_KEY")
            .or_else(|| var("METAPHOR_API_KEY"))
            .ok_or(ConfigError::MissingVar("EXA_API_KEY"))?;

        let openai_base_url = endpoint("OPENAI_BASE_URL", var("OPENAI_BASE_URL"), DEFAULT_OPENAI_BASE_URL)?;
        let exa_base_url = endpoint("EXA_BASE_URL", var("EXA_BASE_URL"), DEFAULT_EXA_BASE_URL)?;
        let tts_base_url = endpoint("AUDICLE_TTS_URL", var("AUDICLE_TTS_URL"), DEFAULT_TTS_BASE_URL)?;

        Ok(Self {
            openai_api_key: Secret::new(&openai_api_key),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url,
            exa_api_key: Secret::new(&exa_api_key),
            exa_base_url,
            tts_base_url,
            output_dir: PathBuf::from("."),
            languages: LanguageTable::builtin(),
        })
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()) {
            self.openai_model = model;
        }
        self
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.output_dir = dir;
        }
        self
    }
}

/// Parsed `.env` entries. Malformed lines are skipped.
fn env_file_pairs<R: Read>(iter: dotenvy::Iter<R>) -> HashMap<String, String> {
    let pairs: HashMap<_, _> = iter.filter_map(Result::ok).collect();
    tracing::debug!(count = pairs.len(), ".env file loaded");
    pairs
}

/// Process environment wins; the `.env` file only fills gaps.
fn with_env_file(
    process: impl Fn(&str) -> Option<String>,
    file: HashMap<String, String>,
) -> impl Fn(&str) -> Option<String> {
    move |key: &str| process(key).or_else(|| file.get(key).cloned())
}

fn endpoint(var: &'static str, value: Option<String>, default: &str) -> Result<String, ConfigError> {
    let value = value.unwrap_or_else(|| default.to_string());
    url::Url::parse(&value).map_err(|source| ConfigError::InvalidUrl { var, source })?;
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn reads_required_keys_and_defaults() {
        let settings =
            Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-1"), ("EXA_API_KEY", "exa-1")]))
                .unwrap();

        assert_eq!(settings.openai_api_key.expose(), "sk-1");
        assert_eq!(settings.exa_api_key.expose(), "exa-1");
        assert_eq!(settings.openai_model, DEFAULT_OPENAI_MODEL);
        assert_eq!(settings.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(settings.exa_base_url, DEFAULT_EXA_BASE_URL);
        assert_eq!(settings.tts_base_url, DEFAULT_TTS_BASE_URL);
        assert_eq!(settings.output_dir, PathBuf::from("."));
    }

    #[test]
    fn falls_back_to_metaphor_key() {
        let settings = Settings::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("METAPHOR_API_KEY", "legacy"),
        ]))
        .unwrap();

        assert_eq!(settings.exa_api_key.expose(), "legacy");
    }

    #[test]
    fn missing_openai_key_is_error() {
        let err = Settings::from_lookup(lookup(&[("EXA_API_KEY", "exa-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("OPENAI_API_KEY")));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-1"), ("EXA_API_KEY", "  ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("EXA_API_KEY")));
    }

    #[test]
    fn invalid_endpoint_is_error() {
        let err = Settings::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("EXA_API_KEY", "exa-1"),
            ("EXA_BASE_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { var: "EXA_BASE_URL", .. }));
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let settings = Settings::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("EXA_API_KEY", "exa-1"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1/"),
        ]))
        .unwrap();
        assert_eq!(settings.openai_base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn cli_overrides_apply() {
        let settings =
            Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-1"), ("EXA_API_KEY", "exa-1")]))
                .unwrap()
                .with_model(Some("gpt-4o-mini".into()))
                .with_output_dir(Some(PathBuf::from("/tmp/audio")));

        assert_eq!(settings.openai_model, "gpt-4o-mini");
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/audio"));
    }

    fn temp_env_file(name: &str, body: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("audicle-{}-{name}.env", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn env_file_supplies_missing_keys() {
        let path = temp_env_file("supplies", "OPENAI_API_KEY=sk-file\nEXA_API_KEY=\"exa-file\"\n");
        let file = env_file_pairs(dotenvy::from_path_iter(&path).unwrap());
        std::fs::remove_file(&path).unwrap();

        let settings = Settings::from_lookup(with_env_file(lookup(&[]), file)).unwrap();

        assert_eq!(settings.openai_api_key.expose(), "sk-file");
        assert_eq!(settings.exa_api_key.expose(), "exa-file");
    }

    #[test]
    fn process_env_overrides_env_file() {
        let path = temp_env_file("overrides", "OPENAI_API_KEY=sk-file\nEXA_API_KEY=exa-file\nOPENAI_MODEL=from-file\n");
        let file = env_file_pairs(dotenvy::from_path_iter(&path).unwrap());
        std::fs::remove_file(&path).unwrap();

        let settings = Settings::from_lookup(with_env_file(
            lookup(&[("OPENAI_API_KEY", "sk-process")]),
            file,
        ))
        .unwrap();

        assert_eq!(settings.openai_api_key.expose(), "sk-process");
        assert_eq!(settings.exa_api_key.expose(), "exa-file");
        assert_eq!(settings.openai_model, "from-file");
    }

    #[test]
    fn debug_output_redacts_keys() {
        let settings =
            Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-secret"), ("EXA_API_KEY", "exa-secret")]))
                .unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(!debug.contains("exa-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
