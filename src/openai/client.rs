use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::types::{ApiError, ChatRequest, ChatResponse, Message};
use crate::config::{Secret, Settings};

#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("language model rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("language model quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("language model API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("language model returned an empty completion")]
    EmptyCompletion,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// One system instruction plus one user message in, one completion out.
/// Implemented by `OpenAiClient` for production; mock implementations used in tests.
pub trait LanguageModel {
    async fn complete(&self, instruction: &str, input: &str) -> Result<String, OpenAiError>;
}

#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: Secret,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(http: Client, settings: &Settings) -> Self {
        Self {
            http,
            api_key: settings.openai_api_key.clone(),
            model: settings.openai_model.clone(),
            base_url: settings.openai_base_url.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: Secret::new("test-key"),
            model: crate::config::DEFAULT_OPENAI_MODEL.to_string(),
            base_url: base_url.to_string(),
        }
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, OpenAiError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(body) = serde_json::from_str::<ChatResponse>(&text)
                && let Some(err) = &body.error
            {
                let classified = classify_api_error(status, err);
                warn!(error = %classified, "language model API error");
                return Err(classified);
            }
            if status == StatusCode::TOO_MANY_REQUESTS {
                warn!("language model rate limited");
                return Err(OpenAiError::RateLimited);
            }
            let end = text.floor_char_boundary(200);
            warn!(status = %status, "language model API error (no structured body)");
            return Err(OpenAiError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {}", &text[..end]),
            });
        }

        let body: ChatResponse = response.json().await?;
        if let Some(err) = &body.error {
            let classified = classify_api_error(status, err);
            warn!(error = %classified, "language model API error in 200 response");
            return Err(classified);
        }

        Ok(body)
    }
}

impl LanguageModel for OpenAiClient {
    async fn complete(&self, instruction: &str, input: &str) -> Result<String, OpenAiError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::system(instruction), Message::user(input)],
        };

        debug!(model = %self.model, input_bytes = input.len(), "chat completion");
        let response = self.chat(&request).await?;

        extract_completion(response).ok_or(OpenAiError::EmptyCompletion)
    }
}

fn extract_completion(response: ChatResponse) -> Option<String> {
    response
        .choices?
        .into_iter()
        .next()?
        .message?
        .content
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn classify_api_error(status: StatusCode, err: &ApiError) -> OpenAiError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());

    if err.code.as_deref() == Some("insufficient_quota") {
        return OpenAiError::QuotaExhausted(message);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => OpenAiError::RateLimited,
        StatusCode::OK => OpenAiError::Api {
            code: 0,
            message: format!(
                "{} ({message})",
                err.kind.as_deref().unwrap_or("error without status")
            ),
        },
        _ => OpenAiError::Api {
            code: status.as_u16(),
            message,
        },
    }
}
