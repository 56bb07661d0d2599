use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{
    ApiErrorBody, ContentResult, ContentsRequest, ContentsResponse, FindSimilarRequest,
    SearchRequest, SearchResponse, SearchResult, TextOptions,
};
use crate::config::{Secret, Settings};

#[derive(Debug, thiserror::Error)]
pub enum ExaError {
    #[error("search API rejected the key. Check EXA_API_KEY at https://dashboard.exa.ai")]
    Unauthorized,

    #[error("search API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("search API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Search engine capabilities the article pipeline consumes.
/// Implemented by `ExaClient` for production; mock implementations used in tests.
pub trait ArticleSearch {
    async fn search(
        &self,
        query: &str,
        num_results: u8,
        use_autoprompt: bool,
    ) -> Result<Vec<SearchResult>, ExaError>;

    async fn find_similar(&self, url: &str, num_results: u8)
    -> Result<Vec<SearchResult>, ExaError>;

    async fn contents(&self, id: &str) -> Result<Vec<ContentResult>, ExaError>;
}

#[derive(Clone)]
pub struct ExaClient {
    http: Client,
    api_key: Secret,
    base_url: String,
}

impl ExaClient {
    pub fn new(http: Client, settings: &Settings) -> Self {
        Self {
            http,
            api_key: settings.exa_api_key.clone(),
            base_url: settings.exa_base_url.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: Secret::new("test-key"),
            base_url: base_url.to_string(),
        }
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<R, ExaError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("x-api-key", self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = classify_status(status, &text);
            warn!(endpoint, error = %err, "search API error");
            return Err(err);
        }

        Ok(response.json().await?)
    }
}

impl ArticleSearch for ExaClient {
    async fn search(
        &self,
        query: &str,
        num_results: u8,
        use_autoprompt: bool,
    ) -> Result<Vec<SearchResult>, ExaError> {
        let request = SearchRequest {
            query,
            num_results,
            use_autoprompt,
        };
        let response: SearchResponse = self.post("search", &request).await?;

        if let Some(rewritten) = &response.autoprompt_string {
            debug!(query, rewritten = %rewritten, "search engine rewrote query");
        }
        debug!(results = response.results.len(), "search complete");
        Ok(response.results)
    }

    async fn find_similar(
        &self,
        url: &str,
        num_results: u8,
    ) -> Result<Vec<SearchResult>, ExaError> {
        let request = FindSimilarRequest { url, num_results };
        let response: SearchResponse = self.post("findSimilar", &request).await?;

        debug!(url, results = response.results.len(), "find-similar complete");
        Ok(response.results)
    }

    async fn contents(&self, id: &str) -> Result<Vec<ContentResult>, ExaError> {
        let request = ContentsRequest {
            ids: vec![id],
            text: TextOptions {
                include_html_tags: true,
            },
        };
        let response: ContentsResponse = self.post("contents", &request).await?;
        Ok(response.results)
    }
}

fn classify_status(status: StatusCode, body: &str) -> ExaError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ExaError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => ExaError::RateLimited,
        _ => {
            let message = serde_json::from_str::<ApiErrorBody>(body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| {
                    let end = body.floor_char_boundary(200);
                    format!("HTTP {status}: {}", &body[..end])
                });
            ExaError::Api {
                code: status.as_u16(),
                message,
            }
        }
    }
}
