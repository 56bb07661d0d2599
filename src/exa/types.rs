use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub num_results: u8,
    pub use_autoprompt: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindSimilarRequest<'a> {
    pub url: &'a str,
    pub num_results: u8,
}

#[derive(Debug, Serialize)]
pub struct ContentsRequest<'a> {
    pub ids: Vec<&'a str>,
    pub text: TextOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    pub include_html_tags: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    pub autoprompt_string: Option<String>,
}

/// One ranked hit. `id` is the content identifier used by `/contents`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub url: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContentsResponse {
    #[serde(default)]
    pub results: Vec<ContentResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentResult {
    pub id: String,
    pub url: String,
    /// Extracted page body; contains HTML tags because `includeHtmlTags` is requested.
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
}
