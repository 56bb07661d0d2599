use crate::exa::SearchResult;

/// One retrieved page: bibliographic data, normalized text, and a model summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub author: Option<String>,
    pub published_date: Option<String>,
    pub content: String,
    pub summary: String,
    pub url: String,
}

impl Article {
    /// Builds an article from a search hit and its raw extract. The summary starts out as the raw content.
    pub fn from_result(result: &SearchResult, url: String, content: String) -> Self {
        Self {
            title: result.title.clone().unwrap_or_default(),
            author: result.author.clone().filter(|a| !a.trim().is_empty()),
            published_date: result.published_date.clone().filter(|d| !d.trim().is_empty()),
            summary: content.clone(),
            content,
            url,
        }
    }

    /// Author for template interpolation; missing values render as `null`.
    pub fn author_or_null(&self) -> &str {
        self.author.as_deref().unwrap_or("null")
    }

    pub fn date_or_null(&self) -> &str {
        self.published_date.as_deref().unwrap_or("null")
    }
}

/// The main article and the three articles found similar to it.
#[derive(Debug, Clone)]
pub struct Reading {
    pub main: Article,
    pub similar: [Article; 3],
}

impl Reading {
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        std::iter::once(&self.main).chain(self.similar.iter())
    }
}
