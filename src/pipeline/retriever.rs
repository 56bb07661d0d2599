use tracing::{debug, info, warn};

use super::article::Article;
use super::error::PipelineError;
use super::summarize::summarize;
use crate::convert::html_to_plain;
use crate::exa::{ArticleSearch, SearchResult};
use crate::openai::LanguageModel;

pub const SIMILAR_COUNT: usize = 3;

/// Finds articles and brings each one to its summarized form.
pub struct Retriever<'a, S, M> {
    search: &'a S,
    model: &'a M,
}

impl<'a, S: ArticleSearch, M: LanguageModel> Retriever<'a, S, M> {
    pub fn new(search: &'a S, model: &'a M) -> Self {
        Self { search, model }
    }

    /// Top hit for `query`, with auto-prompting left to the search engine.
    pub async fn fetch_primary(&self, query: &str) -> Result<Article, PipelineError> {
        let results = self.search.search(query, 1, true).await?;
        let Some(result) = results.into_iter().next() else {
            return Err(PipelineError::NoResults { stage: "search" });
        };

        info!(title = ?result.title, url = %result.url, "main article found");
        self.scrape(&result).await
    }

    /// Three articles similar to `url`, in the order the search engine ranked them.
    pub async fn fetch_similar(&self, url: &str) -> Result<[Article; SIMILAR_COUNT], PipelineError> {
        let results = self.search.find_similar(url, SIMILAR_COUNT as u8).await?;
        if results.is_empty() {
            return Err(PipelineError::NoResults {
                stage: "find-similar",
            });
        }
        if results.len() < SIMILAR_COUNT {
            return Err(PipelineError::TooFewResults {
                expected: SIMILAR_COUNT,
                got: results.len(),
            });
        }

        let mut articles = Vec::with_capacity(SIMILAR_COUNT);
        for result in results.iter().take(SIMILAR_COUNT) {
            info!(title = ?result.title, url = %result.url, "similar article found");
            articles.push(self.scrape(result).await?);
        }

        articles
            .try_into()
            .map_err(|v: Vec<Article>| PipelineError::TooFewResults {
                expected: SIMILAR_COUNT,
                got: v.len(),
            })
    }

    /// Resolves content by id, normalizes it to plain text, then summarizes.
    async fn scrape(&self, result: &SearchResult) -> Result<Article, PipelineError> {
        let contents = self.search.contents(&result.id).await?;
        let (url, raw) = match contents.into_iter().last() {
            Some(content) => {
                debug!(id = %content.id, url = %content.url, "content resolved");
                (content.url, content.text.unwrap_or_default())
            }
            None => {
                warn!(id = %result.id, url = %result.url, "no content returned for result");
                (result.url.clone(), String::new())
            }
        };

        let mut article = Article::from_result(result, url, raw);
        article.content = html_to_plain(&article.content);
        article.summary = summarize(self.model, &article.content).await?;
        Ok(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exa::ExaError;
    use crate::exa::types::ContentResult;
    use crate::openai::OpenAiError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockSearch {
        primary: Vec<SearchResult>,
        similar: Vec<SearchResult>,
        missing_content: Vec<String>,
        similar_urls: Mutex<Vec<String>>,
        content_ids: Mutex<Vec<String>>,
    }

    impl ArticleSearch for MockSearch {
        async fn search(
            &self,
            _query: &str,
            num_results: u8,
            use_autoprompt: bool,
        ) -> Result<Vec<SearchResult>, ExaError> {
            assert_eq!(num_results, 1);
            assert!(use_autoprompt);
            Ok(self.primary.clone())
        }

        async fn find_similar(
            &self,
            url: &str,
            num_results: u8,
        ) -> Result<Vec<SearchResult>, ExaError> {
            assert_eq!(num_results, 3);
            self.similar_urls.lock().unwrap().push(url.to_string());
            Ok(self.similar.clone())
        }

        async fn contents(&self, id: &str) -> Result<Vec<ContentResult>, ExaError> {
            self.content_ids.lock().unwrap().push(id.to_string());
            if self.missing_content.iter().any(|m| m == id) {
                return Ok(vec![]);
            }
            Ok(vec![ContentResult {
                id: id.to_string(),
                url: format!("https://content.example/{id}"),
                text: Some(format!("<p>Body of {id}</p>")),
            }])
        }
    }

    struct EchoSummary;

    impl LanguageModel for EchoSummary {
        async fn complete(&self, _instruction: &str, input: &str) -> Result<String, OpenAiError> {
            Ok(format!("summary: {input}"))
        }
    }

    fn hit(id: &str) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            url: format!("https://search.example/{id}"),
            title: Some(format!("Title {id}")),
            author: None,
            published_date: None,
        }
    }

    #[tokio::test]
    async fn primary_is_normalized_and_summarized() {
        let search = MockSearch {
            primary: vec![hit("main")],
            ..Default::default()
        };
        let article = Retriever::new(&search, &EchoSummary)
            .fetch_primary("query")
            .await
            .unwrap();

        assert_eq!(article.title, "Title main");
        assert_eq!(article.url, "https://content.example/main");
        assert!(!article.content.contains("<p>"));
        assert!(article.content.contains("Body of main"));
        assert!(article.summary.starts_with("summary: "));
        assert!(article.summary.contains("Body of main"));
        assert_eq!(*search.content_ids.lock().unwrap(), vec!["main"]);
    }

    #[tokio::test]
    async fn empty_primary_search_is_no_results() {
        let search = MockSearch::default();
        let err = Retriever::new(&search, &EchoSummary)
            .fetch_primary("query")
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::NoResults { stage: "search" }));
    }

    #[tokio::test]
    async fn similar_keeps_search_order() {
        let search = MockSearch {
            similar: vec![hit("c"), hit("a"), hit("b")],
            ..Default::default()
        };
        let articles = Retriever::new(&search, &EchoSummary)
            .fetch_similar("https://content.example/main")
            .await
            .unwrap();

        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Title c", "Title a", "Title b"]);
        assert_eq!(
            *search.similar_urls.lock().unwrap(),
            vec!["https://content.example/main"]
        );
    }

    #[tokio::test]
    async fn similar_extra_results_are_dropped() {
        let search = MockSearch {
            similar: vec![hit("1"), hit("2"), hit("3"), hit("4")],
            ..Default::default()
        };
        let articles = Retriever::new(&search, &EchoSummary)
            .fetch_similar("u")
            .await
            .unwrap();

        assert_eq!(articles[2].title, "Title 3");
        assert_eq!(search.content_ids.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn too_few_similar_results_is_error() {
        let search = MockSearch {
            similar: vec![hit("1"), hit("2")],
            ..Default::default()
        };
        let err = Retriever::new(&search, &EchoSummary)
            .fetch_similar("u")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::TooFewResults {
                expected: 3,
                got: 2
            }
        ));
    }

    #[tokio::test]
    async fn zero_similar_results_is_no_results() {
        let search = MockSearch::default();
        let err = Retriever::new(&search, &EchoSummary)
            .fetch_similar("u")
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::NoResults { .. }));
    }

    #[tokio::test]
    async fn missing_content_keeps_search_url_and_empty_body() {
        let search = MockSearch {
            primary: vec![hit("gone")],
            missing_content: vec!["gone".into()],
            ..Default::default()
        };
        let article = Retriever::new(&search, &EchoSummary)
            .fetch_primary("query")
            .await
            .unwrap();

        assert_eq!(article.url, "https://search.example/gone");
        assert!(article.content.is_empty());
    }
}
