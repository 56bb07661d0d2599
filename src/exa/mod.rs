//! Exa (formerly Metaphor) search API: query search, find-similar, and content lookup by id.

pub mod client;
pub mod types;

pub use client::{ArticleSearch, ExaClient, ExaError};
pub use types::SearchResult;
