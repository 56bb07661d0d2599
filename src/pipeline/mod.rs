//! Topic → articles → summaries → narration → audio.

pub mod article;
pub mod compose;
pub mod error;
pub mod prompts;
pub mod retriever;
pub mod session;
pub mod speech;
pub mod summarize;

pub use session::{Answers, Session};
