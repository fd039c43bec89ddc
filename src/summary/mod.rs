//! Meeting summary generation.

use anyhow::Result;
use async_trait::async_trait;

pub mod claude;
pub mod prompts;

pub use claude::ClaudeClient;
pub use prompts::{build_summary_prompt, HEADING_GLYPHS};

/// Summary generation request payload.
pub struct SummaryRequest<'a> {
    pub title: &'a str,
    pub participants: &'a str,
    pub transcript: &'a str,
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// One request/response call to the model. Errors are returned as-is.
    async fn summarize(&self, request: SummaryRequest<'_>) -> Result<String>;
}
