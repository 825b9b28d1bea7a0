use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

/// Shown in place of an answer whenever the completion call fails.
pub const COMPLETION_FALLBACK: &str = "\u{26a0} Failed to fetch response from OpenRouter.";

/// A single-shot text completion service.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send `prompt` as the only user message and return the first
    /// completion's text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Answer a free-text legal question.
///
/// Returns `None` for a blank question; the backend is not called. Any
/// backend error is logged and replaced by [`COMPLETION_FALLBACK`].
pub async fn answer_question(backend: &dyn CompletionBackend, question: &str) -> Option<String> {
    if question.trim().is_empty() {
        return None;
    }
    match backend.complete(question).await {
        Ok(answer) => Some(answer),
        Err(e) => {
            warn!(question_len = question.len(), "completion failed: {e:#}");
            Some(COMPLETION_FALLBACK.to_string())
        },
    }
}
