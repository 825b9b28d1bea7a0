use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use lexchat_core::{agent::CompletionBackend, config::Config};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "mistralai/mixtral-8x7b";
pub const DEFAULT_REFERER: &str = "https://your-app.com";

/// Calls OpenRouter's OpenAI-compatible chat completions endpoint.
///
/// Stateless: each call carries a single user message and no history.
/// One request per call; no retries, no streaming, no request timeout.
pub struct OpenRouterBackend {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub referer: String,
    http: reqwest::Client,
}

impl OpenRouterBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            referer: DEFAULT_REFERER.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.openrouter_api_key.clone())
            .with_base_url(config.openrouter_base_url.clone())
            .with_model(config.openrouter_model.clone())
            .with_referer(config.openrouter_referer.clone())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[async_trait]
impl CompletionBackend for OpenRouterBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        info!(
            model = %self.model,
            prompt_len = prompt.len(),
            "calling openrouter chat completions"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .json(&body)
            .send()
            .await
            .context("openrouter request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, model = %self.model, "openrouter returned non-success: {}", text);
            bail!("openrouter error {status}");
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .context("failed to parse openrouter response")?;

        let Some(choice) = parsed.choices.into_iter().next() else {
            bail!("openrouter response has no choices");
        };

        info!(
            model = %self.model,
            output_len = choice.message.content.len(),
            "openrouter response received"
        );

        Ok(choice.message.content)
    }
}
