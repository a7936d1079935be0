use crate::config::{Config, Provider};
use crate::error::Result;
use async_trait::async_trait;
use slide_provider::{GeminiClient, OpenAiClient};
use std::sync::Arc;

/// A generative text model: one prompt in, one opaque string out.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, prompt: String) -> Result<String>;
}

/// Build the client selected by `config`.
pub fn client_for(config: &Config) -> Arc<dyn ModelClient> {
    if config.offline {
        return Arc::new(StubClient::sample());
    }
    match config.provider {
        Provider::Gemini => {
            let mut inner = GeminiClient::new(config.api_key.clone()).with_model(&config.model);
            if let Some(url) = &config.base_url {
                inner = inner.with_base_url(url);
            }
            Arc::new(GeminiAdapter { inner })
        }
        Provider::OpenAi => {
            let mut inner = OpenAiClient::new(config.api_key.clone())
                .with_model(&config.model)
                .with_scope(config.openai_project.clone(), config.openai_org.clone());
            if let Some(url) = &config.base_url {
                inner = inner.with_base_url(url);
            }
            Arc::new(OpenAiAdapter { inner })
        }
    }
}

/// Adapter to wrap GeminiClient into ModelClient
pub struct GeminiAdapter {
    inner: GeminiClient,
}

#[async_trait]
impl ModelClient for GeminiAdapter {
    async fn complete(&self, prompt: String) -> Result<String> {
        Ok(self.inner.generate_text(&prompt).await?)
    }
}

/// Adapter to wrap OpenAiClient into ModelClient
pub struct OpenAiAdapter {
    inner: OpenAiClient,
}

#[async_trait]
impl ModelClient for OpenAiAdapter {
    async fn complete(&self, prompt: String) -> Result<String> {
        Ok(self.inner.chat(&prompt).await?)
    }
}

/// Answers every prompt with the same text. Used for `--offline` runs and
/// tests.
pub struct StubClient {
    reply: String,
}

impl StubClient {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }

    /// A small fenced deck, shaped like real model output.
    pub fn sample() -> Self {
        Self::new(SAMPLE_REPLY)
    }
}

#[async_trait]
impl ModelClient for StubClient {
    async fn complete(&self, _prompt: String) -> Result<String> {
        Ok(self.reply.clone())
    }
}

const SAMPLE_REPLY: &str = r#"```json
{
  "title": "Offline Sample Deck",
  "slides": [
    {"id": "slide-1", "title": "Offline Sample Deck", "content": ["Generated without a model provider"], "layout": "title", "backgroundColor": "FFFFFF"},
    {"id": "slide-2", "title": "What this is", "content": ["A canned deck", "Useful for trying the UI", "No network calls are made"], "layout": "content"},
    {"id": "slide-3", "title": "Next steps", "content": ["Set GEMINI_API_KEY", "Run without --offline", "Ask for any topic"], "layout": "content"}
  ]
}
```"#;
