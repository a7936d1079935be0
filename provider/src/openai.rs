use crate::error::{ProviderError, Result};
use serde_json::{json, Value};

const PROVIDER: &str = "openai";

/// OpenAI Chat Completions client (non-streaming).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    pub model: String,
    base_url: String,
    project: Option<String>,
    organization: Option<String>,
}

impl OpenAiClient {
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com";

    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            project: None,
            organization: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the `OpenAI-Project` / `OpenAI-Organization` headers. Empty
    /// values are ignored.
    pub fn with_scope(mut self, project: Option<String>, organization: Option<String>) -> Self {
        self.project = project.filter(|p| !p.is_empty());
        self.organization = organization.filter(|o| !o.is_empty());
        self
    }

    pub async fn chat(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey { provider: PROVIDER })?;

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "openai request");

        let mut req = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key);
        if let Some(project) = &self.project {
            req = req.header("OpenAI-Project", project);
        }
        if let Some(org) = &self.organization {
            req = req.header("OpenAI-Organization", org);
        }
        let resp = req.json(&body).send().await?;

        let status = resp.status();
        tracing::debug!(%status, "openai response status");
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body: text,
            });
        }

        let v: Value = resp.json().await?;
        v["choices"][0]["message"]["content"]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or(ProviderError::EmptyResponse { provider: PROVIDER })
    }
}
