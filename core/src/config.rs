use serde::{Deserialize, Serialize};
use slide_common::SlideConfig;
use slide_provider::{GeminiClient, OpenAiClient};
use std::path::PathBuf;

/// Generative-model backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl Provider {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Some(Provider::Gemini),
            "openai" => Some(Provider::OpenAi),
            _ => None,
        }
    }

    /// Environment variable holding this provider's credential.
    pub fn credential_var(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => GeminiClient::DEFAULT_MODEL,
            Provider::OpenAi => OpenAiClient::DEFAULT_MODEL,
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    /// The single provider credential. Absence only fails requests.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub output_dir: PathBuf,
    pub log_path: PathBuf,
    pub openai_project: Option<String>,
    pub openai_org: Option<String>,
    /// Answer every prompt with a canned deck instead of calling a provider.
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key: None,
            model: Provider::default().default_model().to_string(),
            base_url: None,
            output_dir: PathBuf::from("."),
            log_path: std::env::temp_dir().join("slide.log"),
            openai_project: None,
            openai_org: None,
            offline: false,
        }
    }
}

impl Config {
    /// Defaults, then the config file, then the environment.
    pub async fn load() -> Self {
        let file = match SlideConfig::load().await {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Failed to load config file, using defaults: {e}");
                SlideConfig::default()
            }
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge `file` and `env` over the defaults. Empty environment values
    /// count as unset.
    pub fn resolve<F>(file: SlideConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let provider = env("SLIDE_PROVIDER")
            .or(file.provider)
            .and_then(|p| {
                let parsed = Provider::parse(&p);
                if parsed.is_none() {
                    tracing::warn!("Unknown provider {p:?}, using {:?}", Provider::default());
                }
                parsed
            })
            .unwrap_or_default();

        Self {
            provider,
            api_key: env(provider.credential_var()).or(file.api_key),
            model: env("SLIDE_MODEL")
                .or(file.model)
                .unwrap_or_else(|| provider.default_model().to_string()),
            base_url: env("SLIDE_BASE_URL").or(file.base_url),
            output_dir: env("SLIDE_OUTPUT_DIR")
                .map(PathBuf::from)
                .or(file.output_dir)
                .unwrap_or(defaults.output_dir),
            log_path: env("SLIDE_LOG_PATH")
                .map(PathBuf::from)
                .or(file.log_path)
                .unwrap_or(defaults.log_path),
            openai_project: env("OPENAI_PROJECT"),
            openai_org: env("OPENAI_ORG"),
            offline: false,
        }
    }
}
