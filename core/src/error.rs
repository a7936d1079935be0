use slide_provider::ProviderError;
use thiserror::Error;

/// The only failure text shown to users, whatever went wrong.
pub const USER_MESSAGE: &str = "Failed to generate presentation. Please try again.";

/// Why a deck could not be produced.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The provider credential is absent; no request was sent.
    #[error("model provider credential not configured (set {var})")]
    Configuration { var: String },

    /// The provider could not be reached or answered with an error.
    #[error("model request failed: {0}")]
    Transport(String),

    /// The model's text is not a deck, even after fence stripping.
    #[error("model output is not a valid deck: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Parse,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Configuration { .. } => ErrorKind::Configuration,
            GenerationError::Transport(_) => ErrorKind::Transport,
            GenerationError::Parse(_) => ErrorKind::Parse,
        }
    }

    /// Text for end users. Deliberately the same for every kind.
    pub fn user_message(&self) -> &'static str {
        USER_MESSAGE
    }
}

impl From<ProviderError> for GenerationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey { provider } => GenerationError::Configuration {
                var: credential_var(provider).to_string(),
            },
            other => GenerationError::Transport(other.to_string()),
        }
    }
}

fn credential_var(provider: &str) -> &'static str {
    match provider {
        "openai" => "OPENAI_API_KEY",
        _ => "GEMINI_API_KEY",
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
