use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} API key is not configured")]
    MissingApiKey { provider: &'static str },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{provider} http {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} response contained no text")]
    EmptyResponse { provider: &'static str },
}

pub type Result<T> = std::result::Result<T, ProviderError>;
