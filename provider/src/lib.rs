//! Thin HTTP clients for the generative-model providers.
//!
//! Each client sends one non-streaming request and returns the model's text
//! verbatim. Interpreting that text is left to the caller.

pub mod error;
pub mod gemini;
pub mod openai;

pub use error::ProviderError;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
