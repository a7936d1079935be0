//! Deck synthesis and the UI-independent session state.

pub mod client;
pub mod config;
pub mod error;
pub mod fence;
pub mod message_history;
pub mod prompt;
pub mod session;
pub mod synthesis;
pub mod thoughts;

pub use client::{client_for, ModelClient};
pub use config::{Config, Provider};
pub use error::{ErrorKind, GenerationError, USER_MESSAGE};
pub use synthesis::Synthesizer;
