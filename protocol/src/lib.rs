//! Request and response bodies exchanged over the HTTP boundary.

use serde::{Deserialize, Serialize};
use slide_common::Deck;

/// What the caller wants done with its prompt. Anything other than
/// `"edit"` reads as a create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Action {
    #[default]
    Create,
    Edit,
}

impl From<Option<String>> for Action {
    fn from(action: Option<String>) -> Self {
        match action.as_deref() {
            Some("edit") => Action::Edit,
            _ => Action::Create,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub current_presentation: Option<Deck>,
    #[serde(default)]
    pub action: Action,
}

impl GenerateRequest {
    pub fn edit(prompt: impl Into<String>, current: Deck) -> Self {
        Self {
            prompt: prompt.into(),
            current_presentation: Some(current),
            action: Action::Edit,
        }
    }

    /// Deck to revise. Present only for an edit that actually carries one;
    /// an edit without a deck is served as a create.
    pub fn prior(&self) -> Option<&Deck> {
        match self.action {
            Action::Edit => self.current_presentation.as_ref(),
            Action::Create => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub presentation: Deck,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub presentation: Deck,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}
