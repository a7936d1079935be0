pub mod app;
mod app_event_sender;
pub mod preview;
mod terminal;
pub mod widgets;

pub use app::InteractiveApp;
pub use app_event_sender::AppEventSender;
pub use preview::SlidePreview;

use anyhow::{Context, Result};
use slide_common::Deck;
use slide_core::{client_for, Config, Synthesizer};
use std::path::Path;

/// Run the chat-driven deck builder until the user quits. With `deck`, the
/// session starts from it and the first prompt edits it.
pub async fn run_interactive(config: &Config, deck: Option<Deck>) -> Result<()> {
    let synthesizer = Synthesizer::new(client_for(config));
    let mut app = InteractiveApp::new(synthesizer, config.output_dir.clone());
    if let Some(deck) = deck {
        app = app.with_deck(deck);
    }
    app.run().await
}

/// Browse a deck saved as JSON.
pub async fn run_preview<P: AsRef<Path>>(file_path: P) -> Result<()> {
    let deck = load_deck(file_path).await?;
    SlidePreview::new(deck).run().await
}

/// Read a deck from a JSON file.
pub async fn load_deck<P: AsRef<Path>>(path: P) -> Result<Deck> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid deck", path.display()))
}
