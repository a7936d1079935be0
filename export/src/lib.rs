//! Renders a [`Deck`] as a PowerPoint (`.pptx`) package.

mod error;
mod package;
pub mod slide;
pub mod template;

pub use error::{ExportError, Result};

use slide_common::{export_file_name, save_bytes, Deck};
use std::path::{Path, PathBuf};

/// MIME type of the rendered package.
pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Render `deck` to PPTX bytes. Slides keep their input order; the first is
/// always drawn with the title template.
pub fn render(deck: &Deck) -> Result<Vec<u8>> {
    let bytes = package::write_package(deck)?;
    tracing::debug!(
        slides = deck.slide_count(),
        bytes = bytes.len(),
        "rendered presentation"
    );
    Ok(bytes)
}

/// Render `deck` and write it to `dir`, named after the deck title.
pub async fn export_to_dir(deck: &Deck, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let bytes = render(deck)?;
    let path = save_bytes(dir, &export_file_name(&deck.title), &bytes)
        .await
        .map_err(ExportError::Save)?;
    tracing::info!(path = %path.display(), "exported presentation");
    Ok(path)
}
