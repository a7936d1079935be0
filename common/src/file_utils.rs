use anyhow::Result;
use std::path::{Path, PathBuf};

/// Extension of exported decks.
pub const EXPORT_EXTENSION: &str = "pptx";

/// Stem used when a deck title is empty.
const FALLBACK_STEM: &str = "presentation";

/// Replace every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize_file_stem(title: &str) -> String {
    if title.is_empty() {
        return FALLBACK_STEM.to_string();
    }
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// File name an exported deck is saved under.
pub fn export_file_name(title: &str) -> String {
    format!("{}.{EXPORT_EXTENSION}", sanitize_file_stem(title))
}

/// Ensure the output directory exists
pub async fn ensure_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let path = dir.as_ref();
    if !path.exists() {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}

/// Write bytes to `dir/filename`, creating `dir` when needed.
pub async fn save_bytes<P: AsRef<Path>>(dir: P, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    ensure_dir(dir).await?;

    let file_path = dir.join(filename);
    tokio::fs::write(&file_path, bytes).await?;

    Ok(file_path)
}
