use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to assemble archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write xml: {0}")]
    Xml(#[from] std::fmt::Error),

    #[error("failed to save presentation: {0}")]
    Save(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
