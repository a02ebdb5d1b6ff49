use std::path::PathBuf;

/// Errors that can occur while persisting a photo.
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    /// The output directory or file could not be created.
    #[error("failed to write photo at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// PNG encoding failed.
    #[error("failed to encode photo: {0}")]
    Encode(#[from] image::ImageError),
}
