use std::path::PathBuf;

use wildlens_photo::PhotoError;

/// Errors that can occur while loading a scene definition.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The scene file exists but could not be read.
    #[error("failed to read scene file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The scene file is not valid RON for a scene.
    #[error("failed to parse scene file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    /// No file and no built-in scene has this name.
    #[error("unknown scene '{0}'")]
    Unknown(String),
}

/// Errors that stop a frame step.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Photo(#[from] PhotoError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}
