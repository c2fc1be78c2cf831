use std::path::PathBuf;

/// Convenience result alias used across the crate.
pub type RainResult<T> = Result<T, RainError>;

/// Crate-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum RainError {
    /// The input data file does not exist (or cannot be opened).
    #[error("data unavailable: '{}' does not exist", path.display())]
    DataUnavailable {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Invalid configuration, argument or state transition.
    #[error("validation error: {0}")]
    Validation(String),

    /// Frame drawing or rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// The export destination could not be written.
    #[error("export error: {0}")]
    Export(String),

    /// Anything else, with context attached by the caller.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RainError {
    /// Build a [`RainError::DataUnavailable`] for `path`.
    pub fn data_unavailable(path: impl Into<PathBuf>) -> Self {
        Self::DataUnavailable { path: path.into() }
    }

    /// Build a [`RainError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RainError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RainError::Export`].
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Return `true` for a missing input file.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }
}
