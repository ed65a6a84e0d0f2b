//! Error types for model loading and classification

/// Result type alias using this crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for model resolution, loading, and inference
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model source specification errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Model fetch or deserialization failures
    #[error("model load error: {0}")]
    Load(String),

    /// Inference failures
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Object-store transport errors
    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Local file system errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new load error
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }
}
