//! Model source resolution

use std::fmt;
use std::path::PathBuf;

/// Where a serialized model archive lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelSource {
    /// Load from the local file system
    LocalPath(PathBuf),

    /// Fetch from an object-storage bucket
    Remote { bucket: String, key: String },
}

impl ModelSource {
    /// Create a local file source
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::LocalPath(path.into())
    }

    /// Create a remote bucket/key source
    pub fn remote(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Remote {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Cache key identifying this source
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalPath(path) => write!(f, "file://{}", path.display()),
            Self::Remote { bucket, key } => write!(f, "s3://{bucket}/{key}"),
        }
    }
}
