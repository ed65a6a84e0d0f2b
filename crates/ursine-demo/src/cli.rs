use clap::Parser;
use std::path::PathBuf;
use ursine_classifier::ModelSource;

#[derive(Parser, Debug)]
#[command(name = "ursine-demo")]
#[command(author, version, about = "Image classifier web demo")]
pub struct Cli {
    /// Object-storage bucket holding the model archive
    #[arg(env = "s3_bucket_name")]
    pub bucket: Option<String>,

    /// Object key of the model archive inside the bucket
    #[arg(env = "s3_model_path")]
    pub model_key: Option<String>,

    /// Load the model archive from a local file instead of the bucket
    #[arg(long, value_name = "PATH")]
    pub model_file: Option<PathBuf>,

    /// Listen address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Listen port
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Object-storage endpoint override (e.g. http://localhost:9000 for MinIO)
    #[arg(long, env = "URSINE_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Startup configuration failures; each names the value that is unresolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing S3 bucket name")]
    MissingBucket,

    #[error("Missing model path")]
    MissingModelPath,

    #[error("Missing S3 bucket name and model path")]
    MissingBoth,
}

impl Cli {
    /// Resolve the model source
    ///
    /// A local `--model-file` wins; otherwise the positional bucket/key pair
    /// is used, with clap falling back to the `s3_bucket_name` and
    /// `s3_model_path` environment variables when the arguments are absent.
    pub fn resolve_source(&self) -> Result<ModelSource, ConfigError> {
        if let Some(path) = &self.model_file {
            return Ok(ModelSource::local(path.clone()));
        }
        match (&self.bucket, &self.model_key) {
            (Some(bucket), Some(key)) => Ok(ModelSource::remote(bucket, key)),
            (None, Some(_)) => Err(ConfigError::MissingBucket),
            (Some(_), None) => Err(ConfigError::MissingModelPath),
            (None, None) => Err(ConfigError::MissingBoth),
        }
    }
}
