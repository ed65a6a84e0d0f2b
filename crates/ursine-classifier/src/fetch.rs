//! Remote model retrieval from an S3-style object store
//!
//! Objects are fetched with a plain GET of the bucket/key URL. Credential
//! resolution is left to the deployment (public objects, signing proxy, or a
//! custom endpoint such as MinIO).

use crate::error::{Error, Result};
use bytes::Bytes;

/// HTTP client for a named object-storage endpoint
pub struct ObjectStore {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: None,
        }
    }

    /// Override the storage endpoint (e.g. a local MinIO or test server)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => {
                format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/'))
            }
            None => format!("https://{bucket}.s3.amazonaws.com/{key}"),
        }
    }

    /// GET the raw bytes of an object
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let url = self.object_url(bucket, key);
        tracing::debug!(%url, "fetching model object");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Error::load(format!(
                "object fetch failed for {url}: {}",
                response.status()
            )));
        }
        Ok(response.bytes().await?)
    }
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}
