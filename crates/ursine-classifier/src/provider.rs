//! Memoizing model provider
//!
//! Loads each model exactly once per process and hands out the cached handle
//! thereafter. The cache is keyed by the source identifier, so asking for a
//! different source yields a different handle rather than silently reusing
//! the first one.

use crate::classifier::ImageClassifier;
use crate::error::{Error, Result};
use crate::fetch::ObjectStore;
use crate::model::LinearClassifier;
use crate::source::ModelSource;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Resolves classifiers from local disk or the object store, once per source
pub struct ModelProvider {
    store: ObjectStore,
    // Held across the load so two simultaneous first requests cannot
    // double-load the same model.
    cache: Mutex<HashMap<String, Arc<dyn ImageClassifier>>>,
}

impl ModelProvider {
    pub fn new() -> Self {
        Self::with_store(ObjectStore::new())
    }

    pub fn with_store(store: ObjectStore) -> Self {
        Self {
            store,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a classifier, loading it on first use
    pub async fn get_or_load(&self, source: &ModelSource) -> Result<Arc<dyn ImageClassifier>> {
        let mut cache = self.cache.lock().await;
        if let Some(handle) = cache.get(&source.cache_key()) {
            tracing::debug!(%source, "model cache hit");
            return Ok(handle.clone());
        }

        let handle = self.load(source).await?;
        cache.insert(source.cache_key(), handle.clone());
        Ok(handle)
    }

    async fn load(&self, source: &ModelSource) -> Result<Arc<dyn ImageClassifier>> {
        let bytes = match source {
            ModelSource::LocalPath(path) => {
                if !path.exists() {
                    return Err(Error::load(format!(
                        "model file not found: {}",
                        path.display()
                    )));
                }
                Bytes::from(tokio::fs::read(path).await?)
            }
            ModelSource::Remote { bucket, key } => {
                if bucket.is_empty() {
                    return Err(Error::config("empty bucket name in model source"));
                }
                if key.is_empty() {
                    return Err(Error::config("empty object key in model source"));
                }
                tracing::info!(%bucket, %key, "downloading model from object store");
                self.store.get_object(bucket, key).await?
            }
        };

        let classifier = LinearClassifier::from_bytes(&bytes)?;
        tracing::info!(model = classifier.name(), %source, "model loaded");
        Ok(Arc::new(classifier))
    }
}

impl Default for ModelProvider {
    fn default() -> Self {
        Self::new()
    }
}
