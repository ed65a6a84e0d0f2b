use crate::session::ClassificationSession;
use parking_lot::RwLock;
use std::sync::Arc;
use ursine_classifier::ImageClassifier;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded model handle; written once at startup, read-only afterwards
    pub classifier: Arc<dyn ImageClassifier>,

    /// The demo's single classification session
    pub session: Arc<RwLock<ClassificationSession>>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn ImageClassifier>) -> Self {
        Self {
            classifier,
            session: Arc::new(RwLock::new(ClassificationSession::new())),
        }
    }
}
