//! Classifier trait and prediction types

use crate::error::Result;
use image::DynamicImage;
use serde::Serialize;

/// Trait for image classifiers
///
/// The demo treats everything behind this seam as an opaque model: input is a
/// decoded image, output is a label with a per-class probability vector.
pub trait ImageClassifier: Send + Sync {
    /// Classify the given image
    fn predict(&self, image: &DynamicImage) -> Result<Prediction>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Class labels, in model order
    fn labels(&self) -> &[String];
}

/// Result of a single classification
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Predicted class label
    pub label: String,

    /// Softmax probability of `label` (0.0-1.0)
    pub probability: f32,

    /// All class probabilities, in label order
    pub probabilities: Vec<(String, f32)>,
}
