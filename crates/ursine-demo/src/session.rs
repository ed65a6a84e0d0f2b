//! Classification session state machine
//!
//! Holds the currently selected image and the latest verdict. Phases move
//! `Idle -> ImageLoaded -> Classified`; a re-upload from any phase replaces
//! the image and discards the previous verdict.

use crate::confidence::{self, Verdict};
use image::DynamicImage;
use serde::Serialize;
use ursine_classifier::ImageClassifier;

/// Session lifecycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    ImageLoaded,
    Classified,
}

/// An uploaded image held by the session
pub struct SelectedImage {
    /// Original upload filename
    pub filename: String,

    /// Decoded image handed to the classifier
    pub image: DynamicImage,

    /// PNG thumbnail for the preview pane, at most 300x300
    pub preview_png: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Classify requested with no uploaded image
    #[error("image is null")]
    NoImageSelected,

    #[error(transparent)]
    Classifier(#[from] ursine_classifier::Error),
}

/// Per-interaction state: the selected image and the latest verdict
#[derive(Default)]
pub struct ClassificationSession {
    image: Option<SelectedImage>,
    verdict: Option<Verdict>,
}

impl ClassificationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.image, &self.verdict) {
            (None, _) => SessionPhase::Idle,
            (Some(_), None) => SessionPhase::ImageLoaded,
            (Some(_), Some(_)) => SessionPhase::Classified,
        }
    }

    /// Accept a new image, replacing any current one and discarding the
    /// previous verdict
    pub fn upload(&mut self, image: SelectedImage) {
        self.image = Some(image);
        self.verdict = None;
    }

    /// Run the classifier on the selected image and record the verdict
    pub fn classify(
        &mut self,
        classifier: &dyn ImageClassifier,
    ) -> Result<Verdict, SessionError> {
        let selected = self.image.as_ref().ok_or(SessionError::NoImageSelected)?;
        let prediction = classifier.predict(&selected.image)?;
        let verdict = confidence::compose(&prediction);
        self.verdict = Some(verdict.clone());
        Ok(verdict)
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ursine_classifier::{Prediction, Result};

    struct FixedClassifier {
        labels: Vec<String>,
        probability: f32,
    }

    impl FixedClassifier {
        fn new(probability: f32) -> Self {
            Self {
                labels: vec!["grizzly".to_string(), "teddy".to_string()],
                probability,
            }
        }
    }

    impl ImageClassifier for FixedClassifier {
        fn predict(&self, _image: &DynamicImage) -> Result<Prediction> {
            Ok(Prediction {
                label: "grizzly".to_string(),
                probability: self.probability,
                probabilities: vec![
                    ("grizzly".to_string(), self.probability),
                    ("teddy".to_string(), 1.0 - self.probability),
                ],
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }

        fn labels(&self) -> &[String] {
            &self.labels
        }
    }

    fn selected_image(name: &str) -> SelectedImage {
        SelectedImage {
            filename: name.to_string(),
            image: DynamicImage::new_rgb8(4, 4),
            preview_png: Vec::new(),
        }
    }

    #[test]
    fn classify_without_image_reports_null_image() {
        let mut session = ClassificationSession::new();
        assert_eq!(session.phase(), SessionPhase::Idle);

        let err = session.classify(&FixedClassifier::new(0.9)).unwrap_err();
        assert_eq!(err.to_string(), "image is null");
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.verdict().is_none());
    }

    #[test]
    fn upload_then_classify_reaches_classified() {
        let mut session = ClassificationSession::new();

        session.upload(selected_image("bear.jpg"));
        assert_eq!(session.phase(), SessionPhase::ImageLoaded);

        let verdict = session.classify(&FixedClassifier::new(0.9)).unwrap();
        assert_eq!(session.phase(), SessionPhase::Classified);
        assert_eq!(verdict.label, "grizzly");
        assert!(verdict.probability >= 0.0 && verdict.probability <= 1.0);
        assert!(session.verdict().is_some());
    }

    #[test]
    fn reupload_replaces_image_and_discards_verdict() {
        let mut session = ClassificationSession::new();

        session.upload(selected_image("first.jpg"));
        session.classify(&FixedClassifier::new(0.9)).unwrap();
        assert_eq!(session.phase(), SessionPhase::Classified);

        session.upload(selected_image("second.png"));
        assert_eq!(session.phase(), SessionPhase::ImageLoaded);
        assert!(session.verdict().is_none());
        assert_eq!(session.selected().unwrap().filename, "second.png");
    }

    #[test]
    fn classify_again_refreshes_the_verdict() {
        let mut session = ClassificationSession::new();
        session.upload(selected_image("bear.jpg"));

        session.classify(&FixedClassifier::new(0.9)).unwrap();
        let second = session.classify(&FixedClassifier::new(0.7)).unwrap();
        assert_eq!(session.phase(), SessionPhase::Classified);
        assert!((second.probability - 0.7).abs() < f32::EPSILON);
    }
}
