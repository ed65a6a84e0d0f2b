//! Linear softmax model and its serialized archive format

use crate::classifier::{ImageClassifier, Prediction};
use crate::error::{Error, Result};
use image::{imageops::FilterType, DynamicImage};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Upper bound on archive input size; untrusted archives beyond this are
/// rejected before any buffer sizing happens
const MAX_INPUT_SIZE: u32 = 1024;

/// Serialized form of a trained linear classifier
///
/// This is the blob stored on disk or in the model bucket: a JSON document
/// with one weight row per label over the flattened, downsampled RGB pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArchive {
    /// Model name/identifier
    pub name: String,

    /// Images are resampled to `input_size` x `input_size` RGB before scoring
    pub input_size: u32,

    /// Class labels, in score order
    pub labels: Vec<String>,

    /// One weight row per label, `input_size * input_size * 3` entries each
    pub weights: Vec<Vec<f32>>,

    /// Per-class bias terms
    pub bias: Vec<f32>,
}

impl ModelArchive {
    /// Deserialize and validate an archive from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let archive: ModelArchive = serde_json::from_slice(bytes)
            .map_err(|e| Error::load(format!("malformed model archive: {e}")))?;
        archive.validate()?;
        Ok(archive)
    }

    fn validate(&self) -> Result<()> {
        if self.labels.is_empty() {
            return Err(Error::load("model archive has no labels"));
        }
        if self.input_size == 0 {
            return Err(Error::load("model archive has zero input size"));
        }
        if self.input_size > MAX_INPUT_SIZE {
            return Err(Error::load(format!(
                "model archive input size {} exceeds maximum {}",
                self.input_size, MAX_INPUT_SIZE
            )));
        }
        if self.weights.len() != self.labels.len() {
            return Err(Error::load(format!(
                "model archive has {} weight rows for {} labels",
                self.weights.len(),
                self.labels.len()
            )));
        }
        if self.bias.len() != self.labels.len() {
            return Err(Error::load(format!(
                "model archive has {} bias terms for {} labels",
                self.bias.len(),
                self.labels.len()
            )));
        }
        let expected = self.input_size as usize * self.input_size as usize * 3;
        for (i, row) in self.weights.iter().enumerate() {
            if row.len() != expected {
                return Err(Error::load(format!(
                    "weight row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    expected
                )));
            }
        }
        Ok(())
    }
}

/// Linear softmax classifier over downsampled RGB pixels
pub struct LinearClassifier {
    archive: ModelArchive,
}

impl LinearClassifier {
    /// Wrap a validated archive
    pub fn new(archive: ModelArchive) -> Self {
        Self { archive }
    }

    /// Deserialize a classifier from archive bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(ModelArchive::from_bytes(bytes)?))
    }

    /// Flatten an image to the model's input features, pixel values in [0,1]
    fn features(&self, image: &DynamicImage) -> Vec<f32> {
        let size = self.archive.input_size;
        let resized = image
            .resize_exact(size, size, FilterType::Triangle)
            .to_rgb8();
        resized
            .pixels()
            .flat_map(|p| p.0)
            .map(|v| v as f32 / 255.0)
            .collect()
    }
}

impl ImageClassifier for LinearClassifier {
    fn predict(&self, image: &DynamicImage) -> Result<Prediction> {
        let features = self.features(image);
        let scores: Vec<f32> = self
            .archive
            .weights
            .iter()
            .zip(&self.archive.bias)
            .map(|(row, bias)| {
                row.iter()
                    .zip(&features)
                    .map(|(w, x)| w * x)
                    .sum::<f32>()
                    + bias
            })
            .collect();
        let probabilities = softmax(&scores);

        let (best, &probability) = probabilities
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .ok_or_else(|| Error::classifier("empty probability vector"))?;

        Ok(Prediction {
            label: self.archive.labels[best].clone(),
            probability,
            probabilities: self
                .archive
                .labels
                .iter()
                .cloned()
                .zip(probabilities.iter().copied())
                .collect(),
        })
    }

    fn name(&self) -> &str {
        &self.archive.name
    }

    fn labels(&self) -> &[String] {
        &self.archive.labels
    }
}

/// Numerically stable softmax
fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
