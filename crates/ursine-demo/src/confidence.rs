//! Confidence tiers and the phrase table
//!
//! Maps a softmax probability to a wording tier and composes the rendered
//! verdict line. All thresholds are on the [0,1] scale.

use rand::Rng;
use serde::Serialize;
use ursine_classifier::Prediction;

const VERY_HIGH_THRESHOLD: f32 = 0.95;
const HIGH_THRESHOLD: f32 = 0.80;
const LOW_THRESHOLD: f32 = 0.65;

/// Chance of a celebration cue on a very-high verdict
const CELEBRATE_ODDS: f64 = 0.2;

/// Discrete confidence buckets, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    VeryLow,
    Low,
    High,
    VeryHigh,
}

impl ConfidenceTier {
    /// Select the tier for a probability, first matching threshold wins
    pub fn from_probability(probability: f32) -> Self {
        if probability >= VERY_HIGH_THRESHOLD {
            Self::VeryHigh
        } else if probability >= HIGH_THRESHOLD {
            Self::High
        } else if probability >= LOW_THRESHOLD {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    /// Phrase list for this tier, always non-empty
    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            Self::VeryLow => &[
                "Not confident about this",
                "To be taken with a grain of salt",
                "I have a bad feeling about this",
            ],
            Self::Low => &["Possibly", "Not feeling very confident"],
            Self::High => &["Quite likely", "Quite possibly", "I think it is"],
            Self::VeryHigh => &["Most likely", "Quite sure it is", "It is"],
        }
    }
}

/// Render-ready classification verdict
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    /// Composed message line
    pub message: String,

    /// Predicted label
    pub label: String,

    /// Winning probability (0.0-1.0)
    pub probability: f32,

    /// Tier the probability fell into
    pub tier: ConfidenceTier,

    /// Whether the UI should show a celebration cue
    pub celebrate: bool,
}

/// Compose the verdict line for a prediction
pub fn compose(prediction: &Prediction) -> Verdict {
    compose_with(prediction, &mut rand::thread_rng())
}

/// Compose with an explicit RNG, for deterministic tests
pub fn compose_with(prediction: &Prediction, rng: &mut impl Rng) -> Verdict {
    let tier = ConfidenceTier::from_probability(prediction.probability);
    let phrases = tier.phrases();
    let phrase = phrases[rng.gen_range(0..phrases.len())];
    let celebrate = tier == ConfidenceTier::VeryHigh && rng.gen_bool(CELEBRATE_ODDS);

    Verdict {
        message: format!(
            "{phrase}: {} (Prob: {:.4})",
            prediction.label, prediction.probability
        ),
        label: prediction.label.clone(),
        probability: prediction.probability,
        tier,
        celebrate,
    }
}
