//! Ursine Classifier
//!
//! Model handling for the Ursine image-classification demo.
//!
//! This crate provides:
//! - The [`ImageClassifier`] trait, the seam behind which inference lives
//! - A linear softmax classifier and its JSON archive format
//! - Model source resolution (local path or object-store bucket/key)
//! - A memoizing [`ModelProvider`] that loads each model exactly once

pub mod classifier;
pub mod error;
pub mod fetch;
pub mod model;
pub mod provider;
pub mod source;

pub use classifier::{ImageClassifier, Prediction};
pub use error::{Error, Result};
pub use fetch::ObjectStore;
pub use model::{LinearClassifier, ModelArchive};
pub use provider::ModelProvider;
pub use source::ModelSource;
