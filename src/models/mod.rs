//! Model adapters
//!
//! Thin adapters around the artifacts produced by the offline training run:
//! - Bag-of-words / TF-IDF vectorizer
//! - Linear classifier

pub mod bag_of_words;
pub mod linear;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::core::error::{ArtifactKind, Result, SentimentError};

pub use bag_of_words::{BagOfWordsVectorizer, Norm, VectorizerArtifact};
pub use linear::{ClassifierArtifact, LinearClassifier};

/// Read and deserialize a JSON artifact from disk
pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path, kind: ArtifactKind) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SentimentError::model_load(kind, Some(path.to_path_buf()), e.to_string())
    })?;
    serde_json::from_str(&content).map_err(|e| {
        SentimentError::model_load(kind, Some(path.to_path_buf()), e.to_string())
    })
}
