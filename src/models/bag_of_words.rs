//! Bag-of-words / TF-IDF vectorizer
//!
//! Restores a vectorizer fitted offline from its exported state: the
//! term-to-column vocabulary, optional inverse document frequencies and the
//! weighting flags. Tokenization matches the default bag-of-words token
//! pattern (runs of two or more word characters), so single-letter tokens
//! never reach the vocabulary lookup.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::{ArtifactKind, InferenceStage, Result, ResultExt, SentimentError};
use crate::core::traits::{Loadable, ModelComponent, SparseVector, Vectorizer};
use crate::models::read_artifact;

const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Row normalization applied after weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized vectorizer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,

    /// Per-column inverse document frequency; absent for raw counts
    #[serde(default)]
    pub idf: Option<Vec<f64>>,

    #[serde(default)]
    pub norm: Option<Norm>,

    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Clip counts to 1
    #[serde(default)]
    pub binary: bool,

    /// Inclusive word n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Vectorizer restored from a [`VectorizerArtifact`]
#[derive(Debug, Clone)]
pub struct BagOfWordsVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    norm: Option<Norm>,
    sublinear_tf: bool,
    binary: bool,
    ngram_range: (usize, usize),
    token_pattern: Regex,
}

impl BagOfWordsVectorizer {
    /// Validate an artifact and build the vectorizer from it
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        let invalid = |message: String| {
            SentimentError::model_load(ArtifactKind::Vectorizer, None, message)
        };

        let dimension = artifact.vocabulary.len();
        if dimension == 0 {
            return Err(invalid("vocabulary is empty".to_string()));
        }

        let mut seen = vec![false; dimension];
        for (term, &index) in &artifact.vocabulary {
            if index >= dimension {
                return Err(invalid(format!(
                    "term {:?} maps to column {} but the vocabulary has {} terms",
                    term, index, dimension
                )));
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(invalid(format!("column {} is assigned to more than one term", index)));
            }
        }

        if let Some(idf) = &artifact.idf {
            if idf.len() != dimension {
                return Err(invalid(format!(
                    "idf has {} weights for {} terms",
                    idf.len(),
                    dimension
                )));
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(invalid("idf contains non-finite weights".to_string()));
            }
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(invalid(format!("invalid ngram_range ({}, {})", min_n, max_n)));
        }

        let token_pattern = Regex::new(TOKEN_PATTERN).context("compiling token pattern")?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            norm: artifact.norm,
            sublinear_tf: artifact.sublinear_tf,
            binary: artifact.binary,
            ngram_range: artifact.ngram_range,
            token_pattern,
        })
    }

    /// Parse and validate a JSON artifact held in memory
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: VectorizerArtifact = serde_json::from_str(json).map_err(|e| {
            SentimentError::model_load(ArtifactKind::Vectorizer, None, e.to_string())
        })?;
        Self::from_artifact(artifact)
    }

    /// Whether idf weighting is applied
    pub fn uses_idf(&self) -> bool {
        self.idf.is_some()
    }

    /// Split text into the terms looked up in the vocabulary
    fn analyze(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl ModelComponent for BagOfWordsVectorizer {
    fn name(&self) -> &str {
        if self.uses_idf() {
            "tfidf-vectorizer"
        } else {
            "count-vectorizer"
        }
    }
}

impl Loadable for BagOfWordsVectorizer {
    fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let artifact: VectorizerArtifact = read_artifact(path, ArtifactKind::Vectorizer)?;
        Self::from_artifact(artifact).map_err(|e| e.at_path(path))
    }
}

impl Vectorizer for BagOfWordsVectorizer {
    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    fn transform(&self, text: &str) -> Result<SparseVector> {
        let counts: Vec<(usize, f64)> = self
            .analyze(text)
            .iter()
            .filter_map(|term| self.vocabulary.get(term).map(|&index| (index, 1.0)))
            .collect();

        let mut vector = SparseVector::new(self.dimension(), counts);

        if self.binary {
            vector.map_values(|_, _| 1.0);
        }
        if self.sublinear_tf {
            vector.map_values(|_, tf| 1.0 + tf.ln());
        }
        if let Some(idf) = &self.idf {
            vector.map_values(|index, tf| tf * idf[index]);
        }

        match self.norm {
            Some(Norm::L2) => {
                let length = vector
                    .entries()
                    .iter()
                    .map(|(_, v)| v * v)
                    .sum::<f64>()
                    .sqrt();
                if length > 0.0 {
                    vector.scale(1.0 / length);
                }
            }
            Some(Norm::L1) => {
                let length: f64 = vector.entries().iter().map(|(_, v)| v.abs()).sum();
                if length > 0.0 {
                    vector.scale(1.0 / length);
                }
            }
            None => {}
        }

        if vector.entries().iter().any(|(_, v)| !v.is_finite()) {
            return Err(SentimentError::inference(
                InferenceStage::Vectorization,
                "feature vector contains non-finite values",
            ));
        }

        Ok(vector)
    }
}
