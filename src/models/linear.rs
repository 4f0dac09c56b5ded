//! Linear classifier
//!
//! Decision function `w . x + b` over the vectorizer's feature space, covering
//! logistic regression, linear SVMs and other linear models exported as a
//! coefficient matrix, intercepts and class labels.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ArtifactKind, InferenceStage, Result, SentimentError};
use crate::core::traits::{Classifier, Loadable, ModelComponent, Prediction, SparseVector};
use crate::models::read_artifact;

/// Serialized linear model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    /// One row for binary models, one row per class otherwise
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    pub classes: Vec<i64>,
}

/// Linear model restored from a [`ClassifierArtifact`]
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    classes: Vec<i64>,
    n_features: usize,
}

impl LinearClassifier {
    /// Validate an artifact and build the classifier from it
    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self> {
        let invalid = |message: String| {
            SentimentError::model_load(ArtifactKind::Classifier, None, message)
        };

        let ClassifierArtifact {
            coef,
            intercept,
            classes,
        } = artifact;

        if classes.len() < 2 {
            return Err(invalid(format!(
                "expected at least two classes, found {}",
                classes.len()
            )));
        }

        let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
        if coef.len() != expected_rows || intercept.len() != expected_rows {
            return Err(invalid(format!(
                "{} classes need {} coefficient rows and intercepts, found {} and {}",
                classes.len(),
                expected_rows,
                coef.len(),
                intercept.len()
            )));
        }

        let n_features = coef[0].len();
        if n_features == 0 {
            return Err(invalid("coefficient rows are empty".to_string()));
        }
        if coef.iter().any(|row| row.len() != n_features) {
            return Err(invalid("coefficient rows have different lengths".to_string()));
        }
        if coef.iter().flatten().chain(intercept.iter()).any(|w| !w.is_finite()) {
            return Err(invalid("weights contain non-finite values".to_string()));
        }

        Ok(Self {
            coef,
            intercept,
            classes,
            n_features,
        })
    }

    /// Parse and validate a JSON artifact held in memory
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ClassifierArtifact = serde_json::from_str(json).map_err(|e| {
            SentimentError::model_load(ArtifactKind::Classifier, None, e.to_string())
        })?;
        Self::from_artifact(artifact)
    }

    /// Raw decision values, one per coefficient row
    pub fn decision_function(&self, features: &SparseVector) -> Result<Vec<f64>> {
        if features.dimension() != self.n_features {
            return Err(SentimentError::inference(
                InferenceStage::Prediction,
                format!(
                    "feature vector has {} columns, model expects {}",
                    features.dimension(),
                    self.n_features
                ),
            ));
        }

        Ok(self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| features.dot(row) + b)
            .collect())
    }
}

impl ModelComponent for LinearClassifier {
    fn name(&self) -> &str {
        "linear-classifier"
    }
}

impl Loadable for LinearClassifier {
    fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let artifact: ClassifierArtifact = read_artifact(path, ArtifactKind::Classifier)?;
        Self::from_artifact(artifact).map_err(|e| e.at_path(path))
    }
}

impl Classifier for LinearClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict(&self, features: &SparseVector) -> Result<Prediction> {
        let scores = self.decision_function(features)?;

        if let [score] = scores[..] {
            let class = if score > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
            return Ok(Prediction { class, score });
        }

        // first maximum wins ties
        let (best, score) = scores
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bs), (i, s)| {
                if s > bs {
                    (i, s)
                } else {
                    (bi, bs)
                }
            });

        Ok(Prediction {
            class: self.classes[best],
            score,
        })
    }
}
