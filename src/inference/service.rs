//! Sentiment inference service
//!
//! Holds the loaded vectorizer and classifier for the lifetime of the
//! process. Built once at startup and shared read-only with every request;
//! nothing in here is mutated after construction.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::core::error::{ArtifactKind, InferenceStage, Result, SentimentError};
use crate::core::traits::{Classifier, Loadable, ModelComponent, Prediction, Vectorizer};
use crate::models::{BagOfWordsVectorizer, LinearClassifier};
use crate::text::TweetNormalizer;
use crate::MAX_TWEET_CHARS;

/// Binary sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Model label encoding: 1 is positive, 0 is negative
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            1 => Some(Sentiment::Positive),
            0 => Some(Sentiment::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "\u{1F60A}",
            Sentiment::Negative => "\u{1F622}",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one text
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub sentiment: Sentiment,
    /// Normalized text that was fed to the vectorizer
    pub normalized: String,
    pub prediction: Prediction,
}

/// Artifact readiness as reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub model_loaded: bool,
    pub vectorizer_loaded: bool,
    pub ready: bool,
}

/// Reasons a classification request is rejected
#[derive(Error, Debug, Clone)]
pub enum ClassifyError {
    #[error("Models not loaded properly")]
    NotReady,

    #[error("Invalid request format")]
    InvalidRequest,

    #[error("No tweet provided")]
    EmptyText,

    #[error("Tweet too long. Max {max} characters.")]
    TooLong { max: usize },

    #[error("Classification failed: {0}")]
    Failed(#[from] SentimentError),
}

impl ClassifyError {
    /// Whether the request itself was at fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClassifyError::InvalidRequest | ClassifyError::EmptyText | ClassifyError::TooLong { .. }
        )
    }
}

/// Process-wide inference context
pub struct SentimentService {
    classifier: Option<Arc<dyn Classifier>>,
    vectorizer: Option<Arc<dyn Vectorizer>>,
    normalizer: TweetNormalizer,
    max_chars: usize,
    ready: bool,
}

impl std::fmt::Debug for SentimentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentService")
            .field("classifier", &self.classifier.as_ref().map(|c| c.name().to_string()))
            .field("vectorizer", &self.vectorizer.as_ref().map(|v| v.name().to_string()))
            .field("max_chars", &self.max_chars)
            .field("ready", &self.ready)
            .finish()
    }
}

impl SentimentService {
    /// Build a service from already-loaded components
    ///
    /// Either component may be missing, in which case the service reports
    /// itself unready and rejects every classification.
    pub fn new(
        classifier: Option<Arc<dyn Classifier>>,
        vectorizer: Option<Arc<dyn Vectorizer>>,
        normalizer: TweetNormalizer,
    ) -> Self {
        let ready = match (&classifier, &vectorizer) {
            (Some(classifier), Some(vectorizer)) => {
                match check_compatibility(classifier.as_ref(), vectorizer.as_ref()) {
                    Ok(()) => true,
                    Err(e) => {
                        error!("Model artifacts are incompatible: {}", e);
                        false
                    }
                }
            }
            _ => false,
        };

        Self {
            classifier,
            vectorizer,
            normalizer,
            max_chars: MAX_TWEET_CHARS,
            ready,
        }
    }

    /// Service with no artifacts loaded
    pub fn unloaded(normalizer: TweetNormalizer) -> Self {
        Self::new(None, None, normalizer)
    }

    /// Load both artifacts from disk
    ///
    /// Load failures are logged and leave the service unready; they never
    /// abort startup.
    pub fn load(model_path: &Path, vectorizer_path: &Path, normalizer: TweetNormalizer) -> Self {
        info!("Loading model and vectorizer...");

        let classifier = match LinearClassifier::load(model_path) {
            Ok(model) => {
                info!(
                    "Loaded {} from {:?} ({} features)",
                    model.name(),
                    model_path,
                    model.n_features()
                );
                Some(Arc::new(model) as Arc<dyn Classifier>)
            }
            Err(e) => {
                error!("Error loading model: {}", e);
                None
            }
        };

        let vectorizer = match BagOfWordsVectorizer::load(vectorizer_path) {
            Ok(vectorizer) => {
                info!(
                    "Loaded {} from {:?} ({} terms)",
                    vectorizer.name(),
                    vectorizer_path,
                    vectorizer.dimension()
                );
                Some(Arc::new(vectorizer) as Arc<dyn Vectorizer>)
            }
            Err(e) => {
                error!("Error loading vectorizer: {}", e);
                None
            }
        };

        let service = Self::new(classifier, vectorizer, normalizer);
        if service.is_ready() {
            info!("Model and vectorizer loaded successfully!");
        }
        service
    }

    /// Override the maximum accepted text length (in characters)
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn normalizer(&self) -> &TweetNormalizer {
        &self.normalizer
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Fail fast when the artifacts are not usable
    pub fn ensure_ready(&self) -> std::result::Result<(), ClassifyError> {
        if self.ready {
            Ok(())
        } else {
            Err(ClassifyError::NotReady)
        }
    }

    /// Current artifact status
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            model_loaded: self.classifier.is_some(),
            vectorizer_loaded: self.vectorizer.is_some(),
            ready: self.ready,
        }
    }

    /// Classify one text
    pub fn classify(&self, text: &str) -> std::result::Result<Classification, ClassifyError> {
        self.ensure_ready()?;
        let (Some(classifier), Some(vectorizer)) = (&self.classifier, &self.vectorizer) else {
            return Err(ClassifyError::NotReady);
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(ClassifyError::EmptyText);
        }
        if text.chars().count() > self.max_chars {
            return Err(ClassifyError::TooLong {
                max: self.max_chars,
            });
        }

        debug!("Processing tweet: {}", text);

        let normalized = self.normalizer.normalize(text);
        let features = vectorizer.transform(&normalized)?;
        let prediction = classifier.predict(&features)?;
        let sentiment = Sentiment::from_class(prediction.class).ok_or_else(|| {
            SentimentError::inference(
                InferenceStage::LabelMapping,
                format!("model produced unexpected label {}", prediction.class),
            )
        })?;

        debug!(
            "Classified as {} (score {:.4}, {} active features)",
            sentiment,
            prediction.score,
            features.nnz()
        );

        Ok(Classification {
            sentiment,
            normalized,
            prediction,
        })
    }
}

/// Checks that can be made on opaque artifacts before serving
fn check_compatibility(classifier: &dyn Classifier, vectorizer: &dyn Vectorizer) -> Result<()> {
    if classifier.n_features() != vectorizer.dimension() {
        return Err(SentimentError::model_load(
            ArtifactKind::Classifier,
            None,
            format!(
                "classifier expects {} features but the vectorizer produces {}",
                classifier.n_features(),
                vectorizer.dimension()
            ),
        ));
    }

    let mut classes = classifier.classes().to_vec();
    classes.sort_unstable();
    if classes != [0_i64, 1] {
        return Err(SentimentError::model_load(
            ArtifactKind::Classifier,
            None,
            format!("expected class labels [0, 1], found {:?}", classifier.classes()),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::SparseVector;

    const VECTORIZER: &str = r#"{
        "vocabulary": {"love": 0, "great": 1, "hate": 2, "terribl": 3},
        "idf": [1.0, 1.0, 1.0, 1.0],
        "norm": "l2"
    }"#;
    const CLASSIFIER: &str =
        r#"{"coef": [[2.0, 1.5, -2.0, -1.5]], "intercept": [0.1], "classes": [0, 1]}"#;

    fn loaded() -> SentimentService {
        let classifier = LinearClassifier::from_json(CLASSIFIER).unwrap();
        let vectorizer = BagOfWordsVectorizer::from_json(VECTORIZER).unwrap();
        SentimentService::new(
            Some(Arc::new(classifier)),
            Some(Arc::new(vectorizer)),
            TweetNormalizer::new().unwrap(),
        )
    }

    #[test]
    fn test_classify_positive_and_negative() {
        let service = loaded();
        let result = service.classify("I love this!").unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.normalized, "love");

        let result = service.classify("This is terrible and I hate it").unwrap();
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.normalized, "terribl hate");
    }

    #[test]
    fn test_unknown_words_fall_back_to_intercept() {
        let result = loaded().classify("zzz qqq").unwrap();
        assert_eq!(result.prediction.score, 0.1);
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        let service = loaded();
        assert!(matches!(service.classify(""), Err(ClassifyError::EmptyText)));
        assert!(matches!(service.classify(" \t\n "), Err(ClassifyError::EmptyText)));
    }

    #[test]
    fn test_length_limit() {
        let service = loaded();
        assert!(service.classify(&"a".repeat(500)).is_ok());
        let err = service.classify(&"a".repeat(501)).unwrap_err();
        assert!(matches!(err, ClassifyError::TooLong { max: 500 }));
        assert_eq!(err.to_string(), "Tweet too long. Max 500 characters.");

        // surrounding whitespace does not count
        assert!(service.classify(&format!("  {}  ", "a".repeat(500))).is_ok());
        // characters, not bytes
        assert!(service.classify(&"\u{e9}".repeat(500)).is_ok());
    }

    #[test]
    fn test_custom_length_limit() {
        let service = loaded().with_max_chars(10);
        assert_eq!(service.max_chars(), 10);
        assert!(matches!(
            service.classify("this is longer than ten"),
            Err(ClassifyError::TooLong { max: 10 })
        ));
    }

    #[test]
    fn test_unloaded_service() {
        let service = SentimentService::unloaded(TweetNormalizer::new().unwrap());
        let health = service.health();
        assert!(!health.model_loaded);
        assert!(!health.vectorizer_loaded);
        assert!(!health.ready);
        assert!(matches!(service.classify("I love this!"), Err(ClassifyError::NotReady)));
    }

    #[test]
    fn test_missing_files_leave_service_unready() {
        let service = SentimentService::load(
            Path::new("does/not/exist/model.json"),
            Path::new("does/not/exist/vectorizer.json"),
            TweetNormalizer::new().unwrap(),
        );
        assert!(!service.is_ready());
        assert!(!service.health().model_loaded);
    }

    #[test]
    fn test_dimension_mismatch_is_not_ready() {
        let classifier =
            LinearClassifier::from_json(r#"{"coef": [[1.0]], "intercept": [0.0], "classes": [0, 1]}"#)
                .unwrap();
        let vectorizer = BagOfWordsVectorizer::from_json(VECTORIZER).unwrap();
        let service = SentimentService::new(
            Some(Arc::new(classifier)),
            Some(Arc::new(vectorizer)),
            TweetNormalizer::new().unwrap(),
        );
        let health = service.health();
        assert!(health.model_loaded && health.vectorizer_loaded);
        assert!(!health.ready);
    }

    #[test]
    fn test_unexpected_label_encoding_is_not_ready() {
        let classifier = LinearClassifier::from_json(
            r#"{"coef": [[1.0, 1.0, 1.0, 1.0]], "intercept": [0.0], "classes": [1, 2]}"#,
        )
        .unwrap();
        let vectorizer = BagOfWordsVectorizer::from_json(VECTORIZER).unwrap();
        let service = SentimentService::new(
            Some(Arc::new(classifier)),
            Some(Arc::new(vectorizer)),
            TweetNormalizer::new().unwrap(),
        );
        assert!(!service.is_ready());
    }

    struct FailingVectorizer;

    impl ModelComponent for FailingVectorizer {
        fn name(&self) -> &str {
            "failing"
        }
    }

    impl Vectorizer for FailingVectorizer {
        fn dimension(&self) -> usize {
            4
        }

        fn transform(&self, _text: &str) -> Result<SparseVector> {
            Err(SentimentError::inference(InferenceStage::Vectorization, "boom"))
        }
    }

    #[test]
    fn test_internal_failure_is_reported() {
        let classifier = LinearClassifier::from_json(CLASSIFIER).unwrap();
        let service = SentimentService::new(
            Some(Arc::new(classifier)),
            Some(Arc::new(FailingVectorizer)),
            TweetNormalizer::new().unwrap(),
        );
        let err = service.classify("I love this!").unwrap_err();
        assert!(!err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Classification failed: Inference error in vectorization: boom"
        );
    }

    #[test]
    fn test_sentiment_labels() {
        assert_eq!(Sentiment::from_class(1), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_class(0), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_class(2), None);
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
        assert_eq!(Sentiment::Negative.emoji(), "\u{1F622}");
    }
}
