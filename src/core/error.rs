//! Structured error handling for the sentiment service
//!
//! Provides the crate-wide error type with enough context to tell a broken
//! artifact from a bad request or a failing pipeline stage in the logs.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias with SentimentError
pub type Result<T> = std::result::Result<T, SentimentError>;

/// Main error type for the sentiment service
#[derive(Error, Debug, Clone)]
pub enum SentimentError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Artifact loading errors
    #[error("Model loading error in {component}: {message}")]
    ModelLoad {
        message: String,
        component: ArtifactKind,
        path: Option<PathBuf>,
    },

    /// Inference errors
    #[error("Inference error in {stage}: {message}")]
    Inference {
        stage: InferenceStage,
        message: String,
    },

    /// Text processing errors
    #[error("Text processing error on {word:?}: {message}")]
    Text {
        message: String,
        word: String,
    },

    /// I/O errors
    #[error("I/O error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    /// Internal/bug errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SentimentError {
    /// Shorthand for an artifact load failure
    pub fn model_load(
        component: ArtifactKind,
        path: Option<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        SentimentError::ModelLoad {
            message: message.into(),
            component,
            path,
        }
    }

    /// Attach the artifact path to a load error that was raised without one
    pub fn at_path(self, artifact_path: &Path) -> Self {
        match self {
            SentimentError::ModelLoad {
                message,
                component,
                path: None,
            } => SentimentError::ModelLoad {
                message,
                component,
                path: Some(artifact_path.to_path_buf()),
            },
            other => other,
        }
    }

    /// Shorthand for a failure inside the prediction pipeline
    pub fn inference(stage: InferenceStage, message: impl Into<String>) -> Self {
        SentimentError::Inference {
            stage,
            message: message.into(),
        }
    }
}

/// The two serialized artifacts the service depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Classifier,
    Vectorizer,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Classifier => write!(f, "classifier"),
            ArtifactKind::Vectorizer => write!(f, "vectorizer"),
        }
    }
}

/// Inference pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceStage {
    Vectorization,
    Prediction,
    LabelMapping,
}

impl fmt::Display for InferenceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceStage::Vectorization => write!(f, "vectorization"),
            InferenceStage::Prediction => write!(f, "prediction"),
            InferenceStage::LabelMapping => write!(f, "label mapping"),
        }
    }
}

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add a simple message context
    fn context(self, msg: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| SentimentError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for SentimentError {
    fn from(err: std::io::Error) -> Self {
        SentimentError::Io {
            message: err.to_string(),
            path: None,
        }
    }
}

/// Convert from serde_yaml::Error
impl From<serde_yaml::Error> for SentimentError {
    fn from(err: serde_yaml::Error) -> Self {
        SentimentError::Config {
            message: err.to_string(),
            path: None,
        }
    }
}
