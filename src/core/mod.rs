//! Core abstractions shared by every layer of the service
//!
//! - `error`: structured error type and result alias
//! - `traits`: the vectorizer/classifier capabilities and their data types

pub mod error;
pub mod traits;

pub use error::{
    ArtifactKind, InferenceStage, Result, ResultExt, SentimentError,
};
pub use traits::{Classifier, Loadable, ModelComponent, Prediction, SparseVector, Vectorizer};
