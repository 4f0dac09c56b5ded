//! Inference module for sentiment classification
//!
//! - SentimentService: process-wide context holding the loaded artifacts
//! - Sentiment / Classification: results handed back to callers
//! - ClassifyError: request rejection reasons

mod service;

pub use service::{
    Classification, ClassifyError, HealthStatus, Sentiment, SentimentService,
};
