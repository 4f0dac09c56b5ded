//! # tweet-sentiment
//!
//! Binary sentiment classification for short social-media posts.
//!
//! Raw text goes through a fixed normalization pipeline (letters only,
//! lowercase, English stopword removal, Porter stemming), is vectorized with
//! a pre-fitted bag-of-words vocabulary and scored by a pre-trained linear
//! classifier. The result is served over HTTP or used from the CLI.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use tweet_sentiment::{SentimentService, TweetNormalizer};
//!
//! let service = SentimentService::load(
//!     Path::new("trained_model.json"),
//!     Path::new("vectorizer.json"),
//!     TweetNormalizer::new()?,
//! );
//! let result = service.classify("I love this!")?;
//! println!("{} {}", result.sentiment, result.sentiment.emoji());
//! ```
//!
//! ## Artifacts
//!
//! | File | Contents |
//! |------|----------|
//! | `vectorizer.json` | vocabulary, optional idf weights, norm |
//! | `trained_model.json` | coefficients, intercepts, class labels |

pub mod core;
pub mod inference;
pub mod models;
pub mod server;
pub mod text;

// Core re-exports
pub use core::{
    error::{Result, ResultExt, SentimentError},
    traits::{Classifier, Loadable, ModelComponent, Prediction, SparseVector, Vectorizer},
};

pub use inference::{Classification, ClassifyError, HealthStatus, Sentiment, SentimentService};
pub use models::{BagOfWordsVectorizer, LinearClassifier};
pub use server::{ServerConfig, SentimentServer};
pub use text::{PorterStemmer, StopwordFilter, TweetNormalizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default maximum tweet length, in characters after trimming
pub const MAX_TWEET_CHARS: usize = 500;
