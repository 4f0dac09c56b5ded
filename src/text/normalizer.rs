//! Tweet normalization
//!
//! Reproduces the preprocessing the vectorizer vocabulary was built with:
//! - every character outside `[a-zA-Z]` becomes a space
//! - lowercase, split on whitespace
//! - drop NLTK English stopwords
//! - Porter-stem what is left and join with single spaces
//!
//! Any change to these steps silently invalidates a trained model.

use regex::Regex;
use tracing::warn;

use crate::core::error::{Result, ResultExt};
use crate::text::stemmer::PorterStemmer;
use crate::text::stopwords::StopwordFilter;

/// Text normalizer applied identically at training and inference time
#[derive(Debug, Clone)]
pub struct TweetNormalizer {
    non_alpha: Regex,
    stopwords: StopwordFilter,
    stemmer: PorterStemmer,
}

impl TweetNormalizer {
    /// Create a normalizer with the English stopword list
    pub fn new() -> Result<Self> {
        Self::with_stopwords(StopwordFilter::english())
    }

    /// Create a normalizer with a custom stopword filter
    pub fn with_stopwords(stopwords: StopwordFilter) -> Result<Self> {
        let non_alpha = Regex::new("[^a-zA-Z]").context("compiling letter filter")?;
        Ok(Self::from_parts(non_alpha, stopwords, PorterStemmer::new()))
    }

    /// Assemble a normalizer from its steps; `non_alpha` matches what gets blanked out
    pub(crate) fn from_parts(
        non_alpha: Regex,
        stopwords: StopwordFilter,
        stemmer: PorterStemmer,
    ) -> Self {
        Self {
            non_alpha,
            stopwords,
            stemmer,
        }
    }

    /// Normalize input text, degrading to the lowercased input on failure
    pub fn normalize(&self, text: &str) -> String {
        match self.try_normalize(text) {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!("Normalization failed, using lowercased input: {}", e);
                text.to_lowercase()
            }
        }
    }

    /// Normalize input text, reporting which step failed
    pub fn try_normalize(&self, text: &str) -> Result<String> {
        let letters_only = self.non_alpha.replace_all(text, " ");
        let lowered = letters_only.to_lowercase();

        let mut stems = Vec::new();
        for token in lowered.split_whitespace() {
            if self.stopwords.is_stopword(token) {
                continue;
            }
            stems.push(self.stemmer.stem(token)?);
        }

        Ok(stems.join(" "))
    }
}
