//! Text processing modules
//!
//! - Tweet normalization (letter filtering, lowercasing, stopwords, stemming)
//! - NLTK English stopword list
//! - Porter stemmer

mod normalizer;
mod stemmer;
mod stopwords;

pub use normalizer::TweetNormalizer;
pub use stemmer::PorterStemmer;
pub use stopwords::{StopwordFilter, ENGLISH_STOPWORDS};
