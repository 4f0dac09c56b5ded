//! Core traits defining the model interfaces
//!
//! The trained artifacts are opaque to the rest of the service. Everything
//! downstream of the loader only sees these two capabilities: turn text into
//! a feature vector, and turn a feature vector into a class label.

use std::path::Path;

use super::error::Result;

/// Base trait for all model components
pub trait ModelComponent: Send + Sync {
    /// Component name for identification and logging
    fn name(&self) -> &str;
}

/// Components restored from a serialized artifact on disk
pub trait Loadable: ModelComponent {
    /// Load from a file path
    fn load<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        Self: Sized;
}

/// Maps normalized text onto the fixed feature space learned at training time
pub trait Vectorizer: ModelComponent {
    /// Dimension of the produced vectors (vocabulary size)
    fn dimension(&self) -> usize;

    /// Vectorize a normalized token string
    fn transform(&self, text: &str) -> Result<SparseVector>;
}

/// Maps a feature vector onto a class label
pub trait Classifier: ModelComponent {
    /// Number of features the model was fit on
    fn n_features(&self) -> usize;

    /// Class labels the model can emit, in model order
    fn classes(&self) -> &[i64];

    /// Predict the class of a single sample
    fn predict(&self, features: &SparseVector) -> Result<Prediction>;
}

/// Sparse feature vector with entries sorted by index
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from unsorted entries; duplicate indices are summed and zeros dropped
    pub fn new(dimension: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(index, _)| *index);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            if let Some((last, acc)) = merged.last_mut() {
                if *last == index {
                    *acc += value;
                    continue;
                }
            }
            merged.push((index, value));
        }
        merged.retain(|(_, value)| *value != 0.0);
        Self {
            dimension,
            entries: merged,
        }
    }

    /// All-zero vector
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Value at an index (zero when absent)
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Dot product with a dense weight row
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(index, value)| dense.get(*index).map(|w| w * value))
            .sum()
    }

    /// Scale every entry in place
    pub fn scale(&mut self, factor: f64) {
        for (_, value) in &mut self.entries {
            *value *= factor;
        }
    }

    /// Apply a function to every stored entry
    pub fn map_values<F: FnMut(usize, f64) -> f64>(&mut self, mut f: F) {
        for (index, value) in &mut self.entries {
            *value = f(*index, *value);
        }
    }
}

/// Output of a classifier for one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Class label as stored in the model
    pub class: i64,
    /// Decision function value backing the choice
    pub score: f64,
}
