//! Batch clustering trait.

use crate::error::Result;

/// Trait for clustering a whole dataset at once.
pub trait Clustering {
    /// Fit the model to data and return cluster assignments.
    ///
    /// Returns one label per input point.
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>>;

    /// Upper bound on the number of clusters.
    fn n_clusters(&self) -> usize;
}
