//! Batch adapter over the online engine.

use super::config::OnlineConfig;
use super::engine::OnlineClustering;
use super::traits::Clustering;
use crate::error::{Error, Result};

/// Runs a dataset through a fresh [`OnlineClustering`] in order, then labels
/// every point with its nearest trimmed cluster.
///
/// Labels index into `trimmed_clusters()` of the fitted engine. Because the
/// engine is online, the result depends on the order of `data`.
#[derive(Debug, Clone)]
pub struct StreamClustering {
    config: OnlineConfig,
}

impl StreamClustering {
    /// Adapter with default settings and at most `capacity` clusters.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: OnlineConfig::new(capacity),
        }
    }

    /// Adapter with a full engine configuration.
    pub fn with_config(config: OnlineConfig) -> Self {
        Self { config }
    }

    /// Stream `data` through a fresh engine and return it.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<OnlineClustering> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        let d = data[0].len();
        if let Some(p) = data.iter().find(|p| p.len() != d) {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: p.len(),
            });
        }

        let mut engine = self.config.clone().build()?;
        let _ = engine.cluster_all(data)?;
        Ok(engine)
    }
}

impl Clustering for StreamClustering {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let engine = self.fit(data)?;
        data.iter()
            .map(|p| engine.predict(p)?.ok_or(Error::EmptyInput))
            .collect()
    }

    fn n_clusters(&self) -> usize {
        self.config.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn two_blobs() -> Vec<Vec<f64>> {
        let a = (0..10).map(|i| vec![i as f64 * 0.01, 0.0]);
        let b = (0..10).map(|i| vec![1000.0 + i as f64 * 0.01, 1000.0]);
        a.chain(b).collect()
    }

    #[test]
    fn test_blobs_get_disjoint_labels() {
        let data = two_blobs();
        let sc = StreamClustering::new(8);
        let labels = sc.fit_predict(&data).unwrap();
        assert_eq!(labels.len(), data.len());

        let a: HashSet<usize> = labels[..10].iter().copied().collect();
        let b: HashSet<usize> = labels[10..].iter().copied().collect();
        assert!(a.is_disjoint(&b), "a={a:?} b={b:?}");

        let engine = sc.fit(&data).unwrap();
        let n = engine.trimmed_clusters().len();
        assert!(labels.iter().all(|&l| l < n));
        assert_eq!(sc.n_clusters(), 8);
    }

    #[test]
    fn test_empty_input_error() {
        let data: Vec<Vec<f64>> = vec![];
        let result = StreamClustering::new(2).fit_predict(&data);
        assert_eq!(result.unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_ragged_input_error() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        let err = StreamClustering::new(2).fit_predict(&data).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn test_invalid_config_surfaces() {
        let data = vec![vec![0.0]];
        let err = StreamClustering::new(0).fit_predict(&data).unwrap_err();
        assert_eq!(err, Error::InvalidCapacity { requested: 0 });
    }
}
