//! # kernclust
//!
//! Bounded-memory online clustering: at most `N` weighted centroids for an
//! unbounded stream of vectors, updated one point at a time under a
//! normalized Gaussian kernel.
//!
//! - [`vector`]: elementwise arithmetic.
//! - [`kernel`]: Gaussian kernel, normalization, kernel distance.
//! - [`online`]: clusters, the closest-pair cache, and the engine.
//!
//! Enable the `ndarray` feature to ingest `ArrayView2` rows directly.

/// Error types used across `kernclust`.
pub mod error;
pub mod kernel;
pub mod online;
pub mod vector;

pub use error::{Error, Result};
pub use kernel::{Gaussian, Kernel, Normalized, NormalizedGaussian, DEFAULT_SIGMA, SELF_DISTANCE};
pub use online::{
    Cluster, ClusterDistance, ClusterId, Clustering, MergeRecord, OnlineClustering, OnlineConfig,
    ShorterInput, StreamClustering,
};
