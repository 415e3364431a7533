//! Bounded-memory online clustering.
//!
//! Summarizes an unbounded stream of vectors with at most `N` weighted
//! centroids, without storing the points themselves.
//!
//! ## The Update Rule
//!
//! Every incoming point `p` is added to the nearest cluster (nearest in
//! kernel distance, see [`crate::kernel`]):
//!
//! ```text
//! w ← w + k̂(c, p)
//! c ← c + (p - c) / w
//! ```
//!
//! This is an online weighted mean whose learning rate is the reciprocal of
//! the accumulated kernel mass rather than a fixed schedule: a heavy cluster
//! barely moves, a fresh one moves a lot.
//!
//! ## The Merge Rule
//!
//! Then, if the engine is at capacity, the two closest clusters merge:
//!
//! ```text
//! c ← (c₁·w₁ + c₂·w₂) / (w₁ + w₂)
//! w ← w₁ + w₂
//! ```
//!
//! Finally every point opens its own singleton cluster, so each point gets a
//! representative of its own before merging decides what survives.
//!
//! ## Closest Pair
//!
//! Pairwise distances are cached in a min-heap with lazy invalidation
//! ([`ClusterDistance`] records). Only entries touching a cluster whose
//! center changed are recomputed; everything else stays cached.
//!
//! ## Cost
//!
//! - **Time** per point: `O(N·d)` for the nearest scan and the refreshes,
//!   plus `O(N log N)` heap work.
//! - **Space**: `O(N·d + N²)`, independent of stream length.
//!
//! ## Usage
//!
//! ```rust
//! use kernclust::online::{OnlineClustering, OnlineConfig};
//!
//! let mut engine = OnlineConfig::new(8).with_sigma(1e-3).build().unwrap();
//! for i in 0..200 {
//!     let t = i as f64;
//!     engine.cluster(&[t % 3.0, (t * 0.5) % 5.0]).unwrap();
//! }
//! assert!(engine.len() <= 8);
//! for c in engine.trimmed_clusters() {
//!     assert!(c.weight() > 0.0);
//! }
//! ```

mod cluster;
mod config;
mod distance;
mod engine;
mod stream;
mod traits;

pub use cluster::Cluster;
pub use config::{OnlineConfig, ShorterInput, DEFAULT_TRIM_RATIO};
pub use distance::{ClusterDistance, ClusterId};
pub use engine::{MergeRecord, OnlineClustering};
pub use stream::StreamClustering;
pub use traits::Clustering;
