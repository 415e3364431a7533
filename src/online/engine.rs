//! The bounded online clustering engine.

use super::cluster::Cluster;
use super::config::{OnlineConfig, ShorterInput};
use super::distance::{ClusterDistance, ClusterId, DistanceCache};
use crate::error::{Error, Result};
use crate::kernel::NormalizedGaussian;

#[cfg(feature = "ndarray")]
use ndarray::ArrayView2;

/// A merge performed by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeRecord {
    /// Cluster that absorbed the other one.
    pub survivor: ClusterId,
    /// Cluster that was absorbed and dropped.
    pub absorbed: ClusterId,
    /// Kernel distance between the two centers at merge time.
    pub distance: f64,
}

#[derive(Debug, Clone)]
struct Slot {
    id: ClusterId,
    cluster: Cluster,
}

/// Online clustering with at most `capacity` live clusters.
///
/// Each call to [`cluster`](Self::cluster):
///
/// 1. grows every center with zeros if the point is wider than any seen;
/// 2. adds the point to the nearest cluster (ties: first in insertion order)
///    and refreshes that cluster's cached distances;
/// 3. if the engine is at capacity, merges the closest pair of clusters;
/// 4. opens a new singleton cluster at the point.
///
/// The live cluster count is at most `capacity` after every call.
///
/// ```rust
/// use kernclust::OnlineClustering;
///
/// let mut engine = OnlineClustering::new(4).unwrap();
/// for i in 0..100 {
///     let x = (i % 7) as f64;
///     engine.cluster(&[x, 2.0 * x, 1.0]).unwrap();
/// }
/// assert!(engine.len() <= 4);
/// assert!(!engine.trimmed_clusters().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct OnlineClustering {
    config: OnlineConfig,
    kernel: NormalizedGaussian,
    /// Live clusters, in insertion order.
    slots: Vec<Slot>,
    /// Widest point seen so far.
    dim: usize,
    cache: DistanceCache,
    next_id: u64,
    n_points: u64,
    n_merges: u64,
    last_merge: Option<MergeRecord>,
}

impl OnlineClustering {
    /// Engine holding at most `capacity` clusters, with default settings.
    pub fn new(capacity: usize) -> Result<Self> {
        OnlineConfig::new(capacity).build()
    }

    /// Engine from a full configuration.
    pub fn with_config(config: OnlineConfig) -> Result<Self> {
        config.validate()?;
        let kernel = NormalizedGaussian::with_sigma(config.sigma())?;
        log::debug!(
            "online clustering: capacity={} sigma={} trim_ratio={}",
            config.capacity(),
            config.sigma(),
            config.trim_ratio()
        );
        Ok(Self {
            kernel,
            slots: Vec::new(),
            dim: 0,
            cache: DistanceCache::new(),
            next_id: 0,
            n_points: 0,
            n_merges: 0,
            last_merge: None,
            config,
        })
    }

    /// Ingest one point.
    ///
    /// Input is validated before anything is touched: an empty point, a
    /// non-finite component, or (under [`ShorterInput::Reject`]) a point
    /// narrower than [`dim`](Self::dim) is an error and leaves the engine as
    /// it was. If the closest-pair cache has fallen out of step with the
    /// clusters, [`Error::InconsistentState`] is returned rather than letting
    /// the live count pass the capacity.
    pub fn cluster(&mut self, point: &[f64]) -> Result<()> {
        let point = self.prepare(point)?;

        if point.len() > self.dim {
            self.grow(point.len());
        }

        if let Some((idx, _)) = self.nearest(&point) {
            self.slots[idx].cluster.add(&point, &self.kernel)?;
            self.refresh(idx);
        }

        if self.slots.len() >= self.config.capacity() {
            if self.slots.len() < 2 {
                // Capacity 1: the point was absorbed above and there is no
                // pair to merge, so no singleton is opened.
                self.n_points += 1;
                return Ok(());
            }
            let pair = self.cache.pop_min().ok_or(Error::InconsistentState {
                context: "no cached pair while at capacity",
            })?;
            self.merge_pair(pair)?;
        }

        if self.slots.len() >= self.config.capacity() {
            return Err(Error::InconsistentState {
                context: "opening a cluster would exceed capacity",
            });
        }
        self.open(point);
        self.n_points += 1;
        Ok(())
    }

    /// Ingest every point of `points`, stopping at the first error.
    ///
    /// Returns the number of points ingested.
    pub fn cluster_all<I, P>(&mut self, points: I) -> Result<usize>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[f64]>,
    {
        let mut n = 0;
        for p in points {
            self.cluster(p.as_ref())?;
            n += 1;
        }
        Ok(n)
    }

    /// Ingest every row of `rows`.
    #[cfg(feature = "ndarray")]
    pub fn cluster_rows(&mut self, rows: ArrayView2<'_, f64>) -> Result<usize> {
        let mut n = 0;
        for row in rows.outer_iter() {
            match row.as_slice() {
                Some(slice) => self.cluster(slice)?,
                None => self.cluster(&row.to_vec())?,
            }
            n += 1;
        }
        Ok(n)
    }

    /// Clusters whose weight is at least `trim_ratio` times the mean weight
    /// of the positive-weight clusters.
    ///
    /// A noise filter, not a guarantee: it may return none, some or all
    /// clusters. Returned in insertion order.
    pub fn trimmed_clusters(&self) -> Vec<&Cluster> {
        let (sum, count) = self
            .clusters()
            .map(Cluster::weight)
            .filter(|&w| w > 0.0)
            .fold((0.0, 0usize), |(s, c), w| (s + w, c + 1));
        if count == 0 {
            return Vec::new();
        }
        let threshold = self.config.trim_ratio() * (sum / count as f64);
        self.clusters().filter(|c| c.weight() >= threshold).collect()
    }

    /// Index into [`trimmed_clusters`](Self::trimmed_clusters) of the
    /// trimmed cluster nearest to `point`. `None` if nothing survives
    /// trimming.
    ///
    /// Query only. A point narrower than the centers reads as zero-padded.
    pub fn predict(&self, point: &[f64]) -> Result<Option<usize>> {
        check_finite(point)?;
        let trimmed = self.trimmed_clusters();
        Ok(nearest_in(&self.kernel, trimmed.into_iter(), point).map(|(i, _)| i))
    }

    /// Position in [`clusters`](Self::clusters) and kernel distance of the
    /// cluster nearest to `point`. Ties go to the earliest cluster.
    pub fn nearest(&self, point: &[f64]) -> Option<(usize, f64)> {
        nearest_in(&self.kernel, self.clusters(), point)
    }

    /// Closest pair of live clusters, as currently cached.
    pub fn closest_pair(&self) -> Option<ClusterDistance> {
        self.cache.peek_min()
    }

    /// Live clusters, in insertion order.
    pub fn clusters(&self) -> impl ExactSizeIterator<Item = &Cluster> + '_ {
        self.slots.iter().map(|s| &s.cluster)
    }

    /// Live clusters with their ids, in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (ClusterId, &Cluster)> + '_ {
        self.slots.iter().map(|s| (s.id, &s.cluster))
    }

    /// Live cluster with id `id`.
    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.slots.iter().find(|s| s.id == id).map(|s| &s.cluster)
    }

    /// Number of live clusters.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no point has been clustered since creation or the last reset.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of live clusters.
    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    /// Widest point seen so far.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Points ingested.
    pub fn n_points(&self) -> u64 {
        self.n_points
    }

    /// Merges performed.
    pub fn n_merges(&self) -> u64 {
        self.n_merges
    }

    /// Most recent merge.
    pub fn last_merge(&self) -> Option<MergeRecord> {
        self.last_merge
    }

    /// Number of live entries in the distance cache.
    pub fn cached_pairs(&self) -> usize {
        self.cache.len()
    }

    /// Kernel used for similarities and distances.
    pub fn kernel(&self) -> &NormalizedGaussian {
        &self.kernel
    }

    /// Engine configuration.
    pub fn config(&self) -> &OnlineConfig {
        &self.config
    }

    /// Drop every cluster and counter; keep the configuration.
    pub fn reset(&mut self) {
        log::debug!(
            "resetting online clustering: {} clusters, {} points",
            self.slots.len(),
            self.n_points
        );
        self.slots.clear();
        self.cache.clear();
        self.dim = 0;
        self.n_points = 0;
        self.n_merges = 0;
        self.last_merge = None;
    }

    fn prepare(&self, point: &[f64]) -> Result<Vec<f64>> {
        check_finite(point)?;
        let mut owned = point.to_vec();
        if owned.len() < self.dim {
            match self.config.shorter_input() {
                ShorterInput::Reject => {
                    return Err(Error::DimensionMismatch {
                        expected: self.dim,
                        found: owned.len(),
                    })
                }
                ShorterInput::ZeroPad => owned.resize(self.dim, 0.0),
            }
        }
        Ok(owned)
    }

    fn grow(&mut self, dim: usize) {
        log::trace!("growing centers from {} to {} dimensions", self.dim, dim);
        for slot in &mut self.slots {
            slot.cluster.resize(dim);
        }
        self.dim = dim;
    }

    /// Recompute every cached distance touching `slots[idx]`.
    fn refresh(&mut self, idx: usize) {
        let id = self.slots[idx].id;
        self.cache.invalidate(id);
        for (j, other) in self.slots.iter().enumerate() {
            if j != idx {
                let d = self
                    .kernel
                    .distance(other.cluster.center(), self.slots[idx].cluster.center());
                self.cache.insert(other.id, id, d);
            }
        }
    }

    /// `pair.first()` absorbs `pair.second()`.
    fn merge_pair(&mut self, pair: ClusterDistance) -> Result<()> {
        let (Some(fi), Some(si)) = (self.position(pair.first()), self.position(pair.second()))
        else {
            log::error!("distance cache references a dead cluster: {}", pair);
            return Err(Error::InconsistentState {
                context: "cached pair names a dead cluster",
            });
        };

        if fi < si {
            let (head, tail) = self.slots.split_at_mut(si);
            head[fi].cluster.merge(&tail[0].cluster)?;
        } else {
            let (head, tail) = self.slots.split_at_mut(fi);
            tail[0].cluster.merge(&head[si].cluster)?;
        }
        let absorbed = self.slots.remove(si);
        self.cache.forget(absorbed.id);

        let fi = if si < fi { fi - 1 } else { fi };
        self.refresh(fi);

        log::trace!(
            "merged cluster {} into {} at distance {}",
            absorbed.id,
            pair.first(),
            pair.distance()
        );
        self.n_merges += 1;
        self.last_merge = Some(MergeRecord {
            survivor: pair.first(),
            absorbed: absorbed.id,
            distance: pair.distance(),
        });
        Ok(())
    }

    /// Open a singleton at `point` and cache its distance to every cluster.
    fn open(&mut self, point: Vec<f64>) {
        let id = ClusterId::new(self.next_id);
        self.next_id += 1;
        let cluster = Cluster::new(point, &self.kernel);
        self.cache.register(id);
        for other in &self.slots {
            let d = self.kernel.distance(other.cluster.center(), cluster.center());
            self.cache.insert(other.id, id, d);
        }
        self.slots.push(Slot { id, cluster });
    }

    fn position(&self, id: ClusterId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }
}

/// Strict `<` scan: the first of several equidistant clusters wins.
fn nearest_in<'a>(
    kernel: &NormalizedGaussian,
    clusters: impl Iterator<Item = &'a Cluster>,
    point: &[f64],
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in clusters.enumerate() {
        let d = kernel.distance(c.center(), point);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best
}

fn check_finite(point: &[f64]) -> Result<()> {
    if point.is_empty() {
        return Err(Error::EmptyInput);
    }
    if let Some(index) = point.iter().position(|v| !v.is_finite()) {
        return Err(Error::NonFiniteInput { index });
    }
    Ok(())
}
