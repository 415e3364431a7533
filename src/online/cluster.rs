//! A single incrementally-updated weighted centroid.

use crate::error::Result;
use crate::kernel::Kernel;
use crate::vector;
use core::fmt;

/// Cluster summary: a center and the kernel mass it has absorbed.
///
/// `weight` is accumulated kernel similarity, not a point count. It starts at
/// the self-similarity of the first point, so it is positive from creation
/// and the first [`add`](Cluster::add) never divides by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    center: Vec<f64>,
    weight: f64,
}

impl Cluster {
    /// Singleton cluster at `center`, weighted `k(center, center)`.
    pub fn new<K: Kernel>(center: Vec<f64>, kernel: &K) -> Self {
        let weight = kernel.similarity(&center, &center);
        Self { center, weight }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(center: Vec<f64>, weight: f64) -> Self {
        Self { center, weight }
    }

    /// Current centroid.
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Accumulated kernel mass.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Length of the center.
    pub fn dim(&self) -> usize {
        self.center.len()
    }

    /// Absorb one point.
    ///
    /// ```text
    /// w ← w + k(c, p)
    /// c ← c + (p - c) / w
    /// ```
    ///
    /// Later points move the center less: the step size is the reciprocal of
    /// the mass accumulated so far. State is only written once every step
    /// succeeded.
    pub fn add<K: Kernel>(&mut self, point: &[f64], kernel: &K) -> Result<()> {
        let weight = self.weight + kernel.similarity(&self.center, point);
        let delta = vector::subtract(point, &self.center)?;
        let step = vector::divide(&delta, weight)?;
        self.center = vector::add(&self.center, &step)?;
        self.weight = weight;
        Ok(())
    }

    /// Absorb `other`: weighted average of the centers, summed weights.
    ///
    /// `other` is left as is; the caller discards it.
    pub fn merge(&mut self, other: &Cluster) -> Result<()> {
        let total = self.weight + other.weight;
        let sum = vector::add(
            &vector::scale(&self.center, self.weight),
            &vector::scale(&other.center, other.weight),
        )?;
        self.center = vector::divide(&sum, total)?;
        self.weight = total;
        Ok(())
    }

    /// Pad the center with zeros up to `dim`. Never shrinks.
    pub fn resize(&mut self, dim: usize) {
        vector::resize_with_zeros(&mut self.center, dim);
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cluster({:?}, {})", self.center, self.weight)
    }
}
