//! Similarity kernels and the kernel-induced distance.
//!
//! # Gaussian kernel
//!
//! ```text
//! k(x, y) = exp(-σ · ||x - y||²)
//! ```
//!
//! The default bandwidth is tiny ([`DEFAULT_SIGMA`] = 1e-5) so that, for
//! unscaled data, distinct points stay resolvably similar instead of
//! collapsing to 0 or 1.
//!
//! # Normalization
//!
//! [`Normalized`] wraps any symmetric positive kernel:
//!
//! ```text
//! k̂(x, y) = k(x, y) / sqrt(k(x, x) + k(y, y))
//! ```
//!
//! The cluster update rule adds `k̂(center, point)` to the cluster weight, so
//! the per-point contribution is tied to the kernel's own self-similarity.
//!
//! # Distance
//!
//! The general squared kernel distance is `k(x,x) - 2k(x,y) + k(y,y)`. For
//! the Gaussian, the raw self-similarity is always 1, which gives:
//!
//! ```text
//! d(x, y) = 2 - 2 · k̂(x, y)
//! ```
//!
//! Note that the cross term is the *normalized* kernel while the self terms
//! are the *raw* ones. The formula is kept exactly as is. Consequences:
//!
//! - `d(x, x) = 2 - √2` ([`SELF_DISTANCE`]), not 0. It is still the minimum
//!   of `d(x, ·)` and the same for every `x`.
//! - Values lie in `[2 - √2, 2)`.
//!
//! The shortcut is only valid for kernels with constant self-similarity, so
//! [`NormalizedGaussian::distance`] exists only for the Gaussian and no
//! generic distance is offered on [`Kernel`].

use crate::error::{Error, Result};
use crate::vector;

/// Default Gaussian bandwidth.
pub const DEFAULT_SIGMA: f64 = 1e-5;

/// `2 - √2`: kernel distance of any point to itself.
pub const SELF_DISTANCE: f64 = 2.0 - core::f64::consts::SQRT_2;

/// Symmetric positive similarity kernel.
pub trait Kernel {
    /// Similarity between `x` and `y`.
    ///
    /// The engine always passes equal-length inputs. Implementations in this
    /// crate read a shorter input as zero-padded.
    fn similarity(&self, x: &[f64], y: &[f64]) -> f64;
}

/// Gaussian (RBF) kernel `exp(-σ · ||x - y||²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    sigma: f64,
}

impl Gaussian {
    /// Create a Gaussian kernel with bandwidth `sigma`.
    pub fn new(sigma: f64) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "sigma",
                message: "must be finite and > 0",
            });
        }
        Ok(Self { sigma })
    }

    /// Bandwidth.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
        }
    }
}

impl Kernel for Gaussian {
    #[inline]
    fn similarity(&self, x: &[f64], y: &[f64]) -> f64 {
        (-self.sigma * padded_squared_distance(x, y)).exp()
    }
}

/// `||x - y||²`, reading missing trailing components of the shorter input as 0.
#[inline]
fn padded_squared_distance(x: &[f64], y: &[f64]) -> f64 {
    let (short, long) = if x.len() <= y.len() { (x, y) } else { (y, x) };
    let head = vector::squared_distance(short, &long[..short.len()]).unwrap_or(0.0);
    let tail: f64 = long[short.len()..].iter().map(|v| v * v).sum();
    head + tail
}

/// Normalizing wrapper `k̂(x, y) = k(x, y) / sqrt(k(x, x) + k(y, y))`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Normalized<K> {
    inner: K,
}

impl<K: Kernel> Normalized<K> {
    /// Wrap `inner`.
    pub fn new(inner: K) -> Self {
        Self { inner }
    }

    /// The wrapped kernel.
    pub fn inner(&self) -> &K {
        &self.inner
    }
}

impl<K: Kernel> Kernel for Normalized<K> {
    #[inline]
    fn similarity(&self, x: &[f64], y: &[f64]) -> f64 {
        let kxy = self.inner.similarity(x, y);
        let kxx = self.inner.similarity(x, x);
        let kyy = self.inner.similarity(y, y);
        kxy / (kxx + kyy).sqrt()
    }
}

/// The kernel the engine clusters with.
pub type NormalizedGaussian = Normalized<Gaussian>;

impl NormalizedGaussian {
    /// Normalized Gaussian with bandwidth `sigma`.
    pub fn with_sigma(sigma: f64) -> Result<Self> {
        Ok(Self::new(Gaussian::new(sigma)?))
    }

    /// Kernel distance `2 - 2 · k̂(x, y)`.
    ///
    /// Symmetric; smaller means more similar. See the module docs for why
    /// `distance(x, x)` is [`SELF_DISTANCE`] rather than zero.
    #[inline]
    pub fn distance(&self, x: &[f64], y: &[f64]) -> f64 {
        2.0 - 2.0 * self.similarity(x, y)
    }
}
