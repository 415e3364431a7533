//! Engine configuration.

use super::engine::OnlineClustering;
use crate::error::{Error, Result};
use crate::kernel::DEFAULT_SIGMA;

/// Default fraction of the mean weight below which a cluster is trimmed.
pub const DEFAULT_TRIM_RATIO: f64 = 0.1;

/// What to do with a point shorter than the widest point seen so far.
///
/// Longer points always grow every existing center with zeros. Shorter ones
/// are a policy choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShorterInput {
    /// Return [`Error::DimensionMismatch`] and leave the engine untouched.
    #[default]
    Reject,
    /// Pad the point with trailing zeros.
    ZeroPad,
}

/// Builder for [`OnlineClustering`].
///
/// ```rust
/// use kernclust::{OnlineConfig, ShorterInput};
///
/// let engine = OnlineConfig::new(16)
///     .with_sigma(1e-3)
///     .with_shorter_input(ShorterInput::ZeroPad)
///     .build()
///     .unwrap();
/// assert_eq!(engine.capacity(), 16);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OnlineConfig {
    /// Maximum number of live clusters.
    capacity: usize,
    /// Gaussian bandwidth.
    sigma: f64,
    /// Trim threshold as a fraction of the mean cluster weight.
    trim_ratio: f64,
    /// Policy for points shorter than the current dimensionality.
    shorter_input: ShorterInput,
}

impl OnlineConfig {
    /// Configuration for an engine holding at most `capacity` clusters.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sigma: DEFAULT_SIGMA,
            trim_ratio: DEFAULT_TRIM_RATIO,
            shorter_input: ShorterInput::Reject,
        }
    }

    /// Set the Gaussian bandwidth.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the trim ratio used by `trimmed_clusters`.
    pub fn with_trim_ratio(mut self, trim_ratio: f64) -> Self {
        self.trim_ratio = trim_ratio;
        self
    }

    /// Set the policy for points shorter than the current dimensionality.
    pub fn with_shorter_input(mut self, policy: ShorterInput) -> Self {
        self.shorter_input = policy;
        self
    }

    /// Maximum number of live clusters.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Gaussian bandwidth.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Trim ratio.
    pub fn trim_ratio(&self) -> f64 {
        self.trim_ratio
    }

    /// Shorter-input policy.
    pub fn shorter_input(&self) -> ShorterInput {
        self.shorter_input
    }

    /// Check every parameter.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity {
                requested: self.capacity,
            });
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "sigma",
                message: "must be finite and > 0",
            });
        }
        if !(0.0..=1.0).contains(&self.trim_ratio) {
            return Err(Error::InvalidParameter {
                name: "trim_ratio",
                message: "must be in [0, 1]",
            });
        }
        Ok(())
    }

    /// Validate and build the engine.
    pub fn build(self) -> Result<OnlineClustering> {
        OnlineClustering::with_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = OnlineConfig::new(8);
        assert_eq!(cfg.capacity(), 8);
        assert_eq!(cfg.sigma(), DEFAULT_SIGMA);
        assert_eq!(cfg.trim_ratio(), DEFAULT_TRIM_RATIO);
        assert_eq!(cfg.shorter_input(), ShorterInput::Reject);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = OnlineConfig::new(0).build().unwrap_err();
        assert_eq!(err, Error::InvalidCapacity { requested: 0 });
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        for sigma in [0.0, -1e-5, f64::NAN, f64::INFINITY] {
            let err = OnlineConfig::new(4).with_sigma(sigma).validate().unwrap_err();
            assert!(matches!(err, Error::InvalidParameter { name: "sigma", .. }));
        }
        for ratio in [-0.1, 1.5, f64::NAN] {
            let err = OnlineConfig::new(4)
                .with_trim_ratio(ratio)
                .validate()
                .unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidParameter {
                    name: "trim_ratio",
                    ..
                }
            ));
        }
    }
}
