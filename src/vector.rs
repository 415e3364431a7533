//! Elementwise arithmetic over `f64` vectors.
//!
//! Binary operations never coerce shapes: unequal lengths are an error.
//! Callers that need to combine vectors of different lengths resize first
//! (see [`resize_with_zeros`]).

use crate::error::{Error, Result};

#[inline]
fn check_len(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch {
            expected: x.len(),
            found: y.len(),
        });
    }
    Ok(())
}

/// `x + y`, elementwise.
pub fn add(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    check_len(x, y)?;
    Ok(x.iter().zip(y).map(|(a, b)| a + b).collect())
}

/// `x - y`, elementwise.
pub fn subtract(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    check_len(x, y)?;
    Ok(x.iter().zip(y).map(|(a, b)| a - b).collect())
}

/// `x * c`.
pub fn scale(x: &[f64], c: f64) -> Vec<f64> {
    x.iter().map(|v| v * c).collect()
}

/// `x / c`.
///
/// Computed as multiplication by the reciprocal. A zero divisor, or one whose
/// reciprocal is not finite, is reported instead of producing infinities.
pub fn divide(x: &[f64], c: f64) -> Result<Vec<f64>> {
    let inv = c.recip();
    if c == 0.0 || !inv.is_finite() {
        return Err(Error::DegenerateDivision {
            context: "vector divide",
        });
    }
    Ok(scale(x, inv))
}

/// Euclidean (L2) norm.
pub fn magnitude(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Squared Euclidean distance, without materializing `x - y`.
#[inline]
pub fn squared_distance(x: &[f64], y: &[f64]) -> Result<f64> {
    check_len(x, y)?;
    Ok(x.iter()
        .zip(y)
        .map(|(a, b)| {
            let d = a - b;
            d * d
        })
        .sum())
}

/// Pad `v` with trailing zeros up to `dim`. Never shrinks.
pub fn resize_with_zeros(v: &mut Vec<f64>, dim: usize) {
    if v.len() < dim {
        v.resize(dim, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_subtract() {
        let x = [1.0, 2.0, 3.0];
        let y = [0.5, -2.0, 1.0];
        assert_eq!(add(&x, &y).unwrap(), vec![1.5, 0.0, 4.0]);
        assert_eq!(subtract(&x, &y).unwrap(), vec![0.5, 4.0, 2.0]);
    }

    #[test]
    fn test_length_mismatch_errors() {
        let err = add(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
        assert!(subtract(&[1.0], &[1.0, 2.0]).is_err());
        assert!(squared_distance(&[], &[0.0]).is_err());
    }

    #[test]
    fn test_scale_divide() {
        assert_eq!(scale(&[1.0, -2.0], 3.0), vec![3.0, -6.0]);
        assert_eq!(divide(&[2.0, 4.0], 2.0).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_divide_by_zero_is_reported() {
        assert!(matches!(
            divide(&[1.0], 0.0),
            Err(Error::DegenerateDivision { .. })
        ));
        assert!(matches!(
            divide(&[1.0], -0.0),
            Err(Error::DegenerateDivision { .. })
        ));
        // Subnormal divisor: reciprocal overflows.
        assert!(divide(&[1.0], f64::MIN_POSITIVE / 4.0).is_err());
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(magnitude(&[3.0, 4.0]), 5.0);
        assert_eq!(magnitude(&[0.0, 0.0, 0.0]), 0.0);
        assert_eq!(magnitude(&[]), 0.0);
        assert!(magnitude(&[-1.0]) > 0.0);
    }

    #[test]
    fn test_squared_distance_matches_magnitude() {
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, 6.0, 3.0];
        let d = magnitude(&subtract(&x, &y).unwrap());
        assert!((squared_distance(&x, &y).unwrap() - d * d).abs() < 1e-12);
    }

    #[test]
    fn test_resize_never_shrinks() {
        let mut v = vec![1.0, 2.0];
        resize_with_zeros(&mut v, 4);
        assert_eq!(v, vec![1.0, 2.0, 0.0, 0.0]);
        resize_with_zeros(&mut v, 1);
        assert_eq!(v.len(), 4);
    }
}
