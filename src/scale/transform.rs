//! One-dimensional coordinate transforms used by axis scales.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Output of a clipping [`PowerTransform`] for non-positive input.
pub const CLIP_SENTINEL: f64 = -1000.0;

/// A separable coordinate transform applied element-wise.
pub trait Transform: fmt::Debug + fmt::Display + Send + Sync {
    /// Number of input dimensions.
    fn input_dims(&self) -> usize {
        1
    }

    /// Number of output dimensions.
    fn output_dims(&self) -> usize {
        1
    }

    /// Whether each output dimension depends only on its input dimension.
    fn is_separable(&self) -> bool {
        true
    }

    /// Whether [`Transform::inverted`] is a true inverse.
    fn has_inverse(&self) -> bool;

    /// Transform a single coordinate.
    fn transform_point(&self, a: f64) -> f64;

    /// Transform coordinates element-wise.
    fn transform_non_affine(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&a| self.transform_point(a)).collect()
    }

    /// The transform going the other way.
    fn inverted(&self) -> Box<dyn Transform>;
}

/// Handling of non-positive input to a [`PowerTransform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nonpos {
    /// Map every input `<= 0` to [`CLIP_SENTINEL`].
    #[default]
    Clip,
    /// Leave the computed value (possibly NaN or infinite) in place.
    Mask,
}

impl Nonpos {
    /// Option string for this policy.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Nonpos::Clip => "clip",
            Nonpos::Mask => "mask",
        }
    }
}

impl fmt::Display for Nonpos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nonpos {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "clip" => Ok(Nonpos::Clip),
            "mask" => Ok(Nonpos::Mask),
            other => Err(Error::InvalidScaleOption(format!(
                "nonpos must be \"clip\" or \"mask\", got {other:?}"
            ))),
        }
    }
}

/// Raises coordinates to a fixed exponent.
///
/// `powf` never traps, so zero to a negative exponent or a negative base to a
/// fractional exponent quietly yields infinity or NaN; with [`Nonpos::Clip`]
/// those inputs are replaced by [`CLIP_SENTINEL`] instead.
///
/// # Example
///
/// ```rust
/// use vl_scatter::scale::{Nonpos, PowerTransform, Transform, CLIP_SENTINEL};
///
/// let t = PowerTransform::new(0.5, Nonpos::Clip);
/// assert_eq!(t.transform_non_affine(&[4.0, -1.0]), vec![2.0, CLIP_SENTINEL]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerTransform {
    exponent: f64,
    nonpos: Nonpos,
}

impl PowerTransform {
    /// Create a power transform.
    #[must_use]
    pub fn new(exponent: f64, nonpos: Nonpos) -> Self {
        Self { exponent, nonpos }
    }

    /// The exponent.
    #[must_use]
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// The non-positive input policy.
    #[must_use]
    pub fn nonpos(&self) -> Nonpos {
        self.nonpos
    }
}

impl fmt::Display for PowerTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PowerTransform(exponent={}, nonpos={})", self.exponent, self.nonpos)
    }
}

impl Transform for PowerTransform {
    fn has_inverse(&self) -> bool {
        false
    }

    fn transform_point(&self, a: f64) -> f64 {
        if self.nonpos == Nonpos::Clip && a <= 0.0 {
            return CLIP_SENTINEL;
        }
        a.powf(self.exponent)
    }

    /// Same exponent, unclipped. Not a mathematical inverse.
    fn inverted(&self) -> Box<dyn Transform> {
        Box::new(PowerTransform::new(self.exponent, Nonpos::Mask))
    }
}

/// The identity transform of a linear axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentityTransform;

impl fmt::Display for IdentityTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityTransform()")
    }
}

impl Transform for IdentityTransform {
    fn has_inverse(&self) -> bool {
        true
    }

    fn transform_point(&self, a: f64) -> f64 {
        a
    }

    fn inverted(&self) -> Box<dyn Transform> {
        Box::new(IdentityTransform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_square_root() {
        let t = PowerTransform::new(0.5, Nonpos::Clip);
        assert_relative_eq!(t.transform_point(4.0), 2.0);
        assert_relative_eq!(t.transform_point(9.0), 3.0);
    }

    #[test]
    fn test_clip_non_positive() {
        let t = PowerTransform::new(2.0, Nonpos::Clip);
        assert_eq!(t.transform_point(-1.0), CLIP_SENTINEL);
        assert_eq!(t.transform_point(0.0), CLIP_SENTINEL);
        assert_relative_eq!(t.transform_point(3.0), 9.0);
    }

    #[test]
    fn test_mask_leaves_raw_value() {
        let t = PowerTransform::new(2.0, Nonpos::Mask);
        assert_relative_eq!(t.transform_point(-1.0), 1.0);

        let t = PowerTransform::new(0.5, Nonpos::Mask);
        assert!(t.transform_point(-1.0).is_nan());

        let t = PowerTransform::new(-1.0, Nonpos::Mask);
        assert_eq!(t.transform_point(0.0), f64::INFINITY);
    }

    #[test]
    fn test_clip_keeps_nan_input() {
        let t = PowerTransform::new(2.0, Nonpos::Clip);
        assert!(t.transform_point(f64::NAN).is_nan());
    }

    #[test]
    fn test_transform_non_affine_elementwise() {
        let t = PowerTransform::new(3.0, Nonpos::Clip);
        let out = t.transform_non_affine(&[1.0, 2.0, 0.0, -2.0]);
        assert_eq!(out, vec![1.0, 8.0, CLIP_SENTINEL, CLIP_SENTINEL]);
    }

    #[test]
    fn test_dims_and_flags() {
        let t = PowerTransform::new(2.0, Nonpos::Clip);
        assert_eq!(t.input_dims(), 1);
        assert_eq!(t.output_dims(), 1);
        assert!(t.is_separable());
        assert!(!t.has_inverse());
    }

    #[test]
    fn test_inverted_is_unclipped_same_exponent() {
        let t = PowerTransform::new(2.0, Nonpos::Clip);
        let inv = t.inverted();
        assert_eq!(inv.to_string(), "PowerTransform(exponent=2, nonpos=mask)");
        assert_relative_eq!(inv.transform_point(-1.0), 1.0);
    }

    #[test]
    fn test_display() {
        let t = PowerTransform::new(0.5, Nonpos::Clip);
        assert_eq!(t.to_string(), "PowerTransform(exponent=0.5, nonpos=clip)");
    }

    #[test]
    fn test_nonpos_parse() {
        assert_eq!("clip".parse::<Nonpos>().unwrap(), Nonpos::Clip);
        assert_eq!("mask".parse::<Nonpos>().unwrap(), Nonpos::Mask);
        assert!(matches!("drop".parse::<Nonpos>(), Err(Error::InvalidScaleOption(_))));
        assert_eq!(Nonpos::default(), Nonpos::Clip);
    }

    #[test]
    fn test_identity() {
        let t = IdentityTransform;
        assert_eq!(t.transform_non_affine(&[-3.0, 0.0, 7.5]), vec![-3.0, 0.0, 7.5]);
        assert!(t.has_inverse());
        assert_eq!(t.inverted().transform_point(2.0), 2.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        /// Clipping maps every non-positive input to the sentinel.
        #[test]
        fn prop_clip_non_positive_is_sentinel(a in -1e6f64..=0.0, exponent in -4.0f64..4.0) {
            let t = PowerTransform::new(exponent, Nonpos::Clip);
            prop_assert_eq!(t.transform_point(a), CLIP_SENTINEL);
        }

        /// Positive input is unaffected by the clipping policy.
        #[test]
        fn prop_positive_input_ignores_policy(a in 1e-6f64..1e6, exponent in -4.0f64..4.0) {
            let clip = PowerTransform::new(exponent, Nonpos::Clip).transform_point(a);
            let mask = PowerTransform::new(exponent, Nonpos::Mask).transform_point(a);
            prop_assert_eq!(clip.to_bits(), mask.to_bits());
            prop_assert!((clip - a.powf(exponent)).abs() <= f64::EPSILON * clip.abs());
        }

        /// Exponent one is the identity on positive input.
        #[test]
        fn prop_exponent_one_identity(a in 1e-6f64..1e6) {
            let t = PowerTransform::new(1.0, Nonpos::Clip);
            prop_assert_eq!(t.transform_point(a), a);
        }
    }
}
