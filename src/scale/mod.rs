//! Axis scales for data-to-axis coordinate mappings.
//!
//! A scale owns a [`Transform`] and knows which tick locators and formatters
//! suit it. Scales are created by name through the process-wide
//! [`registry`]; call [`registry::init`] once at startup to make
//! [`PowerScale`] (`"power_scale"`) selectable.
//!
//! # Example
//!
//! ```rust
//! use vl_scatter::axis::Axis;
//! use vl_scatter::scale::{registry, ScaleOptions, Nonpos};
//!
//! registry::init();
//!
//! let mut axis = Axis::new();
//! axis.set_scale("power_scale", &ScaleOptions::new().exponent(0.5).nonpos(Nonpos::Mask)).unwrap();
//! assert_eq!(axis.transform(&[4.0, 9.0]), vec![2.0, 3.0]);
//! ```

pub mod registry;
mod transform;

use std::fmt;

use serde::Deserialize;

use crate::axis::Axis;
use crate::error::{Error, Result};
use crate::ticker::{AutoLocator, Formatter, Locator, ScalarFormatter};

pub use transform::{IdentityTransform, Nonpos, PowerTransform, Transform, CLIP_SENTINEL};

/// Options passed to a scale when it is attached to an axis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleOptions {
    /// Exponent for power scales.
    #[serde(default = "default_exponent")]
    pub exponent: f64,

    /// Handling of non-positive input.
    #[serde(default)]
    pub nonpos: Nonpos,
}

fn default_exponent() -> f64 {
    1.0
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self { exponent: default_exponent(), nonpos: Nonpos::default() }
    }
}

impl ScaleOptions {
    /// Default options: exponent 1, clipping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object such as `{"exponent": 0.5, "nonpos": "mask"}`.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, unknown keys, or an unknown
    /// `nonpos` policy.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the exponent.
    #[must_use]
    pub fn exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }

    /// Set the non-positive input policy.
    #[must_use]
    pub fn nonpos(mut self, nonpos: Nonpos) -> Self {
        self.nonpos = nonpos;
        self
    }
}

/// A named axis scale.
pub trait AxisScale: fmt::Debug + Send + Sync {
    /// Registry name of the scale.
    fn name(&self) -> &'static str;

    /// The data-to-axis transform.
    fn transform(&self) -> &dyn Transform;

    /// Install the tick locators and formatters this scale wants.
    fn set_default_locators_and_formatters(&self, axis: &mut Axis);

    /// Restrict a view range to what the scale can show.
    fn limit_range_for_scale(&self, vmin: f64, vmax: f64, _minpos: f64) -> (f64, f64) {
        (vmin, vmax)
    }
}

/// Automatic major ticks with plain numeric labels, no minor ticks.
fn install_numeric_ticks(axis: &mut Axis) {
    axis.set_major_locator(Locator::Auto(AutoLocator::default()));
    axis.set_major_formatter(Formatter::Scalar(ScalarFormatter::default()));
    axis.set_minor_locator(Locator::Null);
    axis.set_minor_formatter(Formatter::Null);
}

/// Power-law scale: axis coordinate = `value ^ exponent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerScale {
    transform: PowerTransform,
}

impl PowerScale {
    /// Registry name.
    pub const NAME: &'static str = "power_scale";

    /// Create a power scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScaleOption`] for a non-finite exponent.
    pub fn new(options: &ScaleOptions) -> Result<Self> {
        if !options.exponent.is_finite() {
            return Err(Error::InvalidScaleOption(format!(
                "exponent must be finite, got {}",
                options.exponent
            )));
        }
        Ok(Self { transform: PowerTransform::new(options.exponent, options.nonpos) })
    }

    /// The exponent.
    #[must_use]
    pub fn exponent(&self) -> f64 {
        self.transform.exponent()
    }

    pub(crate) fn factory(options: &ScaleOptions) -> Result<Box<dyn AxisScale>> {
        Ok(Box::new(Self::new(options)?))
    }
}

impl AxisScale for PowerScale {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn transform(&self) -> &dyn Transform {
        &self.transform
    }

    fn set_default_locators_and_formatters(&self, axis: &mut Axis) {
        install_numeric_ticks(axis);
    }
}

/// Linear scale: axis coordinate = value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinearScale {
    transform: IdentityTransform,
}

impl LinearScale {
    /// Registry name.
    pub const NAME: &'static str = "linear";

    /// Create a linear scale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn factory(_options: &ScaleOptions) -> Result<Box<dyn AxisScale>> {
        Ok(Box::new(Self::new()))
    }
}

impl AxisScale for LinearScale {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn transform(&self) -> &dyn Transform {
        &self.transform
    }

    fn set_default_locators_and_formatters(&self, axis: &mut Axis) {
        install_numeric_ticks(axis);
    }
}
