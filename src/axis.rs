//! A plot axis: scale plus tick configuration.

use tracing::debug;

use crate::error::Result;
use crate::scale::{registry, AxisScale, LinearScale, ScaleOptions};
use crate::ticker::{Formatter, Locator};

/// A tick position and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position in data coordinates.
    pub value: f64,
    /// Rendered label.
    pub label: String,
}

/// One axis of a plot.
#[derive(Debug)]
pub struct Axis {
    major_locator: Locator,
    major_formatter: Formatter,
    minor_locator: Locator,
    minor_formatter: Formatter,
    scale: Option<Box<dyn AxisScale>>,
}

impl Default for Axis {
    fn default() -> Self {
        Self::new()
    }
}

impl Axis {
    /// A linear axis with automatic major ticks and no minor ticks.
    #[must_use]
    pub fn new() -> Self {
        let mut axis = Self {
            major_locator: Locator::Null,
            major_formatter: Formatter::Null,
            minor_locator: Locator::Null,
            minor_formatter: Formatter::Null,
            scale: None,
        };
        LinearScale::new().set_default_locators_and_formatters(&mut axis);
        axis
    }

    /// Attach the scale registered under `name`, replacing the current one
    /// and its tick configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not registered or the options are
    /// rejected by the scale. The axis is unchanged on error.
    pub fn set_scale(&mut self, name: &str, options: &ScaleOptions) -> Result<()> {
        let scale = registry::scale_factory(name, options)?;
        scale.set_default_locators_and_formatters(self);
        debug!(scale = name, transform = %scale.transform(), "axis scale set");
        self.scale = Some(scale);
        Ok(())
    }

    /// Name of the current scale.
    #[must_use]
    pub fn scale_name(&self) -> &'static str {
        self.scale.as_ref().map_or(LinearScale::NAME, |s| s.name())
    }

    /// The current scale, if one was set.
    #[must_use]
    pub fn scale(&self) -> Option<&dyn AxisScale> {
        self.scale.as_deref()
    }

    /// Map data coordinates through the scale's transform.
    #[must_use]
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        match &self.scale {
            Some(scale) => scale.transform().transform_non_affine(values),
            None => values.to_vec(),
        }
    }

    /// Restrict a view interval to what the scale can show.
    #[must_use]
    pub fn limit_range(&self, vmin: f64, vmax: f64, minpos: f64) -> (f64, f64) {
        match &self.scale {
            Some(scale) => scale.limit_range_for_scale(vmin, vmax, minpos),
            None => (vmin, vmax),
        }
    }

    /// Major ticks for the view interval.
    #[must_use]
    pub fn major_ticks(&self, vmin: f64, vmax: f64) -> Vec<Tick> {
        ticks(&self.major_locator, &self.major_formatter, vmin, vmax)
    }

    /// Minor ticks for the view interval.
    #[must_use]
    pub fn minor_ticks(&self, vmin: f64, vmax: f64) -> Vec<Tick> {
        ticks(&self.minor_locator, &self.minor_formatter, vmin, vmax)
    }

    /// Set the major tick locator.
    pub fn set_major_locator(&mut self, locator: Locator) {
        self.major_locator = locator;
    }

    /// Set the major tick formatter.
    pub fn set_major_formatter(&mut self, formatter: Formatter) {
        self.major_formatter = formatter;
    }

    /// Set the minor tick locator.
    pub fn set_minor_locator(&mut self, locator: Locator) {
        self.minor_locator = locator;
    }

    /// Set the minor tick formatter.
    pub fn set_minor_formatter(&mut self, formatter: Formatter) {
        self.minor_formatter = formatter;
    }

    /// Major tick locator.
    #[must_use]
    pub fn major_locator(&self) -> Locator {
        self.major_locator
    }

    /// Major tick formatter.
    #[must_use]
    pub fn major_formatter(&self) -> Formatter {
        self.major_formatter
    }

    /// Minor tick locator.
    #[must_use]
    pub fn minor_locator(&self) -> Locator {
        self.minor_locator
    }

    /// Minor tick formatter.
    #[must_use]
    pub fn minor_formatter(&self) -> Formatter {
        self.minor_formatter
    }
}

fn ticks(locator: &Locator, formatter: &Formatter, vmin: f64, vmax: f64) -> Vec<Tick> {
    let values = locator.tick_values(vmin, vmax);
    let labels = formatter.format_ticks(&values);
    values.into_iter().zip(labels).map(|(value, label)| Tick { value, label }).collect()
}
