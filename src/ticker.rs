//! Tick locators and formatters.
//!
//! Locators choose tick positions for a view interval, formatters turn those
//! positions into labels. Scales install the pair they want on an axis.

/// Multipliers (times a power of ten) an [`AutoLocator`] may step by.
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Upper bound on decimals a [`ScalarFormatter`] will print.
const MAX_DECIMALS: usize = 12;

/// Chooses "nice" evenly spaced ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoLocator {
    nbins: usize,
}

impl Default for AutoLocator {
    fn default() -> Self {
        Self { nbins: 9 }
    }
}

impl AutoLocator {
    /// Locator producing at most `nbins` intervals (at least one).
    #[must_use]
    pub fn with_nbins(nbins: usize) -> Self {
        Self { nbins: nbins.max(1) }
    }

    /// Maximum number of intervals between ticks.
    #[must_use]
    pub fn nbins(&self) -> usize {
        self.nbins
    }

    /// Tick values inside `[vmin, vmax]` (bounds may be given in either order).
    #[must_use]
    pub fn tick_values(&self, mut vmin: f64, mut vmax: f64) -> Vec<f64> {
        if !vmin.is_finite() || !vmax.is_finite() {
            return Vec::new();
        }
        if vmin > vmax {
            std::mem::swap(&mut vmin, &mut vmax);
        }
        if vmin == vmax {
            return vec![vmin];
        }

        let step = nice_step((vmax - vmin) / self.nbins as f64);
        if step == 0.0 {
            return vec![vmin, vmax];
        }

        // Tolerate float noise at the interval ends.
        let eps = step * 1e-9;
        let first = ((vmin - eps) / step).ceil() as i64;
        let last = ((vmax + eps) / step).floor() as i64;
        (first..=last).map(|k| clean(k as f64 * step, step)).collect()
    }
}

/// Smallest nice step that is at least `raw`.
fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let base = 10_f64.powf(raw.log10().floor());
    let norm = raw / base;
    let mult = NICE_STEPS.iter().copied().find(|&m| m >= norm * (1.0 - 1e-12)).unwrap_or(10.0);
    mult * base
}

/// Round away accumulated error below the step's resolution.
fn clean(value: f64, step: f64) -> f64 {
    let digits = 3 - step.log10().floor() as i32;
    let cleaned = if digits > 0 {
        let scale = 10_f64.powi(digits);
        (value * scale).round() / scale
    } else {
        let scale = 10_f64.powi(-digits);
        (value / scale).round() * scale
    };
    if cleaned == 0.0 {
        0.0
    } else {
        cleaned
    }
}

/// Where ticks go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// Automatic nice ticks.
    Auto(AutoLocator),
    /// No ticks.
    Null,
}

impl Default for Locator {
    fn default() -> Self {
        Locator::Auto(AutoLocator::default())
    }
}

impl Locator {
    /// Tick values for the view interval.
    #[must_use]
    pub fn tick_values(&self, vmin: f64, vmax: f64) -> Vec<f64> {
        match self {
            Locator::Auto(auto) => auto.tick_values(vmin, vmax),
            Locator::Null => Vec::new(),
        }
    }
}

/// Plain decimal labels with just enough digits to tell ticks apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScalarFormatter;

impl ScalarFormatter {
    /// Format a set of ticks with a shared number of decimals.
    #[must_use]
    pub fn format_ticks(&self, values: &[f64]) -> Vec<String> {
        let decimals = shared_decimals(values);
        values.iter().map(|&v| format_decimal(v, decimals)).collect()
    }
}

fn shared_decimals(values: &[f64]) -> usize {
    (0..=MAX_DECIMALS)
        .find(|&d| {
            let scale = 10_f64.powi(d as i32);
            values
                .iter()
                .filter(|v| v.is_finite())
                .all(|&v| ((v * scale).round() - v * scale).abs() < 1e-6)
        })
        .unwrap_or(MAX_DECIMALS)
}

fn format_decimal(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let label = format!("{value:.decimals$}");
    // "-0" and "-0.00" read as zero.
    if label.starts_with('-') && label[1..].chars().all(|c| c == '0' || c == '.') {
        label[1..].to_string()
    } else {
        label
    }
}

/// How ticks are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Numeric labels.
    Scalar(ScalarFormatter),
    /// Empty labels.
    Null,
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::Scalar(ScalarFormatter)
    }
}

impl Formatter {
    /// Labels for `values`, one per value.
    #[must_use]
    pub fn format_ticks(&self, values: &[f64]) -> Vec<String> {
        match self {
            Formatter::Scalar(scalar) => scalar.format_ticks(values),
            Formatter::Null => vec![String::new(); values.len()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_locator_unit_interval() {
        let ticks = AutoLocator::default().tick_values(0.0, 1.0);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_auto_locator_integer_range() {
        let ticks = AutoLocator::default().tick_values(0.0, 100.0);
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_auto_locator_uses_two_and_a_half() {
        let ticks = AutoLocator::with_nbins(4).tick_values(0.0, 10.0);
        assert_eq!(ticks, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn test_auto_locator_reversed_and_offset() {
        let ticks = AutoLocator::default().tick_values(13.0, -7.0);
        assert_eq!(ticks, vec![-5.0, -2.5, 0.0, 2.5, 5.0, 7.5, 10.0, 12.5]);
    }

    #[test]
    fn test_auto_locator_degenerate() {
        assert_eq!(AutoLocator::default().tick_values(2.0, 2.0), vec![2.0]);
        assert!(AutoLocator::default().tick_values(f64::NAN, 1.0).is_empty());
        assert!(AutoLocator::default().tick_values(0.0, f64::INFINITY).is_empty());
    }

    #[test]
    fn test_null_locator() {
        assert!(Locator::Null.tick_values(0.0, 10.0).is_empty());
    }

    #[test]
    fn test_scalar_formatter() {
        let fmt = ScalarFormatter;
        assert_eq!(fmt.format_ticks(&[0.0, 0.5, 1.0]), vec!["0.0", "0.5", "1.0"]);
        assert_eq!(fmt.format_ticks(&[0.0, 20.0, 40.0]), vec!["0", "20", "40"]);
        assert_eq!(fmt.format_ticks(&[0.0, 2.5, 5.0]), vec!["0.0", "2.5", "5.0"]);
        assert_eq!(fmt.format_ticks(&[-0.0]), vec!["0"]);
    }

    #[test]
    fn test_null_formatter() {
        assert_eq!(Formatter::Null.format_ticks(&[1.0, 2.0]), vec!["", ""]);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Locator::default(), Locator::Auto(AutoLocator::default()));
        assert_eq!(Formatter::default(), Formatter::Scalar(ScalarFormatter));
        assert_eq!(AutoLocator::with_nbins(0).nbins(), 1);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Ticks stay inside the interval, ascend, and never exceed nbins + 1.
        /// A single-bin locator may find no nice value inside a narrow interval.
        #[test]
        fn prop_ticks_bounded(lo in -1e6f64..1e6, span in 1e-3f64..1e6, nbins in 1usize..20) {
            let hi = lo + span;
            let ticks = AutoLocator::with_nbins(nbins).tick_values(lo, hi);
            let slack = span * 1e-6;
            prop_assert!(ticks.len() <= nbins + 1);
            prop_assert!(ticks.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(ticks.iter().all(|&t| t >= lo - slack && t <= hi + slack));
        }
    }
}
