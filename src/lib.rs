//! # vl-scatter
//!
//! Bridges declarative Vega-Lite chart specifications and imperative scatter
//! plotting.
//!
//! ## Features
//!
//! - **Encoding resolution**: resolve each encoded channel (literal value,
//!   field, aggregate, or shorthand string) against the chart data and route
//!   it to the scatter keyword it feeds (`x`, `y`, `c`, `s`, `alpha`)
//! - **Power-law axis scale**: a `value ^ exponent` axis transform with
//!   clip/mask handling of non-positive input, selectable by name from a
//!   process-wide scale registry
//!
//! ## Quick Start
//!
//! ```rust
//! use vl_scatter::prelude::*;
//!
//! let chart = Chart::from_json(r#"{
//!     "mark": "point",
//!     "data": {"values": [{"a": 1, "b": 4}, {"a": 2, "b": 5}, {"a": 3, "b": 6}]},
//!     "encoding": {
//!         "x": {"field": "a", "type": "quantitative"},
//!         "y": "b:Q",
//!         "color": {"value": "red"}
//!     }
//! }"#)?;
//!
//! let args = convert_quantitative(&chart)?;
//! assert_eq!(args.len(), 3);
//!
//! registry::init();
//! let mut axis = Axis::new();
//! axis.set_scale("power_scale", &ScaleOptions::new().exponent(0.5))?;
//! assert_eq!(axis.transform(&[4.0]), vec![2.0]);
//! # Ok::<(), vl_scatter::Error>(())
//! ```
//!
//! ## Unsupported on purpose
//!
//! Aggregation, shape encodings, and array-valued opacity or size all fail
//! with [`Error::Unimplemented`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Encoding Resolution
// ============================================================================

/// Chart specification model (data, channels, encodings, shorthand).
pub mod grammar;

/// Channel resolution into scatter-call arguments.
pub mod convert;

// ============================================================================
// Axis Scales
// ============================================================================

/// Scale transforms and the scale registry.
pub mod scale;

/// Tick locators and formatters.
pub mod ticker;

/// Plot axis carrying a scale and tick configuration.
pub mod axis;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for vl-scatter operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use vl_scatter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::axis::{Axis, Tick};
    pub use crate::convert::{convert_quantitative, ChannelData, ScatterArgs, ScatterParam};
    pub use crate::error::{Error, Result};
    pub use crate::grammar::{Channel, ChannelSpec, Chart, DataFrame, DataValue};
    pub use crate::scale::{registry, AxisScale, Nonpos, PowerScale, ScaleOptions, Transform};
}
