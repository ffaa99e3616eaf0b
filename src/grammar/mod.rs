//! Chart specification model.
//!
//! A small slice of the Vega-Lite grammar: a dataset plus an encoding that
//! binds channels (x, y, color, size, opacity, shape) to literal values,
//! fields, aggregates, or shorthand strings.
//!
//! # Example
//!
//! ```rust
//! use vl_scatter::grammar::*;
//!
//! let chart = Chart::from_json(r#"{
//!     "data": {"values": [{"a": 1}, {"a": 2}]},
//!     "encoding": {"x": "a:Q", "color": {"value": "red"}}
//! }"#).unwrap();
//! assert_eq!(chart.encoding().get(Channel::X), Some(&ChannelSpec::shorthand("a:Q")));
//! ```

mod channel;
mod chart;
mod data;
mod encoding;
mod shorthand;

pub use channel::Channel;
pub use chart::Chart;
pub use data::{ChannelData, DataFrame, DataValue};
pub use encoding::{ChannelSpec, Encoding};
pub use shorthand::{parse_shorthand, EncodingType, Shorthand, AGGREGATES, TIME_UNITS};
