//! Resolution of chart encodings into scatter-call arguments.
//!
//! Each encoded channel is resolved to the data it draws from (a literal or a
//! column of the chart data), then routed to the keyword a scatter-drawing
//! call expects:
//!
//! | channel   | keyword | accepted data            |
//! |-----------|---------|--------------------------|
//! | `x`       | `x`     | column or literal        |
//! | `y`       | `y`     | column or literal        |
//! | `color`   | `c`     | column or literal        |
//! | `size`    | `s`     | literal only             |
//! | `opacity` | `alpha` | numeric literal only     |
//! | `shape`   | -       | never                    |
//!
//! # Example
//!
//! ```rust
//! use vl_scatter::convert::convert_quantitative;
//! use vl_scatter::grammar::Chart;
//!
//! let chart = Chart::from_json(r#"{
//!     "data": {"values": [{"a": 1, "b": 4}, {"a": 2, "b": 5}, {"a": 3, "b": 6}]},
//!     "encoding": {"x": {"field": "a"}, "y": {"field": "b"}, "color": {"value": "red"}}
//! }"#).unwrap();
//!
//! let args = convert_quantitative(&chart).unwrap();
//! assert_eq!(args.get("x").and_then(|d| d.to_f64_vec()), Some(vec![1.0, 2.0, 3.0]));
//! assert_eq!(args.get("c").and_then(|d| d.as_scalar()).and_then(|v| v.as_str()), Some("red"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::grammar::{parse_shorthand, Channel, ChannelSpec, Chart, DataFrame};

pub use crate::grammar::ChannelData;

/// Keyword parameters of a scatter-drawing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScatterParam {
    /// Horizontal positions.
    X,
    /// Vertical positions.
    Y,
    /// Marker colors.
    C,
    /// Marker sizes.
    S,
    /// Marker opacity.
    Alpha,
}

impl ScatterParam {
    /// The keyword name.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            ScatterParam::X => "x",
            ScatterParam::Y => "y",
            ScatterParam::C => "c",
            ScatterParam::S => "s",
            ScatterParam::Alpha => "alpha",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        [ScatterParam::X, ScatterParam::Y, ScatterParam::C, ScatterParam::S, ScatterParam::Alpha]
            .into_iter()
            .find(|p| p.keyword() == keyword)
    }
}

impl fmt::Display for ScatterParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Resolved keyword arguments for a scatter-drawing call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterArgs {
    args: BTreeMap<ScatterParam, ChannelData>,
}

impl ScatterArgs {
    /// Look up an argument by keyword (`"x"`, `"c"`, `"alpha"`, ...).
    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&ChannelData> {
        self.args.get(&ScatterParam::from_keyword(keyword)?)
    }

    /// Look up an argument by parameter.
    #[must_use]
    pub fn param(&self, param: ScatterParam) -> Option<&ChannelData> {
        self.args.get(&param)
    }

    /// Iterate over `(keyword, data)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ChannelData)> {
        self.args.iter().map(|(p, d)| (p.keyword(), d))
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether no argument was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Keyword arguments as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map = self
            .iter()
            .map(|(k, d)| (k.to_string(), serde_json::to_value(d).unwrap_or(Value::Null)))
            .collect();
        Value::Object(map)
    }
}

/// Convert the encodings of `chart` into scatter-call arguments.
///
/// # Errors
///
/// - [`Error::Unimplemented`] for aggregates, shape encodings, column-valued
///   opacity or size, and non-numeric opacity.
/// - [`Error::InvalidSpecification`] when a channel has no data source or
///   names a missing column.
pub fn convert_quantitative(chart: &Chart) -> Result<ScatterArgs> {
    let mut out = ScatterArgs::default();

    for (channel, spec) in chart.encoding().iter() {
        let (param, data) = resolve_channel(channel, spec, chart.data())?;
        debug!(%channel, keyword = param.keyword(), "resolved channel");
        out.args.insert(param, data);
    }

    Ok(out)
}

/// Find the data a channel draws from.
///
/// # Errors
///
/// [`Error::Unimplemented`] for aggregates (direct or via shorthand),
/// [`Error::InvalidSpecification`] when nothing can be located.
pub fn locate_channel_data(spec: &ChannelSpec, data: &DataFrame) -> Result<ChannelData> {
    match spec {
        ChannelSpec::Value(value) => Ok(value.clone()),
        ChannelSpec::Aggregate { op, .. } => Err(aggregate_unsupported(op)),
        ChannelSpec::Field(field) => column(data, field),
        ChannelSpec::Shorthand(shorthand) => {
            let parsed = parse_shorthand(shorthand, Some(data));
            if let Some(op) = &parsed.aggregate {
                return Err(aggregate_unsupported(op));
            }
            match &parsed.field {
                Some(field) => column(data, field),
                None => Err(Error::invalid_spec("cannot locate data for channel")),
            }
        }
    }
}

fn column(data: &DataFrame, field: &str) -> Result<ChannelData> {
    data.get(field)
        .map(|values| ChannelData::Column(values.to_vec()))
        .ok_or_else(|| Error::invalid_spec(format!("field `{field}` not found in chart data")))
}

fn aggregate_unsupported(op: &str) -> Error {
    Error::unimplemented(format!("aggregate `{op}`"))
}

/// Resolve one channel and route it to its scatter keyword.
///
/// Shape is rejected before any data is looked up.
fn resolve_channel(
    channel: Channel,
    spec: &ChannelSpec,
    data: &DataFrame,
) -> Result<(ScatterParam, ChannelData)> {
    let param = match channel {
        Channel::X => ScatterParam::X,
        Channel::Y => ScatterParam::Y,
        Channel::Color => ScatterParam::C,
        Channel::Size => ScatterParam::S,
        Channel::Opacity => ScatterParam::Alpha,
        Channel::Shape => return Err(Error::unimplemented("shape encoding")),
    };

    let resolved = locate_channel_data(spec, data)?;
    match (param, &resolved) {
        (ScatterParam::S, ChannelData::Column(_)) => Err(Error::unimplemented("array-valued size")),
        (ScatterParam::Alpha, ChannelData::Column(_)) => {
            Err(Error::unimplemented("array-valued opacity"))
        }
        (ScatterParam::Alpha, ChannelData::Scalar(value)) if !value.is_number() => {
            Err(Error::unimplemented("non-numeric opacity"))
        }
        _ => Ok((param, resolved)),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::grammar::DataValue;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Field references return the column unchanged, order preserved.
        #[test]
        fn prop_field_returns_column(values in prop::collection::vec(-1e6f64..1e6, 0..64)) {
            let chart = Chart::new(DataFrame::new().with_column_f64("v", &values))
                .encode(Channel::X, ChannelSpec::field("v"));
            let args = convert_quantitative(&chart).unwrap();
            prop_assert_eq!(args.get("x").and_then(ChannelData::to_f64_vec), Some(values));
        }

        /// Numeric opacity literals pass through to `alpha`.
        #[test]
        fn prop_numeric_opacity_is_alpha(alpha in 0.0f64..=1.0) {
            let chart = Chart::new(DataFrame::new())
                .encode(Channel::Opacity, ChannelSpec::value(alpha));
            let args = convert_quantitative(&chart).unwrap();
            let expected = ChannelData::Scalar(DataValue::Number(alpha));
            prop_assert_eq!(args.get("alpha"), Some(&expected));
        }
    }
}
