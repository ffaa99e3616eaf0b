//! Chart specification: data plus encoding.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::grammar::channel::Channel;
use crate::grammar::data::DataFrame;
use crate::grammar::encoding::{ChannelSpec, Encoding};

/// The parts of a Vega-Lite document this crate reads.
#[derive(Debug, Deserialize)]
struct ChartDocument {
    #[serde(default)]
    data: Option<InlineData>,
    #[serde(default = "empty_encoding")]
    encoding: Value,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    #[serde(default)]
    values: Vec<Value>,
}

fn empty_encoding() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A chart: a dataset and the encoding bound to it.
///
/// # Example
///
/// ```rust
/// use vl_scatter::grammar::{Channel, Chart, ChannelSpec, DataFrame};
///
/// let data = DataFrame::new().with_column_f64("a", &[1.0, 2.0, 3.0]);
/// let chart = Chart::new(data).encode(Channel::X, ChannelSpec::field("a"));
/// assert_eq!(chart.encoding().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Chart {
    data: DataFrame,
    encoding: Encoding,
}

impl Chart {
    /// Create a chart over `data` with no channels encoded.
    #[must_use]
    pub fn new(data: DataFrame) -> Self {
        Self { data, encoding: Encoding::new() }
    }

    /// Encode a channel.
    #[must_use]
    pub fn encode(mut self, channel: Channel, spec: ChannelSpec) -> Self {
        self.encoding.set(channel, spec);
        self
    }

    /// Parse a Vega-Lite JSON document with inline data.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or an unsupported document shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Build from an already-parsed Vega-Lite document.
    ///
    /// Only inline `data.values` is supported; named or URL data sources are
    /// reported as unimplemented.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported data source, malformed records, or
    /// a malformed encoding.
    pub fn from_value(doc: Value) -> Result<Self> {
        if let Some(data) = doc.get("data") {
            if data.get("url").is_some() || data.get("name").is_some() {
                return Err(Error::unimplemented("non-inline chart data"));
            }
        }

        let doc: ChartDocument = serde_json::from_value(doc)?;
        let data = match doc.data {
            Some(inline) => DataFrame::from_records(&inline.values)?,
            None => DataFrame::new(),
        };
        let encoding = Encoding::from_json(&doc.encoding)?;

        Ok(Self { data, encoding })
    }

    /// The chart data.
    #[must_use]
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// The chart encoding.
    #[must_use]
    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let chart = Chart::from_json(
            r#"{
                "mark": "point",
                "data": {"values": [{"a": 1, "b": 4}, {"a": 2, "b": 5}]},
                "encoding": {
                    "x": {"field": "a", "type": "quantitative"},
                    "y": "b:Q"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(chart.data().nrow(), 2);
        assert_eq!(chart.encoding().get(Channel::X), Some(&ChannelSpec::field("a")));
        assert_eq!(chart.encoding().get(Channel::Y), Some(&ChannelSpec::shorthand("b:Q")));
    }

    #[test]
    fn test_from_json_without_data_or_encoding() {
        let chart = Chart::from_json(r#"{"mark": "point"}"#).unwrap();
        assert_eq!(chart.data().nrow(), 0);
        assert!(chart.encoding().is_empty());
    }

    #[test]
    fn test_url_data_is_unimplemented() {
        let err =
            Chart::from_json(r#"{"data": {"url": "cars.json"}, "encoding": {}}"#).unwrap_err();
        assert!(matches!(err, Error::Unimplemented(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Chart::from_json("{").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_builder() {
        let chart = Chart::new(DataFrame::new())
            .encode(Channel::Color, ChannelSpec::value("red"))
            .encode(Channel::Color, ChannelSpec::value("blue"));
        assert_eq!(chart.encoding().len(), 1);
        assert_eq!(chart.encoding().get(Channel::Color), Some(&ChannelSpec::value("blue")));
    }
}
