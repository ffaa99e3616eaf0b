//! Channel specifications and the encoding that maps channels to them.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::grammar::channel::Channel;
use crate::grammar::data::{ChannelData, DataValue};

/// Where a channel gets its data from.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelSpec {
    /// A literal: one value for every mark, or a list with one per mark.
    Value(ChannelData),
    /// A statistical summary of a field.
    Aggregate {
        /// Aggregate operation, e.g. `mean`.
        op: String,
        /// Summarized field, if any (`count` needs none).
        field: Option<String>,
    },
    /// A column of the chart data.
    Field(String),
    /// A compact `field:type` / `agg(field):type` string.
    Shorthand(String),
}

impl ChannelSpec {
    /// Literal value spec.
    pub fn value(value: impl Into<DataValue>) -> Self {
        ChannelSpec::Value(ChannelData::Scalar(value.into()))
    }

    /// Literal list spec, one value per mark.
    pub fn values<V: Into<DataValue>>(values: impl IntoIterator<Item = V>) -> Self {
        ChannelSpec::Value(ChannelData::Column(values.into_iter().map(Into::into).collect()))
    }

    /// Field reference spec.
    pub fn field(name: impl Into<String>) -> Self {
        ChannelSpec::Field(name.into())
    }

    /// Shorthand spec.
    pub fn shorthand(shorthand: impl Into<String>) -> Self {
        ChannelSpec::Shorthand(shorthand.into())
    }

    /// Aggregate spec.
    pub fn aggregate(op: impl Into<String>, field: Option<&str>) -> Self {
        ChannelSpec::Aggregate { op: op.into(), field: field.map(str::to_string) }
    }

    /// Read a Vega-Lite channel definition.
    ///
    /// A bare string is a shorthand. For an object the first present key wins,
    /// in the order `value`, `aggregate`, `field`, `shorthand`; an absent key
    /// is "unset", while `"value": null` is a literal null. A list `value` is
    /// kept as a list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpecification`] when none of those keys is
    /// present or a present key holds the wrong JSON type.
    pub fn from_json(def: &Value) -> Result<Self> {
        let obj = match def {
            Value::String(s) => return Ok(ChannelSpec::Shorthand(s.clone())),
            Value::Object(obj) => obj,
            other => {
                return Err(Error::invalid_spec(format!(
                    "channel definition must be an object or a string, found {other}"
                )))
            }
        };

        if let Some(value) = obj.get("value") {
            return Ok(ChannelSpec::Value(ChannelData::from_json(value)?));
        }

        if let Some(op) = obj.get("aggregate") {
            // Vega-Lite also allows argmin/argmax objects here.
            let op = match op {
                Value::String(s) => s.clone(),
                Value::Object(arg) => arg.keys().next().cloned().unwrap_or_default(),
                other => {
                    return Err(Error::invalid_spec(format!(
                        "aggregate must be a string, found {other}"
                    )))
                }
            };
            let field = obj.get("field").and_then(Value::as_str).map(str::to_string);
            return Ok(ChannelSpec::Aggregate { op, field });
        }

        if let Some(field) = obj.get("field") {
            return Ok(ChannelSpec::Field(expect_str("field", field)?.to_string()));
        }

        if let Some(shorthand) = obj.get("shorthand") {
            return Ok(ChannelSpec::Shorthand(expect_str("shorthand", shorthand)?.to_string()));
        }

        Err(Error::invalid_spec("cannot locate data for channel"))
    }
}

fn expect_str<'a>(key: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Error::invalid_spec(format!("`{key}` must be a string, found {value}")))
}

/// Mapping from channel to its specification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encoding {
    channels: BTreeMap<Channel, ChannelSpec>,
}

impl Encoding {
    /// Create an empty encoding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `encoding` object of a Vega-Lite document.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-object encoding, a channel this crate does
    /// not handle, or a malformed channel definition.
    pub fn from_json(encoding: &Value) -> Result<Self> {
        let obj = encoding.as_object().ok_or_else(|| {
            Error::invalid_spec(format!("encoding must be an object, found {encoding}"))
        })?;

        let mut out = Self::new();
        for (name, def) in obj {
            out.set(name.parse()?, ChannelSpec::from_json(def)?);
        }
        Ok(out)
    }

    /// Set (or replace) a channel.
    pub fn set(&mut self, channel: Channel, spec: ChannelSpec) {
        self.channels.insert(channel, spec);
    }

    /// Get the spec for a channel.
    #[must_use]
    pub fn get(&self, channel: Channel) -> Option<&ChannelSpec> {
        self.channels.get(&channel)
    }

    /// Iterate over encoded channels.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &ChannelSpec)> {
        self.channels.iter().map(|(c, s)| (*c, s))
    }

    /// Number of encoded channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel is encoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
