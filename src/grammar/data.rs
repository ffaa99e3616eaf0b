//! Data abstraction for chart specifications.
//!
//! Provides a simple columnar data structure that encodings resolve against.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// A value in a data frame, or a literal channel value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataValue {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A boolean value.
    Bool(bool),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether this is a numeric value.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, DataValue::Number(_))
    }

    /// Convert a scalar JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error for arrays and objects, which are not scalars.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(DataValue::Null),
            Value::Bool(b) => Ok(DataValue::Bool(*b)),
            Value::Number(n) => n
                .as_f64()
                .map(DataValue::Number)
                .ok_or_else(|| Error::invalid_spec(format!("number {n} is not representable"))),
            Value::String(s) => Ok(DataValue::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => {
                Err(Error::invalid_spec(format!("expected a scalar, found {value}")))
            }
        }
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Number(v)
    }
}

impl From<bool> for DataValue {
    fn from(v: bool) -> Self {
        DataValue::Bool(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

/// Data a channel resolved to, or the literal a channel was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChannelData {
    /// One value applied to every mark.
    Scalar(DataValue),
    /// One value per mark, in data order.
    Column(Vec<DataValue>),
}

impl ChannelData {
    /// Convert a literal channel value; a JSON list becomes a column.
    ///
    /// # Errors
    ///
    /// Returns an error for objects and for lists holding non-scalars.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let values = items.iter().map(DataValue::from_json).collect::<Result<_>>()?;
                Ok(ChannelData::Column(values))
            }
            other => DataValue::from_json(other).map(ChannelData::Scalar),
        }
    }

    /// The scalar, if this is one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&DataValue> {
        match self {
            ChannelData::Scalar(v) => Some(v),
            ChannelData::Column(_) => None,
        }
    }

    /// The column, if this is one.
    #[must_use]
    pub fn as_column(&self) -> Option<&[DataValue]> {
        match self {
            ChannelData::Column(values) => Some(values),
            ChannelData::Scalar(_) => None,
        }
    }

    /// A column as numbers; `None` for scalars or if any entry is not numeric.
    #[must_use]
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        self.as_column()?.iter().map(DataValue::as_f64).collect()
    }
}

/// A simple columnar data frame.
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    /// Column data keyed by column name.
    columns: HashMap<String, Vec<DataValue>>,
    /// Number of rows.
    n_rows: usize,
}

impl DataFrame {
    /// Create a new empty data frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from Vega-Lite inline row records (`data.values`).
    ///
    /// Keys missing from a row are filled with [`DataValue::Null`], so every
    /// column has `nrow()` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if a record is not an object or holds a non-scalar.
    pub fn from_records(records: &[Value]) -> Result<Self> {
        let mut columns: HashMap<String, Vec<DataValue>> = HashMap::new();

        for (row, record) in records.iter().enumerate() {
            let fields = record.as_object().ok_or_else(|| {
                Error::invalid_spec(format!("data record {row} is not an object"))
            })?;

            for (name, value) in fields {
                let column = columns
                    .entry(name.clone())
                    .or_insert_with(|| vec![DataValue::Null; row]);
                column.push(DataValue::from_json(value)?);
            }

            // Pad columns this record did not mention.
            for column in columns.values_mut() {
                if column.len() == row {
                    column.push(DataValue::Null);
                }
            }
        }

        Ok(Self { columns, n_rows: records.len() })
    }

    /// Add a numeric column.
    pub fn add_column_f64(&mut self, name: &str, data: &[f64]) {
        let values: Vec<DataValue> = data.iter().map(|&v| DataValue::Number(v)).collect();
        self.add_column(name, values);
    }

    /// Add a text column.
    pub fn add_column_str(&mut self, name: &str, data: &[&str]) {
        let values: Vec<DataValue> = data.iter().map(|&s| DataValue::Text(s.to_string())).collect();
        self.add_column(name, values);
    }

    /// Add a column of arbitrary values.
    pub fn add_column(&mut self, name: &str, values: Vec<DataValue>) {
        self.n_rows = self.n_rows.max(values.len());
        self.columns.insert(name.to_string(), values);
    }

    /// Builder form of [`DataFrame::add_column_f64`].
    #[must_use]
    pub fn with_column_f64(mut self, name: &str, data: &[f64]) -> Self {
        self.add_column_f64(name, data);
        self
    }

    /// Builder form of [`DataFrame::add_column_str`].
    #[must_use]
    pub fn with_column_str(mut self, name: &str, data: &[&str]) -> Self {
        self.add_column_str(name, data);
        self
    }

    /// Get a column as f64 values, skipping non-numeric entries.
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<Vec<f64>> {
        self.columns.get(name).map(|col| col.iter().filter_map(DataValue::as_f64).collect())
    }

    /// Get a column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[DataValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Get number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Get number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get column names.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dataframe_builder() {
        let df = DataFrame::new()
            .with_column_f64("a", &[1.0, 2.0, 3.0])
            .with_column_str("label", &["p", "q", "r"]);
        assert_eq!(df.nrow(), 3);
        assert_eq!(df.ncol(), 2);
        assert!(df.has_column("a"));
        assert!(df.has_column("label"));
    }

    #[test]
    fn test_dataframe_get_f64() {
        let df = DataFrame::new().with_column_f64("x", &[1.0, 2.0]);
        assert_eq!(df.get_f64("x").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_from_records() {
        let records = vec![json!({"a": 1, "b": "u"}), json!({"a": 2, "b": "v"})];
        let df = DataFrame::from_records(&records).unwrap();
        assert_eq!(df.nrow(), 2);
        assert_eq!(df.get_f64("a").unwrap(), vec![1.0, 2.0]);
        assert_eq!(df.get("b").unwrap()[1].as_str(), Some("v"));
    }

    #[test]
    fn test_from_records_missing_keys_padded() {
        let records = vec![json!({"a": 1}), json!({"b": true}), json!({"a": 3})];
        let df = DataFrame::from_records(&records).unwrap();
        let a = df.get("a").unwrap();
        let b = df.get("b").unwrap();
        assert_eq!(a, &[DataValue::Number(1.0), DataValue::Null, DataValue::Number(3.0)]);
        assert_eq!(b, &[DataValue::Null, DataValue::Bool(true), DataValue::Null]);
    }

    #[test]
    fn test_from_records_rejects_non_object() {
        let records = vec![json!([1, 2])];
        assert!(DataFrame::from_records(&records).is_err());
    }

    #[test]
    fn test_from_records_rejects_nested_value() {
        let records = vec![json!({"a": {"nested": 1}})];
        assert!(DataFrame::from_records(&records).is_err());
    }

    #[test]
    fn test_data_value_conversions() {
        let num: DataValue = 42.0.into();
        assert_eq!(num.as_f64(), Some(42.0));
        assert!(num.is_number());

        let text: DataValue = "hello".into();
        assert_eq!(text.as_str(), Some("hello"));
        assert_eq!(text.as_f64(), None);
    }

    #[test]
    fn test_data_value_serializes_untagged() {
        let values =
            vec![DataValue::Number(1.5), "red".into(), DataValue::Bool(false), DataValue::Null];
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json, json!([1.5, "red", false, null]));
    }

    #[test]
    fn test_channel_data_from_json_list() {
        let data = ChannelData::from_json(&json!([0.2, "a", null])).unwrap();
        assert_eq!(
            data,
            ChannelData::Column(vec![DataValue::Number(0.2), "a".into(), DataValue::Null])
        );
        assert_eq!(
            ChannelData::from_json(&json!(0.5)).unwrap(),
            ChannelData::Scalar(DataValue::Number(0.5))
        );
        assert!(ChannelData::from_json(&json!([[1]])).is_err());
        assert!(ChannelData::from_json(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_dataframe_get_missing() {
        let df = DataFrame::new();
        assert!(df.get("missing").is_none());
        assert!(df.get_f64("missing").is_none());
        assert_eq!(df.nrow(), 0);
        assert_eq!(df.ncol(), 0);
    }

    #[test]
    fn test_dataframe_columns() {
        let df = DataFrame::new().with_column_f64("x", &[1.0]).with_column_f64("y", &[2.0]);
        let cols = df.columns();
        assert_eq!(cols.len(), 2);
        assert!(cols.contains(&"x"));
        assert!(cols.contains(&"y"));
    }
}
