//! Vega-Lite shorthand parsing.
//!
//! A shorthand packs a field name with an optional aggregate or time unit and
//! an optional type code into one string:
//!
//! ```text
//! field            field:Q            mean(field):Q
//! count()          month(date):T      a\:b:N   (escaped colon in the name)
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::{Error, Result};
use crate::grammar::data::{DataFrame, DataValue};

/// Vega-Lite aggregate operations.
pub const AGGREGATES: &[&str] = &[
    "argmax", "argmin", "average", "count", "distinct", "exponential", "exponentialb", "max",
    "mean", "median", "min", "missing", "product", "q1", "q3", "ci0", "ci1", "stderr", "stdev",
    "stdevp", "sum", "valid", "values", "variance", "variancep",
];

/// Vega-Lite time units (local time; each may also carry a `utc` prefix).
pub const TIME_UNITS: &[&str] = &[
    "year",
    "quarter",
    "month",
    "week",
    "day",
    "dayofyear",
    "date",
    "hours",
    "minutes",
    "seconds",
    "milliseconds",
    "yearquarter",
    "yearquartermonth",
    "yearmonth",
    "yearmonthdate",
    "yearmonthdatehours",
    "yearmonthdatehoursminutes",
    "yearmonthdatehoursminutesseconds",
    "yearweek",
    "yearweekday",
    "yearweekdayhours",
    "yearweekdayhoursminutes",
    "yearweekdayhoursminutesseconds",
    "yeardayofyear",
    "quartermonth",
    "monthdate",
    "monthdatehours",
    "monthdatehoursminutes",
    "monthdatehoursminutesseconds",
    "weekday",
    "weekdayhours",
    "weekdayhoursminutes",
    "weekdayhoursminutesseconds",
    "dayhours",
    "dayhoursminutes",
    "dayhoursminutesseconds",
    "hoursminutes",
    "hoursminutesseconds",
    "minutesseconds",
    "secondsmilliseconds",
];

/// Measurement type of an encoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingType {
    /// Continuous numbers (`Q`).
    Quantitative,
    /// Ordered categories (`O`).
    Ordinal,
    /// Unordered categories (`N`).
    Nominal,
    /// Dates and times (`T`).
    Temporal,
    /// Geographic shapes (`G`).
    GeoJson,
}

impl EncodingType {
    /// The Vega-Lite type name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EncodingType::Quantitative => "quantitative",
            EncodingType::Ordinal => "ordinal",
            EncodingType::Nominal => "nominal",
            EncodingType::Temporal => "temporal",
            EncodingType::GeoJson => "geojson",
        }
    }

    /// Infer the type of a column from its values.
    ///
    /// Returns `None` for an empty or all-null column.
    #[must_use]
    pub fn infer(values: &[DataValue]) -> Option<Self> {
        let mut non_null = values.iter().filter(|v| !matches!(v, DataValue::Null)).peekable();
        non_null.peek()?;
        if non_null.all(DataValue::is_number) {
            Some(EncodingType::Quantitative)
        } else {
            Some(EncodingType::Nominal)
        }
    }
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Q" | "quantitative" => Ok(EncodingType::Quantitative),
            "O" | "ordinal" => Ok(EncodingType::Ordinal),
            "N" | "nominal" => Ok(EncodingType::Nominal),
            "T" | "temporal" => Ok(EncodingType::Temporal),
            "G" | "geojson" => Ok(EncodingType::GeoJson),
            other => Err(Error::invalid_spec(format!("unknown encoding type `{other}`"))),
        }
    }
}

/// The components of a parsed shorthand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shorthand {
    /// Field name, with escapes removed.
    pub field: Option<String>,
    /// Aggregate operation.
    pub aggregate: Option<String>,
    /// Time unit.
    pub time_unit: Option<String>,
    /// Encoding type, explicit or inferred.
    pub encoding_type: Option<EncodingType>,
}

impl Shorthand {
    /// True when nothing was parsed (empty shorthand).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Parse a shorthand string into its components.
///
/// Every string parses. A trailing `:type` is split off only when it names a
/// valid type; otherwise the colon belongs to the field name. Without an
/// explicit type, `count()` is quantitative, a time unit is temporal, and
/// anything else takes the type inferred from the named column of `data`.
///
/// # Example
///
/// ```rust
/// use vl_scatter::grammar::{parse_shorthand, EncodingType};
///
/// let parsed = parse_shorthand("mean(price):Q", None);
/// assert_eq!(parsed.aggregate.as_deref(), Some("mean"));
/// assert_eq!(parsed.field.as_deref(), Some("price"));
/// assert_eq!(parsed.encoding_type, Some(EncodingType::Quantitative));
///
/// let parsed = parse_shorthand("temp:C", None);
/// assert_eq!(parsed.field.as_deref(), Some("temp:C"));
/// ```
pub fn parse_shorthand(shorthand: &str, data: Option<&DataFrame>) -> Shorthand {
    trace!(shorthand, "parsing shorthand");

    let (body, encoding_type) = split_type(shorthand);
    let mut parsed = Shorthand { encoding_type, ..Shorthand::default() };

    match split_call(body) {
        Some((op, inner)) if AGGREGATES.contains(&op) => {
            parsed.aggregate = Some(op.to_string());
            parsed.field = field_name(inner);
            if op == "count" && parsed.field.is_none() {
                parsed.encoding_type = parsed.encoding_type.or(Some(EncodingType::Quantitative));
            }
        }
        Some((op, inner)) if is_time_unit(op) => {
            parsed.time_unit = Some(op.to_string());
            parsed.field = field_name(inner);
            parsed.encoding_type = parsed.encoding_type.or(Some(EncodingType::Temporal));
        }
        _ => parsed.field = field_name(body),
    }

    if parsed.encoding_type.is_none() {
        parsed.encoding_type = data
            .zip(parsed.field.as_deref())
            .and_then(|(df, field)| df.get(field))
            .and_then(EncodingType::infer);
    }

    parsed
}

/// Split off a trailing `:type` at the last unescaped colon, if `type` is valid.
fn split_type(shorthand: &str) -> (&str, Option<EncodingType>) {
    let bytes = shorthand.as_bytes();
    let Some(idx) = shorthand
        .match_indices(':')
        .map(|(idx, _)| idx)
        .rfind(|&idx| idx == 0 || bytes[idx - 1] != b'\\')
    else {
        return (shorthand, None);
    };
    match shorthand[idx + 1..].parse() {
        Ok(encoding_type) => (&shorthand[..idx], Some(encoding_type)),
        Err(_) => (shorthand, None),
    }
}

/// Split `op(inner)` into its parts.
fn split_call(body: &str) -> Option<(&str, &str)> {
    let inner = body.strip_suffix(')')?;
    let (op, inner) = inner.split_once('(')?;
    if op.is_empty() || !op.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some((op, inner))
}

fn is_time_unit(op: &str) -> bool {
    let local = op.strip_prefix("utc").unwrap_or(op);
    TIME_UNITS.contains(&local)
}

fn field_name(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.replace("\\:", ":"))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// A bare identifier always parses to itself as the field.
        #[test]
        fn prop_identifier_is_field(name in "[a-z_][a-z0-9_]{0,12}") {
            let parsed = parse_shorthand(&name, None);
            prop_assert_eq!(parsed.field.as_deref(), Some(name.as_str()));
            prop_assert!(parsed.aggregate.is_none());
        }

        /// Every aggregate op wrapping a field yields that aggregate.
        #[test]
        fn prop_aggregate_is_detected(
            op in proptest::sample::select(AGGREGATES),
            name in "[a-z][a-z0-9]{0,8}",
        ) {
            let parsed = parse_shorthand(&format!("{op}({name}):Q"), None);
            prop_assert_eq!(parsed.aggregate.as_deref(), Some(op));
            prop_assert_eq!(parsed.field.as_deref(), Some(name.as_str()));
        }
    }
}
