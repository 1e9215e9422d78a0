use crate::database::column::ColumnType;
use chrono::{NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// A single cell value of a loaded table.
///
/// `Missing` is the distinguished "no value" state: it can sit in a column of
/// any type and is never equal to any text content.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Missing,
    /// 64-bit signed integers
    Integer(i64),
    /// Double precision floating point numbers
    Float(f64),
    /// Boolean values (true/false)
    Boolean(bool),
    /// Date and time without time zone
    Timestamp(NaiveDateTime),
    /// Any other textual content
    Text(String),
}

impl Value {
    /// Returns true for the missing marker and for floating-point NaN.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Float(value) => value.is_nan(),
            _ => false,
        }
    }

    /// The semantic type this single value suggests for its column.
    ///
    /// Floats without a fractional part count as integers, since workbooks
    /// usually store every number as a float, as long as they fit an `i64`.
    /// Missing values suggest nothing.
    pub fn kind(&self) -> Option<ColumnType> {
        match self {
            Value::Missing => None,
            Value::Float(value) if value.is_nan() => None,
            Value::Integer(_) => Some(ColumnType::Integer),
            Value::Float(value) if is_integral(*value) => Some(ColumnType::Integer),
            Value::Float(_) => Some(ColumnType::Float),
            Value::Boolean(_) => Some(ColumnType::Boolean),
            Value::Timestamp(_) => Some(ColumnType::Timestamp),
            Value::Text(_) => Some(ColumnType::Text),
        }
    }

    /// Converts the value to the representation used by a column of `kind`.
    ///
    /// Only lossless numeric conversions happen; everything else is kept as is.
    /// Integral floats in a text column become integers as well, so that a
    /// number typed as `30` next to strings still reads `30`.
    pub(crate) fn coerce(self, kind: ColumnType) -> Value {
        match (kind, self) {
            (ColumnType::Integer | ColumnType::Text, Value::Float(value)) if is_integral(value) => {
                Value::Integer(value as i64)
            }
            (ColumnType::Float, Value::Integer(value)) => Value::Float(value as f64),
            (_, value) => value,
        }
    }
}

/// Formats a float the way the cleaner and SQL literals expect:
/// integral values keep a trailing `.0`.
pub(crate) fn format_float(value: f64) -> String {
    if is_integral(value) && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Formats a timestamp with the given date/time separator, adding fractional
/// seconds only when present.
pub(crate) fn format_timestamp(value: &NaiveDateTime, separator: char) -> String {
    let pattern = if value.nanosecond() == 0 {
        format!("%Y-%m-%d{separator}%H:%M:%S")
    } else {
        format!("%Y-%m-%d{separator}%H:%M:%S%.f")
    };
    value.format(&pattern).to_string()
}

/// True for floats with no fractional part that convert to `i64` exactly.
/// `i64::MAX as f64` rounds up to 2^63, hence the exclusive upper bound.
fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64
}

impl Display for Value {
    /// Textual representation of the value. The missing marker renders as the
    /// empty string.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Float(value) => f.write_str(&format_float(*value)),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Timestamp(value) => f.write_str(&format_timestamp(value, ' ')),
            Value::Text(value) => f.write_str(value),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Missing => serializer.serialize_none(),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Float(value) if value.is_finite() => serializer.serialize_f64(*value),
            Value::Float(_) => serializer.serialize_none(),
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::Timestamp(value) => serializer.serialize_str(&format_timestamp(value, 'T')),
            Value::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(hour, 4, 5)
            .unwrap()
    }

    #[test]
    fn textual_representation() {
        assert_eq!(Value::Missing.to_string(), "");
        assert_eq!(Value::Integer(-42).to_string(), "-42");
        assert_eq!(Value::Float(30.0).to_string(), "30.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Timestamp(timestamp(3)).to_string(), "2024-01-02 03:04:05");
        assert_eq!(Value::from(" Bob ").to_string(), " Bob ");
    }

    #[test]
    fn kind_of_values() {
        assert_eq!(Value::Missing.kind(), None);
        assert_eq!(Value::Float(f64::NAN).kind(), None);
        assert_eq!(Value::Float(3.0).kind(), Some(ColumnType::Integer));
        assert_eq!(Value::Float(3.5).kind(), Some(ColumnType::Float));
        assert_eq!(Value::Boolean(false).kind(), Some(ColumnType::Boolean));
        assert_eq!(Value::from("x").kind(), Some(ColumnType::Text));
    }

    #[test]
    fn missing_detection() {
        assert!(Value::Missing.is_missing());
        assert!(Value::Float(f64::NAN).is_missing());
        assert!(!Value::from("").is_missing());
        assert!(!Value::Integer(0).is_missing());
    }

    #[test]
    fn coerce_numbers() {
        assert_eq!(Value::Float(7.0).coerce(ColumnType::Integer), Value::Integer(7));
        assert_eq!(Value::Integer(7).coerce(ColumnType::Float), Value::Float(7.0));
        assert_eq!(Value::Float(7.5).coerce(ColumnType::Integer), Value::Float(7.5));
        assert_eq!(Value::Missing.coerce(ColumnType::Float), Value::Missing);
        assert_eq!(Value::Float(30.0).coerce(ColumnType::Text), Value::Integer(30));
        assert_eq!(Value::Float(0.5).coerce(ColumnType::Text), Value::Float(0.5));
    }

    #[test]
    fn out_of_range_floats_stay_floats() {
        assert_eq!(Value::Float(1e20).kind(), Some(ColumnType::Float));
        assert_eq!(Value::Float(-1e20).kind(), Some(ColumnType::Float));
        assert_eq!(Value::Float(9.223372036854775807e18).kind(), Some(ColumnType::Float));
        assert_eq!(Value::Float(-9.223372036854775808e18).kind(), Some(ColumnType::Integer));
        assert_eq!(Value::Float(1e20).coerce(ColumnType::Integer), Value::Float(1e20));
        assert_eq!(Value::Float(1e20).coerce(ColumnType::Text), Value::Float(1e20));
        assert_eq!(Value::Float(1e20).to_string(), "100000000000000000000");
    }

    #[test]
    fn serialize_to_json() {
        let values = vec![
            Value::Missing,
            Value::Integer(1),
            Value::Float(1.5),
            Value::Float(f64::INFINITY),
            Value::Boolean(true),
            Value::Timestamp(timestamp(3)),
            Value::from("a"),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,1,1.5,null,true,"2024-01-02T03:04:05","a"]"#);
    }

    #[test]
    fn optional_values() {
        assert_eq!(Value::from(None::<i64>), Value::Missing);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
