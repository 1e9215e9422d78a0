use crate::database::{ColumnType, Value};
use calamine::Data;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Converts a workbook cell into a table value.
///
/// Empty cells, error cells (`#N/A`, `#DIV/0!`, ...) and empty strings become
/// the missing marker. Strings are kept verbatim, in particular no null-like
/// token is interpreted here.
pub fn to_value(data: &Data) -> Value {
    match data {
        Data::Int(value) => Value::Integer(*value),
        Data::Float(value) => Value::Float(*value),
        Data::Bool(value) => Value::Boolean(*value),
        Data::String(value) if value.is_empty() => Value::Missing,
        Data::String(value) => Value::Text(value.to_owned()),
        Data::DateTime(value) => value
            .as_datetime()
            .map(Value::Timestamp)
            .unwrap_or_else(|| Value::Float(value.as_f64())),
        Data::DateTimeIso(value) => parse_iso_datetime(value)
            .map(Value::Timestamp)
            .unwrap_or_else(|| Value::Text(value.to_owned())),
        Data::DurationIso(value) => Value::Text(value.to_owned()),
        _ => Value::Missing,
    }
}

/// Text of a header cell, or `None` when the cell holds no usable name.
/// Integral numbers are rendered without a fractional part.
pub fn header_text(data: &Data) -> Option<String> {
    let value = to_value(data).coerce(ColumnType::Integer);
    if value.is_missing() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parses ISO 8601 date or date-time strings as written by OpenDocument files.
pub(crate) fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    value
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|datetime| datetime.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
