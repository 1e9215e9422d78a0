use crate::database::value::Value;
use serde::{Deserialize, Serialize};

/// Semantic column types inferred from spreadsheet data, independent of any
/// SQL dialect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integers
    Integer,
    /// Double-precision floating point numbers
    Float,
    /// Boolean values (true/false)
    Boolean,
    /// Date and time values
    Timestamp,
    /// Strings, and the fallback for mixed or unrecognized content
    Text,
}

/// A named column of a table with its inferred type and cell values.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Column name (from header row)
    pub name: String,
    /// Column data type
    pub kind: ColumnType,
    /// Cell values in row order
    pub values: Vec<Value>,
}

impl ColumnType {
    /// Returns the string representation of the column type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Text => "text",
        }
    }

    /// Field type name used in the schema part of table-oriented JSON.
    pub const fn json_field_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Timestamp => "datetime",
            ColumnType::Text => "string",
        }
    }

    /// Detects the most specific common type from a collection of candidate types.
    /// Missing candidates are ignored; falls back to text if types are
    /// inconsistent or nothing is left.
    pub fn detect<I>(types: I) -> ColumnType
    where
        I: IntoIterator<Item = Option<ColumnType>>,
    {
        let types: Vec<ColumnType> = types.into_iter().flatten().collect();
        if types.is_empty() {
            ColumnType::Text
        } else if types.iter().all(ColumnType::is_boolean) {
            ColumnType::Boolean
        } else if types.iter().all(ColumnType::is_int) {
            ColumnType::Integer
        } else if types.iter().all(ColumnType::is_float) {
            ColumnType::Float
        } else if types.iter().all(ColumnType::is_datetime) {
            ColumnType::Timestamp
        } else {
            ColumnType::Text
        }
    }

    /// Returns true if this column type represents boolean values.
    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, ColumnType::Boolean)
    }

    /// Returns true if this column type represents integer values.
    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, ColumnType::Integer)
    }

    /// Returns true if this column type represents numeric values (integer or floating point).
    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    #[inline]
    pub fn is_datetime(&self) -> bool {
        matches!(self, ColumnType::Timestamp)
    }
}

impl Column {
    /// Creates a column with an explicit type. Values are stored as given.
    pub fn new<S>(name: S, kind: ColumnType, values: Vec<Value>) -> Self
    where
        S: Into<String>,
    {
        Column {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Creates a column whose type is inferred from its values.
    ///
    /// Numeric values are coerced to the detected numeric type: integral floats
    /// become integers in an integer column, integers widen to floats in a
    /// floating-point column. In a mixed (text) column integral floats are
    /// kept as integers, every other cell keeps its own type.
    pub fn infer<S>(name: S, values: Vec<Value>) -> Self
    where
        S: Into<String>,
    {
        let kind = ColumnType::detect(values.iter().map(Value::kind));
        let values = values.into_iter().map(|value| value.coerce(kind)).collect();
        Column::new(name, kind, values)
    }

    /// Number of cells in this column.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
