//! JSON serialization of tables in several orientations.

use crate::database::{Column, RowRef, Table};
use crate::export::ExportError;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Shape of the JSON document produced for a table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonOrient {
    /// `[{column: value}, ...]`
    #[default]
    Records,
    /// `{column: {index: value}}`
    Columns,
    /// `{index: {column: value}}`
    Index,
    /// `[[value, ...], ...]`
    Values,
    /// `{"schema": {...}, "data": [{"index": i, column: value}, ...]}`
    Table,
}

impl JsonOrient {
    pub const ALL: [JsonOrient; 5] = [
        JsonOrient::Records,
        JsonOrient::Columns,
        JsonOrient::Index,
        JsonOrient::Values,
        JsonOrient::Table,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            JsonOrient::Records => "records",
            JsonOrient::Columns => "columns",
            JsonOrient::Index => "index",
            JsonOrient::Values => "values",
            JsonOrient::Table => "table",
        }
    }
}

impl FromStr for JsonOrient {
    type Err = ExportError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        JsonOrient::ALL
            .into_iter()
            .find(|orient| orient.as_str().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ExportError::UnknownOrient(name.to_owned()))
    }
}

impl Display for JsonOrient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializes `table` as JSON in the given orientation.
///
/// An `indent` of 0 produces compact single-line output; any other value
/// pretty-prints with that many spaces per level. Missing values are written
/// as `null` and column order is preserved in every object.
pub fn to_json(table: &Table, orient: JsonOrient, indent: usize) -> Result<String, ExportError> {
    let document = Document { table, orient };
    if indent == 0 {
        return Ok(serde_json::to_string(&document)?);
    }
    let spaces = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&spaces);
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    document.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}

struct Document<'a> {
    table: &'a Table,
    orient: JsonOrient,
}

impl Serialize for Document<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let table = self.table;
        match self.orient {
            JsonOrient::Records => serializer.collect_seq(table.rows().map(RowObject::plain)),
            JsonOrient::Values => serializer.collect_seq(table.rows().map(RowArray)),
            JsonOrient::Columns => serializer.collect_map(
                table
                    .columns()
                    .iter()
                    .map(|column| (column.name.as_str(), ColumnObject { column, table })),
            ),
            JsonOrient::Index => serializer.collect_map(
                table
                    .rows()
                    .map(|row| (row.label().to_string(), RowObject::plain(row))),
            ),
            JsonOrient::Table => {
                let index_name = index_field_name(table);
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("schema", &Schema { table, index_name })?;
                map.serialize_entry(
                    "data",
                    &Rows {
                        table,
                        index_name: Some(index_name),
                    },
                )?;
                map.end()
            }
        }
    }
}

/// Name of the index field in table orientation; avoids clashing with a
/// column already called `index`.
fn index_field_name(table: &Table) -> &'static str {
    if table.column("index").is_some() {
        "level_0"
    } else {
        "index"
    }
}

/// A row as an object of column name to value, optionally led by its index.
struct RowObject<'a> {
    row: RowRef<'a>,
    index_name: Option<&'static str>,
}

impl<'a> RowObject<'a> {
    fn plain(row: RowRef<'a>) -> Self {
        RowObject {
            row,
            index_name: None,
        }
    }
}

impl Serialize for RowObject<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(index_name) = self.index_name {
            map.serialize_entry(index_name, &self.row.label())?;
        }
        for (name, value) in self.row.entries() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct RowArray<'a>(RowRef<'a>);

impl Serialize for RowArray<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.values())
    }
}

/// One column as an object of index label to value.
struct ColumnObject<'a> {
    column: &'a Column,
    table: &'a Table,
}

impl Serialize for ColumnObject<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            self.table
                .index()
                .iter()
                .zip(&self.column.values)
                .map(|(label, value)| (label.to_string(), value)),
        )
    }
}

struct Rows<'a> {
    table: &'a Table,
    index_name: Option<&'static str>,
}

impl Serialize for Rows<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.table.row_count()))?;
        for row in self.table.rows() {
            seq.serialize_element(&RowObject {
                row,
                index_name: self.index_name,
            })?;
        }
        seq.end()
    }
}

struct Schema<'a> {
    table: &'a Table,
    index_name: &'static str,
}

#[derive(Serialize)]
struct Field<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

impl Serialize for Schema<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut fields = vec![Field {
            name: self.index_name,
            kind: "integer",
        }];
        fields.extend(self.table.columns().iter().map(|column| Field {
            name: column.name.as_str(),
            kind: column.kind.json_field_type(),
        }));
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("fields", &fields)?;
        map.serialize_entry("primaryKey", &[self.index_name])?;
        map.end()
    }
}
