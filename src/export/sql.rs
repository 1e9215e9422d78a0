//! SQL script generation: one `CREATE TABLE` plus one `INSERT` per row.

use crate::database::value::{format_float, format_timestamp};
use crate::database::{Table, Value};
use crate::export::dialect::Dialect;
use crate::export::identifier::sanitize;
use serde::Serialize;
use tracing::{debug, warn};

/// Generated SQL text, split so that both halves can be previewed separately.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SqlScript {
    /// `CREATE TABLE IF NOT EXISTS ...;` followed by a newline
    pub create: String,
    /// `INSERT INTO ...;` statements joined by newlines
    pub inserts: String,
}

impl SqlScript {
    /// True when no statement was generated at all.
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.inserts.is_empty()
    }

    /// The complete script: the create statement, a blank line, the inserts.
    pub fn full(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("{}\n{}", self.create, self.inserts)
        }
    }
}

/// Renders a value as a SQL literal.
///
/// Missing values and non-finite floats become `NULL`, numbers are written
/// bare, booleans as `TRUE`/`FALSE`, everything else single-quoted with
/// embedded quotes doubled.
pub fn sql_literal(value: &Value) -> String {
    match value {
        Value::Missing => "NULL".to_owned(),
        Value::Integer(value) => value.to_string(),
        Value::Float(value) if value.is_finite() => format_float(*value),
        Value::Float(_) => "NULL".to_owned(),
        Value::Boolean(true) => "TRUE".to_owned(),
        Value::Boolean(false) => "FALSE".to_owned(),
        Value::Timestamp(value) => quote(&format_timestamp(value, ' ')),
        Value::Text(value) => quote(value),
    }
}

/// Wraps text in single quotes, doubling the quotes it contains.
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Generates the `CREATE TABLE` statement and the `INSERT` statements for
/// `table`.
///
/// The table name and all column names are passed through [`sanitize`]. Two
/// source columns that sanitize to the same identifier are emitted as is; see
/// [`identifier_collisions`](crate::export::identifier::identifier_collisions)
/// to detect that case up front. A table without columns yields an empty
/// script rather than invalid SQL.
pub fn generate_sql(table: &Table, table_name: &str, dialect: Dialect) -> SqlScript {
    let table_name = sanitize(table_name);
    if table.column_count() == 0 {
        warn!(table = %table_name, "Table has no columns, no SQL generated");
        return SqlScript::default();
    }

    let identifiers: Vec<String> = table.column_names().map(sanitize).collect();

    let definitions: Vec<String> = table
        .columns()
        .iter()
        .zip(&identifiers)
        .map(|(column, identifier)| format!("    {} {}", identifier, dialect.sql_type(column.kind)))
        .collect();
    let create = format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n);\n",
        table_name,
        definitions.join(",\n")
    );

    let column_list = identifiers.join(", ");
    let inserts: Vec<String> = table
        .rows()
        .map(|row| {
            let values: Vec<String> = row.values().map(sql_literal).collect();
            format!(
                "INSERT INTO {} ({}) VALUES ({});",
                table_name,
                column_list,
                values.join(", ")
            )
        })
        .collect();

    debug!(
        table = %table_name,
        %dialect,
        statements = inserts.len(),
        "Generated SQL"
    );
    SqlScript {
        create,
        inserts: inserts.join("\n"),
    }
}
