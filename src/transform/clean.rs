//! Null-like value normalization and row dropping.

use crate::database::{Column, ColumnType, Table, Value};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// Tokens that stand for "no value" once trimmed, compared case-insensitively.
pub const NULL_LIKE_TOKENS: [&str; 6] = ["NA", "null", "not available", "nan", "none", "ns"];

static NULL_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:NA|null|not available|nan|none|ns)$").expect("Hardcode regex pattern")
});

/// Returns true if `text`, after trimming, is empty or one of the null-like
/// tokens. Matching is exact, never a substring search.
pub fn is_null_like(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || NULL_LIKE.is_match(text)
}

/// Normalizes one cell of a selected column: the cell is rendered as text and
/// trimmed; null-like text becomes the missing marker, anything else stays as
/// the trimmed text.
pub fn normalize(value: &Value) -> Value {
    let text = value.to_string();
    let text = text.trim();
    if is_null_like(text) {
        Value::Missing
    } else {
        Value::Text(text.to_owned())
    }
}

/// Cleans `table` over the selected column names.
///
/// Every cell of a selected column that exists in the table is normalized via
/// [`normalize`], which turns the whole column into text. Afterwards every row
/// holding the missing marker in any of those columns is dropped. Names that do
/// not exist in the table are ignored. Column set and order never change, and
/// unselected columns pass through untouched.
pub fn clean<I, S>(table: &Table, selection: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let selection: HashSet<String> = selection
        .into_iter()
        .map(|name| name.as_ref().to_owned())
        .collect();
    let selected: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, column)| selection.contains(&column.name))
        .map(|(position, _)| position)
        .collect();
    if selected.is_empty() {
        debug!("No selected column present in table, cleaning skipped");
        return table.clone();
    }

    let columns: Vec<Column> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(position, column)| {
            if selected.contains(&position) {
                Column {
                    name: column.name.to_owned(),
                    kind: ColumnType::Text,
                    values: column.values.iter().map(normalize).collect(),
                }
            } else {
                column.clone()
            }
        })
        .collect();

    let keep: Vec<bool> = (0..table.row_count())
        .map(|row| {
            selected.iter().all(|position| {
                columns
                    .get(*position)
                    .and_then(|column| column.values.get(row))
                    .is_some_and(|value| !value.is_missing())
            })
        })
        .collect();

    let cleaned = Table::filter_rows(columns, table.index(), &keep);
    debug!(
        selected = selected.len(),
        before = table.row_count(),
        after = cleaned.row_count(),
        "Cleaned table"
    );
    cleaned
}
