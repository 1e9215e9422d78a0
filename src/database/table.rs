use crate::database::column::Column;
use crate::database::value::Value;
use thiserror::Error;

/// Errors raised when assembling a table from columns.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column '{name}' has {found} values, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Row index has {found} labels, expected {expected}")]
    IndexLength { expected: usize, found: usize },
}

/// An in-memory table: ordered named columns of equal length plus one index
/// label per row.
///
/// The index label is the 0-based position of the row in the sheet data as
/// loaded; it survives row filtering, so a cleaned table still knows where
/// each row came from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    index: Vec<usize>,
}

/// A borrowed view of one table row.
#[derive(Copy, Clone, Debug)]
pub struct RowRef<'a> {
    table: &'a Table,
    position: usize,
}

impl Table {
    /// Creates a table with the default index `0..rows`.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        Self::with_index(columns, (0..rows).collect())
    }

    /// Creates a table with explicit row index labels.
    pub fn with_index(columns: Vec<Column>, index: Vec<usize>) -> Result<Self, TableError> {
        if let Some(column) = columns.iter().find(|column| column.len() != index.len()) {
            if columns.first().map(Column::len) == Some(column.len()) {
                return Err(TableError::IndexLength {
                    expected: column.len(),
                    found: index.len(),
                });
            }
            return Err(TableError::RaggedColumn {
                name: column.name.to_owned(),
                expected: index.len(),
                found: column.len(),
            });
        }
        Ok(Table { columns, index })
    }

    /// A table without columns and rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by its exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Row index labels in row order.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Returns the cell at (row position, column position).
    pub fn value(&self, row: usize, column: usize) -> Option<&Value> {
        self.columns.get(column)?.values.get(row)
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> + '_ {
        (0..self.row_count()).map(move |position| RowRef {
            table: self,
            position,
        })
    }

    /// Returns a new table holding the first `rows` rows.
    pub fn head(&self, rows: usize) -> Table {
        let rows = rows.min(self.row_count());
        Table {
            columns: self
                .columns
                .iter()
                .map(|column| Column {
                    name: column.name.to_owned(),
                    kind: column.kind,
                    values: column.values.iter().take(rows).cloned().collect(),
                })
                .collect(),
            index: self.index.iter().take(rows).copied().collect(),
        }
    }

    /// Returns a new table holding only the rows whose `keep` flag is set.
    /// Rows past the end of `keep` are dropped.
    pub(crate) fn filter_rows(columns: Vec<Column>, index: &[usize], keep: &[bool]) -> Table {
        let kept = |position: &usize| keep.get(*position).copied().unwrap_or(false);
        Table {
            columns: columns
                .into_iter()
                .map(|column| Column {
                    name: column.name,
                    kind: column.kind,
                    values: column
                        .values
                        .into_iter()
                        .enumerate()
                        .filter(|(position, _)| kept(position))
                        .map(|(_, value)| value)
                        .collect(),
                })
                .collect(),
            index: index
                .iter()
                .enumerate()
                .filter(|(position, _)| kept(position))
                .map(|(_, label)| *label)
                .collect(),
        }
    }
}

impl<'a> RowRef<'a> {
    /// Index label of the row.
    pub fn label(&self) -> usize {
        self.table.index.get(self.position).copied().unwrap_or(self.position)
    }

    /// Cell values of the row in column order.
    pub fn values(&self) -> impl Iterator<Item = &'a Value> + 'a {
        let position = self.position;
        self.table
            .columns
            .iter()
            .filter_map(move |column| column.values.get(position))
    }

    /// Pairs of (column name, value) in column order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let position = self.position;
        self.table.columns.iter().filter_map(move |column| {
            column
                .values
                .get(position)
                .map(|value| (column.name.as_str(), value))
        })
    }
}
