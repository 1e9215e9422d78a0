use crate::database::{Column, Table, TableError, Value};
use crate::spreadsheet::cell::{header_text, to_value};
use calamine::{Data, Range};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Builds a table from a worksheet range.
///
/// The first row of the range holds the column names, every following row
/// is a record. Rows where every cell is empty are skipped. Column types are
/// inferred from the values once all rows are read.
pub fn table_from_range(range: &Range<Data>) -> Result<Table, TableError> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::empty());
    };
    let names = header_names(header);
    let width = names.len();

    let mut values: Vec<Vec<Value>> = vec![Vec::new(); width];
    let mut taken = 0;
    let mut skipped = 0;
    for row in rows {
        let record: Vec<Value> = (0..width)
            .map(|column| row.get(column).map(to_value).unwrap_or_default())
            .collect();
        if record.iter().all(Value::is_missing) {
            skipped += 1;
            continue;
        }
        for (column, value) in values.iter_mut().zip(record) {
            column.push(value);
        }
        taken += 1;
    }
    debug!(columns = width, rows = taken, skipped, "Read worksheet range");

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, values)| Column::infer(name, values))
        .collect();
    Table::new(columns)
}

/// Column names from the header row.
///
/// Blank header cells are named `Unnamed: <position>`; repeated names get a
/// `.1`, `.2`, ... suffix so that every column name is unique.
fn header_names(header: &[Data]) -> Vec<String> {
    let raw = header
        .iter()
        .enumerate()
        .map(|(position, data)| header_text(data).unwrap_or_else(|| format!("Unnamed: {position}")));

    let mut used: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(header.len());
    for name in raw {
        let mut candidate = name.clone();
        while used.contains(&candidate) {
            let counter = counters.entry(name.clone()).or_insert(0);
            *counter += 1;
            candidate = format!("{name}.{counter}");
        }
        used.insert(candidate.clone());
        names.push(candidate);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ColumnType;
    use pretty_assertions::assert_eq;

    fn range(rows: &[&[Data]]) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, data) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), data.clone());
            }
        }
        range
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_owned())
    }

    #[test]
    fn header_and_records() {
        let range = range(&[
            &[text("Name"), text("Age")],
            &[text("Alice"), text("NA")],
            &[text("Bob"), Data::Float(30.0)],
        ]);
        let table = table_from_range(&range).unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["Name", "Age"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("Name").unwrap().kind, ColumnType::Text);
        assert_eq!(
            table.column("Age").unwrap().values,
            vec![Value::from("NA"), Value::Integer(30)]
        );
    }

    #[test]
    fn infer_numeric_columns() {
        let range = range(&[
            &[text("id"), text("score"), text("ok")],
            &[Data::Float(1.0), Data::Float(1.5), Data::Bool(true)],
            &[Data::Float(2.0), Data::Empty, Data::Bool(false)],
        ]);
        let table = table_from_range(&range).unwrap();
        let id = table.column("id").unwrap();
        assert_eq!(id.kind, ColumnType::Integer);
        assert_eq!(id.values, vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(table.column("score").unwrap().kind, ColumnType::Float);
        assert_eq!(table.column("score").unwrap().values[1], Value::Missing);
        assert_eq!(table.column("ok").unwrap().kind, ColumnType::Boolean);
    }

    #[test]
    fn unnamed_and_duplicate_headers() {
        let range = range(&[
            &[text("A"), Data::Empty, text("A"), text("A.1"), text("A")],
            &[Data::Int(1), Data::Int(2), Data::Int(3), Data::Int(4), Data::Int(5)],
        ]);
        let table = table_from_range(&range).unwrap();
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["A", "Unnamed: 1", "A.1", "A.1.1", "A.2"]
        );
    }

    #[test]
    fn skip_empty_rows() {
        let rows: &[&[Data]] = &[
            &[text("A"), text("B")],
            &[Data::Int(1), text("x")],
            &[Data::Empty, Data::Empty],
            &[Data::Int(2), Data::Empty],
        ];
        let table = table_from_range(&range(rows)).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.index(), &[0, 1]);
        assert_eq!(
            table.column("A").unwrap().values,
            vec![Value::Integer(1), Value::Integer(2)]
        );
    }

    #[test]
    fn header_only_and_empty_ranges() {
        let table = table_from_range(&range(&[&[text("A"), text("B")]])).unwrap();
        assert_eq!(table.column_count(), 2);
        assert!(table.is_empty());

        let table = table_from_range(&Range::empty()).unwrap();
        assert_eq!(table.column_count(), 0);
    }
}
