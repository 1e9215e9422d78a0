//! End-to-end conversion of a loaded sheet: clean the selected columns,
//! render JSON and SQL, and write both documents next to each other.

use crate::config::ExportConfig;
use crate::database::Table;
use crate::error::{RefineryError, ResultMessage};
use crate::export::{generate_sql, identifier_collisions, to_json, SqlScript};
use crate::transform::{clean, CleaningReport};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Columns the cleaner should look at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// Every column of the table
    #[default]
    All,
    /// No column; the table passes through unchanged
    Nothing,
    /// The named columns; names absent from the table are ignored
    Columns(Vec<String>),
}

impl Selection {
    /// Column names selected in `table`.
    pub fn resolve(&self, table: &Table) -> Vec<String> {
        match self {
            Selection::All => table.column_names().map(str::to_owned).collect(),
            Selection::Nothing => Vec::new(),
            Selection::Columns(names) => names.clone(),
        }
    }
}

/// Result of converting one table.
#[derive(Clone, Debug)]
pub struct Conversion {
    /// The cleaned table both documents were rendered from
    pub cleaned: Table,
    /// Row statistics of the cleaning pass
    pub report: CleaningReport,
    /// Full JSON document
    pub json: String,
    /// Full SQL script
    pub sql: SqlScript,
    /// SQL identifiers shared by more than one source column
    pub collisions: BTreeMap<String, Vec<String>>,
}

/// JSON and SQL rendered for the first rows of a conversion only.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub json: String,
    pub sql: SqlScript,
}

/// Paths of the files written by [`write_outputs`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFiles {
    pub json: PathBuf,
    pub sql: PathBuf,
}

/// Cleans `table` and renders the JSON and SQL documents.
pub fn convert(table: &Table, selection: &Selection, config: &ExportConfig) -> Result<Conversion, RefineryError> {
    config.validate()?;
    let cleaned = clean(table, selection.resolve(table));
    let report = CleaningReport::new(table, &cleaned);
    info!(
        retained = report.retained_rows,
        dropped = report.dropped_rows,
        "Cleaned table"
    );

    let collisions: BTreeMap<String, Vec<String>> = identifier_collisions(cleaned.column_names())
        .into_iter()
        .map(|(identifier, names)| (identifier, names.into_iter().map(str::to_owned).collect()))
        .collect();
    for (identifier, names) in &collisions {
        warn!(identifier = %identifier, columns = ?names, "Columns share the same SQL identifier");
    }

    let json = to_json(&cleaned, config.orient, config.indent)?;
    let sql = generate_sql(&cleaned, &config.table_name, config.dialect);
    Ok(Conversion {
        cleaned,
        report,
        json,
        sql,
        collisions,
    })
}

impl Conversion {
    /// Renders both documents for the first `config.preview_rows` rows.
    pub fn preview(&self, config: &ExportConfig) -> Result<Preview, RefineryError> {
        let head = self.cleaned.head(config.preview_rows);
        Ok(Preview {
            json: to_json(&head, config.orient, config.indent)?,
            sql: generate_sql(&head, &config.table_name, config.dialect),
        })
    }
}

/// Renders the first `rows` rows of `table` as an aligned text grid, one line
/// per row prefixed with its index label. Missing cells show as `NaN`.
pub fn format_rows(table: &Table, rows: usize) -> String {
    let head = table.head(rows);
    let cells: Vec<Vec<String>> = head
        .rows()
        .map(|row| {
            std::iter::once(row.label().to_string())
                .chain(row.values().map(|value| {
                    if value.is_missing() {
                        "NaN".to_owned()
                    } else {
                        value.to_string()
                    }
                }))
                .collect()
        })
        .collect();
    let header: Vec<String> = std::iter::once(String::new())
        .chain(head.column_names().map(str::to_owned))
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(&header)
        .chain(&cells)
        .map(|line| {
            let padded: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            padded.join("  ").trim_end().to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Base name of the output files: the source file name without its
/// extension, followed by `_<sheet>` when the workbook has several sheets.
pub fn output_stem(file_name: &str, sheet_name: &str, sheet_count: usize) -> String {
    let label = Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_owned());
    if sheet_count > 1 {
        format!("{label}_{sheet_name}")
    } else {
        label
    }
}

/// Writes `<stem>_cleaned.json` and `<stem>.sql` into `dir`, creating the
/// directory when needed.
pub fn write_outputs(dir: &Path, stem: &str, conversion: &Conversion) -> Result<OutputFiles, RefineryError> {
    std::fs::create_dir_all(dir)
        .map_err(RefineryError::from)
        .with_prefix(&dir.display().to_string())?;
    let files = OutputFiles {
        json: dir.join(format!("{stem}_cleaned.json")),
        sql: dir.join(format!("{stem}.sql")),
    };
    write_file(&files.json, &conversion.json)?;
    write_file(&files.sql, &conversion.sql.full())?;
    info!(json = %files.json.display(), sql = %files.sql.display(), "Wrote output files");
    Ok(files)
}

fn write_file(path: &Path, content: &str) -> Result<(), RefineryError> {
    std::fs::write(path, content)
        .map_err(RefineryError::from)
        .with_prefix(&path.display().to_string())
}
