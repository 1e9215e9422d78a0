use clap::Parser;
use sheet_refinery::config::ExportConfig;
use sheet_refinery::export::{Dialect, JsonOrient};
use sheet_refinery::pipeline::Selection;
use sheet_refinery::spreadsheet::Criteria;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sheet_refinery",
    version,
    about = "Clean spreadsheet data and convert it to JSON and SQL"
)]
pub struct Cli {
    /// Workbook to convert (.xlsx, .xlsm, .xlsb, .xls, .ods)
    pub file: PathBuf,

    /// Print the sheet names of the workbook and exit
    #[arg(long)]
    pub list_sheets: bool,

    /// Sheet name or glob pattern (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Column to clean of null-like values; repeat for several (default: all columns)
    #[arg(long = "clean", value_name = "COLUMN", conflicts_with = "no_clean")]
    pub clean: Vec<String>,

    /// Keep every row, do not clean any column
    #[arg(long)]
    pub no_clean: bool,

    /// JSON orientation: records, columns, index, values or table
    #[arg(long)]
    pub orient: Option<JsonOrient>,

    /// JSON indentation, 0 to 4 spaces (0 writes compact JSON)
    #[arg(long)]
    pub indent: Option<usize>,

    /// SQL table name
    #[arg(long = "table")]
    pub table_name: Option<String>,

    /// SQL dialect: mysql, postgresql or sqlite
    #[arg(long)]
    pub dialect: Option<Dialect>,

    /// Directory receiving the JSON and SQL files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Number of rows shown in the previews
    #[arg(long)]
    pub preview_rows: Option<usize>,

    /// JSON file with export options; flags given on the command line win
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Merges the command line flags over `base`.
    pub fn export_config(&self, base: ExportConfig) -> ExportConfig {
        ExportConfig {
            table_name: self.table_name.clone().unwrap_or(base.table_name),
            dialect: self.dialect.unwrap_or(base.dialect),
            orient: self.orient.unwrap_or(base.orient),
            indent: self.indent.unwrap_or(base.indent),
            preview_rows: self.preview_rows.unwrap_or(base.preview_rows),
            output_dir: self.output_dir.clone().unwrap_or(base.output_dir),
        }
    }

    pub fn selection(&self) -> Selection {
        if self.no_clean {
            Selection::Nothing
        } else if self.clean.is_empty() {
            Selection::All
        } else {
            Selection::Columns(self.clean.clone())
        }
    }

    pub fn criteria(&self) -> Criteria {
        Criteria {
            sheet: self.sheet.clone(),
        }
    }
}
