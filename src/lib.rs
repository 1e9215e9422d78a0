//! # Sheet Refinery
//!
//! Converts one worksheet of an Excel or OpenDocument workbook into a clean
//! JSON document and a SQL script.
//!
//! ## Features
//!
//! - **Multi-format support**: Read Excel files (`.xls`, `.xlsx`, `.xlsm`, `.xlsb`, `.xla`, `.xlam`)
//!   and OpenDocument spreadsheet files (`.ods`), from disk or from memory
//! - **Type inference**: Integer, float, boolean, timestamp and text columns detected from cell values
//! - **Cleaning**: Null-like strings (`NA`, `null`, `not available`, `nan`, `none`, `ns`, blank)
//!   in selected columns become missing and their rows are dropped
//! - **JSON output**: `records`, `columns`, `index`, `values` and `table` orientations,
//!   compact or indented
//! - **SQL output**: `CREATE TABLE IF NOT EXISTS` plus one `INSERT` per row, with column types
//!   for MySQL, PostgreSQL or SQLite and sanitized identifiers
//!
//! ## Example
//!
//! ```no_run
//! use sheet_refinery::config::ExportConfig;
//! use sheet_refinery::pipeline::{convert, Selection};
//! use sheet_refinery::spreadsheet::{Criteria, Spreadsheet};
//!
//! # fn main() -> Result<(), sheet_refinery::RefineryError> {
//! let mut workbook = Spreadsheet::open("people.xlsx")?;
//! let (_sheet, table) = workbook.load(&Criteria::default())?;
//! let conversion = convert(&table, &Selection::All, &ExportConfig::default())?;
//! println!("{}", conversion.sql.full());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod helpers;
pub mod logging;
pub mod pipeline;
pub mod spreadsheet;
pub mod transform;

pub use error::{RefineryError, ResultMessage};
