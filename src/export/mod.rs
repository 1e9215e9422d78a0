//! # Export
//!
//! Renders a (cleaned) table as JSON in one of several orientations and as a
//! SQL script for one of three dialects. Neither path mutates the table.

pub mod dialect;
pub mod identifier;
pub mod json;
pub mod sql;

pub use dialect::{map_type, Dialect};
pub use identifier::{identifier_collisions, sanitize};
pub use json::{to_json, JsonOrient};
pub use sql::{generate_sql, sql_literal, SqlScript};

use thiserror::Error;

/// Errors raised while exporting a table or parsing export options.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unknown SQL dialect '{0}', expected mysql, postgresql or sqlite")]
    UnknownDialect(String),

    #[error("Unknown JSON orientation '{0}', expected records, columns, index, values or table")]
    UnknownOrient(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
