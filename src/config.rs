//! Export options with defaults, optionally loaded from a JSON file.

use crate::export::{Dialect, JsonOrient};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest supported JSON indentation.
pub const MAX_INDENT: usize = 4;

/// Errors raised while reading or validating the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON indent must be between 0 and 4, got {0}")]
    InvalidIndent(usize),
}

/// Options controlling the exported JSON and SQL files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Table name used in the generated SQL (sanitized before use)
    pub table_name: String,

    /// SQL dialect of the column types
    pub dialect: Dialect,

    /// Shape of the JSON document
    pub orient: JsonOrient,

    /// Spaces per JSON nesting level, 0 for compact output
    pub indent: usize,

    /// Rows shown in the console previews
    pub preview_rows: usize,

    /// Directory receiving the output files
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            table_name: "my_table".to_owned(),
            dialect: Dialect::default(),
            orient: JsonOrient::default(),
            indent: 2,
            preview_rows: 10,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportConfig {
    /// Load a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent > MAX_INDENT {
            return Err(ConfigError::InvalidIndent(self.indent));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.table_name, "my_table");
        assert_eq!(config.dialect, Dialect::Mysql);
        assert_eq!(config.orient, JsonOrient::Records);
        assert_eq!(config.indent, 2);
        assert_eq!(config.preview_rows, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config(r#"{"table_name": "people", "dialect": "postgres", "indent": 0}"#);
        let config = ExportConfig::from_file(file.path()).unwrap();
        assert_eq!(config.table_name, "people");
        assert_eq!(config.dialect, Dialect::Postgresql);
        assert_eq!(config.indent, 0);
        assert_eq!(config.orient, JsonOrient::Records);
        assert_eq!(config.preview_rows, 10);
    }

    #[test]
    fn reject_large_indent() {
        let file = write_config(r#"{"indent": 8}"#);
        let error = ExportConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidIndent(8)));
    }

    #[test]
    fn reject_bad_files() {
        let file = write_config(r#"{"dialect": "oracle"}"#);
        assert!(matches!(
            ExportConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            ExportConfig::from_file("no/such/config.json"),
            Err(ConfigError::Read { .. })
        ));
    }
}
