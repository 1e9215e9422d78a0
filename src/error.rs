use thiserror::Error;

/// Main error type for the sheet refinery.
/// Aggregates the errors of the loader, data model, exporters and configuration.
#[derive(Error, Debug)]
pub enum RefineryError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    // Database module errors
    #[error("{0}")]
    TableError(#[from] crate::database::TableError),

    // Export module errors
    #[error("{0}")]
    ExportError(#[from] crate::export::ExportError),

    #[error("{0}")]
    ConfigError(#[from] crate::config::ConfigError),
}

pub trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, RefineryError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| RefineryError::WithContextError(format!("{}: {}", message, e)))
    }
}
