use crate::database::Table;
use serde::Serialize;

/// Row statistics of a cleaning pass.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CleaningReport {
    /// Rows before cleaning
    pub original_rows: usize,
    /// Rows kept by cleaning
    pub retained_rows: usize,
    /// Rows removed by cleaning
    pub dropped_rows: usize,
    /// Percentage of retained rows, 100 for an empty input
    pub retention_rate: f64,
}

impl CleaningReport {
    /// Compares an input table with its cleaned counterpart.
    pub fn new(original: &Table, cleaned: &Table) -> Self {
        let original_rows = original.row_count();
        let retained_rows = cleaned.row_count();
        let dropped_rows = original_rows.saturating_sub(retained_rows);
        let dropped_percent = if original_rows > 0 {
            dropped_rows as f64 / original_rows as f64 * 100.0
        } else {
            0.0
        };
        CleaningReport {
            original_rows,
            retained_rows,
            dropped_rows,
            retention_rate: 100.0 - dropped_percent,
        }
    }
}
