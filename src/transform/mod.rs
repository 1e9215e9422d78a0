//! # Cleaning
//!
//! Turns null-like strings ("NA", "null", "not available", "nan", "none",
//! "ns", blank) into the missing marker across a selection of columns and
//! drops the rows that end up with a missing value there.

pub mod clean;
pub mod report;

pub use clean::{clean, is_null_like, normalize, NULL_LIKE_TOKENS};
pub use report::CleaningReport;
