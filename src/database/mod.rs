//! # Table Model
//!
//! In-memory representation of a loaded sheet: typed columns of cell values
//! with a missing marker, and row index labels that survive filtering.

pub mod column;
pub mod table;
pub mod value;

pub use column::{Column, ColumnType};
pub use table::{RowRef, Table, TableError};
pub use value::Value;
