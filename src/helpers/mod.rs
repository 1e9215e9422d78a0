//! Low-level I/O helpers.

pub mod reader;
