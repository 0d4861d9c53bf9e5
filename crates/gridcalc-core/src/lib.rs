//! # gridcalc-core
//!
//! Core data structures for the gridcalc formula engine.
//!
//! This crate provides the fundamental types used throughout gridcalc:
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`CellRecord`] - What a cell stores (a literal or a formula)
//! - [`ResolvedValue`] - What a cell displays once resolved
//! - [`Sheet`] - A sparse grid, and the [`CellProvider`] view of it
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellRecord, Sheet};
//!
//! let mut sheet = Sheet::new("Sheet1");
//! sheet.set_cell_value("A1", "Score").unwrap();
//! sheet.set_cell_value("A2", "=SUM(B2:B3)").unwrap();
//!
//! assert!(sheet.cell("A2").unwrap().is_some_and(CellRecord::is_formula));
//! ```

pub mod cell;
pub mod error;
pub mod sheet;

// Re-exports for convenience
pub use cell::{
    parse_number, CellAddress, CellError, CellRange, CellRangeIterator, CellRecord,
    ResolvedValue,
};
pub use error::{Error, Result};
pub use sheet::{CellProvider, Sheet};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Number of columns in a sheet (single letters A-Z)
pub const MAX_COLS: u8 = 26;
