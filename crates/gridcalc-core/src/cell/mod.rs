//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`CellRecord`] - What a cell stores (literal or formula)
//! - [`ResolvedValue`] - What a cell displays

mod address;
mod record;
mod value;

pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use record::CellRecord;
pub use value::{parse_number, CellError, ResolvedValue};
