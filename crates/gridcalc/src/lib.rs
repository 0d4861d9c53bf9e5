//! # gridcalc
//!
//! A formula evaluation engine for sparse spreadsheet grids.
//!
//! Cells hold either a literal or a formula (text starting with `=`).
//! Formulas support `+ - * /` with parentheses, single-letter cell
//! references such as `B4`, and the `SUM` and `SUMIF` functions.
//!
//! ## Features
//!
//! - Shunting-yard arithmetic with cell references
//! - `SUM` over numbers, cells and ranges; `SUMIF` with `>`, `<` and `=`
//!   criteria
//! - Column-major range expansion
//! - Dependency-ordered, memoized evaluation with circular reference
//!   detection (`#CIRCULAR!`)
//! - Failing formulas resolve to `#ERROR!` instead of panicking
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Sheet::new("Sheet1");
//! sheet.set_cell_value("B2", "30").unwrap();
//! sheet.set_cell_value("B3", "25").unwrap();
//! sheet.set_cell_value("B4", "=SUM(B2:B3)").unwrap();
//! sheet.set_cell_value("C1", "=C2").unwrap();
//! sheet.set_cell_value("C2", "=C1").unwrap();
//!
//! assert_eq!(sheet.value("B4").unwrap(), ResolvedValue::Number(55.0));
//! assert_eq!(sheet.value("C1").unwrap().to_string(), "#CIRCULAR!");
//!
//! // Store every formula's result in the sheet
//! let stats = sheet.calculate().unwrap();
//! assert_eq!(stats.formula_count, 3);
//! ```

pub mod calculation;
pub mod prelude;

// Re-export calculation types
pub use calculation::{CalculationOptions, CalculationStats, Evaluator, SheetCalculationExt};

// Re-export core types
pub use gridcalc_core::{
    parse_number, CellAddress, CellError, CellProvider, CellRange, CellRecord, Error,
    ResolvedValue, Result, Sheet, MAX_COLS, MAX_ROWS,
};

// Re-export formula types
pub use gridcalc_formula::{
    classify_args, evaluate_arithmetic, expand_range, parse_formula, registry, resolve,
    Argument, Formula, FormulaError, FormulaResult, FunctionDef, ValueLookup,
};
