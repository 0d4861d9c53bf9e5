//! Range expansion

use gridcalc_core::{CellAddress, CellRange};

use crate::error::{FormulaError, FormulaResult};

/// Largest number of cells a single range may expand to by default
pub const DEFAULT_MAX_RANGE_CELLS: usize = 1_000_000;

/// Expand range text such as `C1:C2` into addresses, column-major
///
/// ```
/// use gridcalc_formula::expand_range;
///
/// let cells: Vec<String> = expand_range("A1:B2")
///     .unwrap()
///     .iter()
///     .map(|a| a.to_string())
///     .collect();
/// assert_eq!(cells, ["A1", "A2", "B1", "B2"]);
/// ```
pub fn expand_range(text: &str) -> FormulaResult<Vec<CellAddress>> {
    let range = CellRange::parse(text)?;
    expand(&range, DEFAULT_MAX_RANGE_CELLS)
}

/// Expand a parsed range, refusing ranges larger than `limit` cells
pub fn expand(range: &CellRange, limit: usize) -> FormulaResult<Vec<CellAddress>> {
    check_size(range, limit)?;
    Ok(range.cells().collect())
}

/// Fail when a range covers more than `limit` cells
pub fn check_size(range: &CellRange, limit: usize) -> FormulaResult<()> {
    let cells = range.cell_count();
    if cells > limit as u64 {
        return Err(FormulaError::RangeTooLarge {
            range: range.to_string(),
            cells,
            limit,
        });
    }
    Ok(())
}
