//! Formula resolution against a value lookup

use gridcalc_core::{CellAddress, CellError, ResolvedValue};
use tracing::debug;

use crate::arithmetic::evaluate_tokens;
use crate::ast::Formula;
use crate::error::{FormulaError, FormulaResult};
use crate::functions::math::{fn_sum, fn_sumif};
use crate::parser::parse_formula;
use crate::range::DEFAULT_MAX_RANGE_CELLS;

/// Source of resolved values for the cells a formula references
///
/// Any `FnMut(CellAddress) -> ResolvedValue` closure is a lookup.
pub trait ValueLookup {
    /// Resolved value of a cell (`Empty` for an empty cell)
    fn value(&mut self, addr: CellAddress) -> ResolvedValue;

    /// Largest range a formula may read through this lookup
    fn max_range_cells(&self) -> usize {
        DEFAULT_MAX_RANGE_CELLS
    }
}

impl<F> ValueLookup for F
where
    F: FnMut(CellAddress) -> ResolvedValue,
{
    fn value(&mut self, addr: CellAddress) -> ResolvedValue {
        self(addr)
    }
}

/// Resolve cell input to the value it displays
///
/// Input not starting with `=` is a literal. A formula that fails to parse
/// or evaluate resolves to `#ERROR!`.
///
/// Referenced cells are read through `lookup` and nothing here guards
/// against cycles; a lookup that resolves formulas recursively must do that
/// itself.
///
/// ```
/// use gridcalc_core::{CellAddress, ResolvedValue};
/// use gridcalc_formula::resolve;
///
/// let mut lookup = |addr: CellAddress| match addr.to_string().as_str() {
///     "B2" => ResolvedValue::Number(30.0),
///     "B3" => ResolvedValue::Number(25.0),
///     _ => ResolvedValue::Empty,
/// };
///
/// assert_eq!(resolve("=SUM(B2:B3)", &mut lookup), ResolvedValue::Number(55.0));
/// assert_eq!(resolve("=B2*2", &mut lookup), ResolvedValue::Number(60.0));
/// assert_eq!(resolve("Total", &mut lookup), ResolvedValue::Text("Total".into()));
/// assert!(resolve("=SUM(", &mut lookup).is_error());
/// ```
pub fn resolve<L>(input: &str, lookup: &mut L) -> ResolvedValue
where
    L: ValueLookup + ?Sized,
{
    if !input.starts_with('=') {
        return ResolvedValue::from_literal(input);
    }

    match parse_formula(input).and_then(|formula| evaluate(&formula, lookup)) {
        Ok(value) => value,
        Err(e) => {
            debug!(formula = input, error = %e, "formula evaluation failed");
            ResolvedValue::Error(CellError::Formula)
        }
    }
}

/// Evaluate a parsed formula
pub fn evaluate<L>(formula: &Formula, lookup: &mut L) -> FormulaResult<ResolvedValue>
where
    L: ValueLookup + ?Sized,
{
    let result = match formula {
        Formula::Sum(args) => fn_sum(args, lookup)?,
        Formula::SumIf {
            range,
            criterion,
            sum_range,
        } => fn_sumif(range, criterion, sum_range.as_ref(), lookup)?,
        Formula::Arithmetic(tokens) => {
            evaluate_tokens(tokens, |addr| lookup.value(addr).to_number_or_zero())?
        }
    };

    if !result.is_finite() {
        return Err(FormulaError::Evaluation(
            "result is not a finite number".into(),
        ));
    }
    Ok(ResolvedValue::Number(result))
}
