//! SUM and SUMIF

use gridcalc_core::{CellAddress, ResolvedValue};

use super::criteria::Criterion;
use crate::ast::Argument;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::ValueLookup;
use crate::range;

/// SUM: add numbers, cell references and ranges
///
/// Non-numeric cells count as zero. A literal argument that is not a number
/// is an error.
pub fn fn_sum<L>(args: &[Argument], lookup: &mut L) -> FormulaResult<f64>
where
    L: ValueLookup + ?Sized,
{
    let mut total = 0.0;

    for arg in args {
        match arg {
            Argument::Range(r) => {
                range::check_size(r, lookup.max_range_cells())?;
                for addr in r.cells() {
                    total += lookup.value(addr).to_number_or_zero();
                }
            }
            Argument::CellRef(addr) => total += lookup.value(*addr).to_number_or_zero(),
            Argument::Number(n) if !n.is_nan() => total += n,
            other => {
                return Err(FormulaError::Argument(format!(
                    "SUM cannot add a {}: {:?}",
                    other.kind(),
                    other
                )))
            }
        }
    }

    Ok(total)
}

/// SUMIF: add the cells of `sum_range` whose counterpart in `range` meets
/// the criterion
///
/// Without a sum range the matching cells of `range` itself are added. The
/// two ranges are paired position by position and must have the same shape.
pub fn fn_sumif<L>(
    range: &Argument,
    criterion: &Argument,
    sum_range: Option<&Argument>,
    lookup: &mut L,
) -> FormulaResult<f64>
where
    L: ValueLookup + ?Sized,
{
    let range_cells = sumif_cells(range, lookup.max_range_cells())?;
    let sum_cells = match sum_range {
        Some(arg) => {
            let cells = sumif_cells(arg, lookup.max_range_cells())?;
            if shape(range) != shape(arg) {
                return Err(FormulaError::Argument(format!(
                    "SUMIF ranges differ in shape: {:?} vs {:?}",
                    range.reference().map(|r| r.to_string()),
                    arg.reference().map(|r| r.to_string())
                )));
            }
            Some(cells)
        }
        None => None,
    };

    let criterion = Criterion::parse(&criterion_text(criterion, lookup)?)?;

    let range_values: Vec<ResolvedValue> = range_cells.iter().map(|a| lookup.value(*a)).collect();
    let sum_values: Vec<ResolvedValue> = match &sum_cells {
        Some(cells) => cells.iter().map(|a| lookup.value(*a)).collect(),
        None => range_values.clone(),
    };

    let mut total = 0.0;
    for (value, summand) in range_values.iter().zip(&sum_values) {
        let Some(value) = value.as_number() else {
            continue;
        };
        let summand = if summand.is_empty() {
            0.0
        } else {
            match summand.as_number() {
                Some(n) => n,
                None => continue,
            }
        };
        if criterion.matches(value) {
            total += summand;
        }
    }

    Ok(total)
}

fn sumif_cells(arg: &Argument, limit: usize) -> FormulaResult<Vec<CellAddress>> {
    match arg {
        Argument::Range(r) => range::expand(r, limit),
        Argument::CellRef(addr) => Ok(vec![*addr]),
        other => Err(FormulaError::Argument(format!(
            "SUMIF expects a range or cell reference, got a {}",
            other.kind()
        ))),
    }
}

fn shape(arg: &Argument) -> Option<(u32, u8)> {
    arg.reference().map(|r| (r.row_count(), r.col_count()))
}

fn criterion_text<L>(arg: &Argument, lookup: &mut L) -> FormulaResult<String>
where
    L: ValueLookup + ?Sized,
{
    match arg {
        Argument::Text(s) | Argument::Criterion(s) => Ok(s.clone()),
        Argument::Number(n) if !n.is_nan() => Ok(ResolvedValue::Number(*n).to_string()),
        Argument::CellRef(addr) => Ok(lookup.value(*addr).to_string()),
        other => Err(FormulaError::Argument(format!(
            "SUMIF criterion cannot be a {}",
            other.kind()
        ))),
    }
}
