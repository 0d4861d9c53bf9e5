//! Formula parser
//!
//! A formula body that starts with a registered function name followed by
//! `(` is a function call; anything else is arithmetic. Unregistered names
//! are not an error: their letters are simply skipped by the arithmetic
//! tokenizer.

use lazy_regex::regex_captures;

use crate::args::classify_args;
use crate::arithmetic::tokenize_formula;
use crate::ast::Formula;
use crate::error::{FormulaError, FormulaResult};
use crate::functions::{registry, FunctionKind};

/// Parse a formula string (must start with `=`)
pub fn parse_formula(formula: &str) -> FormulaResult<Formula> {
    let body = formula
        .strip_prefix('=')
        .ok_or_else(|| FormulaError::Parse("formula must start with '='".into()))?
        .trim();

    if let Some((_, name, rest)) = regex_captures!(r"^([A-Za-z][A-Za-z0-9]*)\s*\((.*)$"s, body) {
        if let Some(def) = registry().get(name) {
            let inner = rest.strip_suffix(')').ok_or_else(|| {
                FormulaError::Parse(format!("missing closing parenthesis in {} call", def.name))
            })?;

            let args = classify_args(inner)?;
            def.check_arity(args.len())?;

            return match def.kind {
                FunctionKind::Sum => Ok(Formula::Sum(args)),
                FunctionKind::SumIf => {
                    let mut args = args.into_iter();
                    match (args.next(), args.next(), args.next()) {
                        (Some(range), Some(criterion), sum_range) => Ok(Formula::SumIf {
                            range,
                            criterion,
                            sum_range,
                        }),
                        _ => Err(FormulaError::Parse("SUMIF needs a range and a criterion".into())),
                    }
                }
            };
        }
    }

    Ok(Formula::Arithmetic(tokenize_formula(body)?))
}
