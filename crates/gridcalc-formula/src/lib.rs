//! # gridcalc-formula
//!
//! Formula parser and evaluator for gridcalc.
//!
//! This crate provides:
//! - Arithmetic tokenizing and shunting-yard evaluation
//! - Range expansion and argument classification
//! - Formula parsing into tagged variants (`SUM`, `SUMIF`, arithmetic)
//! - Resolution of a formula against a caller-supplied [`ValueLookup`]
//! - Dependency tracking and cycle detection for calculation chains
//!
//! The crate holds no state of its own.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellAddress, ResolvedValue};
//! use gridcalc_formula::resolve;
//!
//! let mut lookup = |addr: CellAddress| {
//!     if addr.col == 0 {
//!         ResolvedValue::Number(10.0)
//!     } else {
//!         ResolvedValue::Empty
//!     }
//! };
//! assert_eq!(resolve("=SUM(A1:A3)", &mut lookup), ResolvedValue::Number(30.0));
//! ```

pub mod args;
pub mod arithmetic;
pub mod ast;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod range;

pub use args::classify_args;
pub use arithmetic::evaluate_arithmetic;
pub use ast::{Argument, Formula, Operator, Token};
pub use dependency::{DependencyGraph, EvaluationPlan};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, resolve, ValueLookup};
pub use functions::{registry, FunctionDef, FunctionRegistry};
pub use parser::parse_formula;
pub use range::{expand_range, DEFAULT_MAX_RANGE_CELLS};
