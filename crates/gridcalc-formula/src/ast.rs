//! Parsed formula types

use gridcalc_core::{CellAddress, CellRange};

/// A parsed formula
///
/// Function names are dispatched once, at parse time, into one of these
/// variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// `=SUM(arg, ...)`
    Sum(Vec<Argument>),

    /// `=SUMIF(range, criterion[, sum_range])`
    SumIf {
        range: Argument,
        criterion: Argument,
        sum_range: Option<Argument>,
    },

    /// Any other formula: arithmetic over numbers and cell references
    Arithmetic(Vec<Token>),
}

impl Formula {
    /// Every cell or range the formula reads, in the order written
    ///
    /// Single cells are reported as one-cell ranges.
    pub fn references(&self) -> Vec<CellRange> {
        match self {
            Formula::Sum(args) => args.iter().filter_map(Argument::reference).collect(),
            Formula::SumIf {
                range,
                criterion,
                sum_range,
            } => [Some(range), Some(criterion), sum_range.as_ref()]
                .into_iter()
                .flatten()
                .filter_map(Argument::reference)
                .collect(),
            Formula::Arithmetic(tokens) => tokens
                .iter()
                .filter_map(|token| match token {
                    Token::CellRef(addr) => Some(CellRange::single(*addr)),
                    _ => None,
                })
                .collect(),
        }
    }
}

/// A classified function argument
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A range such as `A1:B3`
    Range(CellRange),
    /// A single cell reference such as `B4`
    CellRef(CellAddress),
    /// A double-quoted string, quotes stripped
    Text(String),
    /// A bare comparison such as `>10`, kept as written
    Criterion(String),
    /// Anything else, read as a number (NaN when it is not one)
    Number(f64),
}

impl Argument {
    /// The cells this argument reads, if any
    pub fn reference(&self) -> Option<CellRange> {
        match self {
            Argument::Range(range) => Some(*range),
            Argument::CellRef(addr) => Some(CellRange::single(*addr)),
            _ => None,
        }
    }

    /// Short description of the argument kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Argument::Range(_) => "range",
            Argument::CellRef(_) => "cell reference",
            Argument::Text(_) => "string",
            Argument::Criterion(_) => "criterion",
            Argument::Number(_) => "number",
        }
    }
}

/// Arithmetic token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    CellRef(CellAddress),
    Operator(Operator),
    LeftParen,
    RightParen,
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Binding strength: `*` and `/` bind tighter than `+` and `-`
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }
}
