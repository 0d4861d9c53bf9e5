//! Criterion parsing and matching for SUMIF
//!
//! A criterion is a comparison operator followed by a number, such as `>10`.
//! The operand is whatever is left after removing every `"`, `>`, `<` and
//! `=`; the operator is the leading character alone. `>=5` therefore
//! behaves like `>5`, and `<>5` like `<5`.

use gridcalc_core::parse_number;

use crate::error::{FormulaError, FormulaResult};

/// Comparison applied by a criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    LessThan,
    Equal,
}

/// A parsed SUMIF criterion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criterion {
    pub comparison: Comparison,
    pub operand: f64,
}

impl Criterion {
    /// Parse criterion text
    ///
    /// A criterion without a leading operator compares for equality.
    pub fn parse(text: &str) -> FormulaResult<Self> {
        let text = text.trim();
        let comparison = match text.chars().next() {
            Some('>') => Comparison::GreaterThan,
            Some('<') => Comparison::LessThan,
            _ => Comparison::Equal,
        };

        let operand: String = text
            .chars()
            .filter(|c| !matches!(c, '"' | '>' | '<' | '='))
            .collect();
        let operand = parse_number(&operand).ok_or_else(|| {
            FormulaError::Argument(format!("criterion '{}' has no numeric operand", text))
        })?;

        Ok(Self {
            comparison,
            operand,
        })
    }

    /// Check a numeric cell value against the criterion
    pub fn matches(&self, value: f64) -> bool {
        match self.comparison {
            Comparison::GreaterThan => value > self.operand,
            Comparison::LessThan => value < self.operand,
            Comparison::Equal => value == self.operand,
        }
    }
}
