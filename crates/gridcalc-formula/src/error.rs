//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Formula parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Formula evaluation error
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Reference to invalid cell or range
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Range expands to more cells than allowed
    #[error("Range {range} has {cells} cells (limit: {limit})")]
    RangeTooLarge {
        range: String,
        cells: u64,
        limit: usize,
    },
}

impl From<gridcalc_core::Error> for FormulaError {
    fn from(e: gridcalc_core::Error) -> Self {
        FormulaError::InvalidReference(e.to_string())
    }
}
