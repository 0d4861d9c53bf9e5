//! Stored cell contents

use super::value::ResolvedValue;

/// What a cell stores: a literal or a formula, never both
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellRecord {
    /// Literal text (numeric or not), displayed as-is
    Literal(String),

    /// Formula with the result of the last calculation
    Formula {
        /// Original formula text (e.g., "=SUM(B2:B3)")
        text: String,
        /// Last calculated value (cleared whenever the sheet changes)
        cached_value: Option<ResolvedValue>,
    },
}

impl CellRecord {
    /// Build a record from what a user typed into a cell
    ///
    /// Text beginning with `=` is a formula; empty text means no record.
    pub fn from_input(input: &str) -> Option<Self> {
        if input.is_empty() {
            None
        } else if input.starts_with('=') {
            Some(Self::formula(input))
        } else {
            Some(CellRecord::Literal(input.to_string()))
        }
    }

    /// Create a new formula record with no cached result
    pub fn formula<S: Into<String>>(text: S) -> Self {
        CellRecord::Formula {
            text: text.into(),
            cached_value: None,
        }
    }

    /// Check if the record holds a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellRecord::Formula { .. })
    }

    /// Get the formula text, if this is a formula
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellRecord::Formula { text, .. } => Some(text),
            CellRecord::Literal(_) => None,
        }
    }

    /// The text shown when the cell is edited (formula or literal)
    pub fn input_text(&self) -> &str {
        match self {
            CellRecord::Literal(text) => text,
            CellRecord::Formula { text, .. } => text,
        }
    }

    /// Get the cached result of a formula, if one has been stored
    pub fn cached_value(&self) -> Option<&ResolvedValue> {
        match self {
            CellRecord::Formula { cached_value, .. } => cached_value.as_ref(),
            CellRecord::Literal(_) => None,
        }
    }
}
