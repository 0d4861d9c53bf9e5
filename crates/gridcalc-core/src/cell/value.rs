//! Resolved cell values

use std::fmt;

/// The displayed value of a cell after resolution
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolvedValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Numeric value
    Number(f64),

    /// Text value
    Text(String),

    /// Error value (#ERROR!, #CIRCULAR!)
    Error(CellError),
}

impl ResolvedValue {
    /// Resolve a literal the way it is displayed: numeric-looking text
    /// becomes a number, anything else stays text.
    ///
    /// ```
    /// use gridcalc_core::ResolvedValue;
    ///
    /// assert_eq!(ResolvedValue::from_literal("30"), ResolvedValue::Number(30.0));
    /// assert_eq!(ResolvedValue::from_literal("Alice"), ResolvedValue::Text("Alice".into()));
    /// assert_eq!(ResolvedValue::from_literal(""), ResolvedValue::Empty);
    /// ```
    pub fn from_literal(text: &str) -> Self {
        if text.is_empty() {
            return ResolvedValue::Empty;
        }
        match parse_number(text) {
            Some(n) => ResolvedValue::Number(n),
            None => ResolvedValue::Text(text.to_string()),
        }
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, ResolvedValue::Empty)
    }

    /// Check if the value is an error
    pub fn is_error(&self) -> bool {
        matches!(self, ResolvedValue::Error(_))
    }

    /// Numeric view of the value, if it has one
    ///
    /// Numeric text counts as a number; empty, text and error values do not.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ResolvedValue::Number(n) => Some(*n),
            ResolvedValue::Text(s) => parse_number(s),
            ResolvedValue::Empty | ResolvedValue::Error(_) => None,
        }
    }

    /// Numeric view with everything non-numeric coerced to zero
    pub fn to_number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Empty => Ok(()),
            ResolvedValue::Number(n) => {
                // Whole numbers print without a fractional part
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            ResolvedValue::Text(s) => write!(f, "{}", s),
            ResolvedValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for ResolvedValue {
    fn from(n: f64) -> Self {
        ResolvedValue::Number(n)
    }
}

impl From<&str> for ResolvedValue {
    fn from(s: &str) -> Self {
        ResolvedValue::Text(s.to_string())
    }
}

impl From<String> for ResolvedValue {
    fn from(s: String) -> Self {
        ResolvedValue::Text(s)
    }
}

impl From<CellError> for ResolvedValue {
    fn from(e: CellError) -> Self {
        ResolvedValue::Error(e)
    }
}

/// Cell error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    /// The formula could not be parsed or evaluated
    Formula,
    /// The formula takes part in, or depends on, a reference cycle
    CircularReference,
}

impl CellError {
    /// Get the error string as displayed in a cell
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Formula => "#ERROR!",
            CellError::CircularReference => "#CIRCULAR!",
        }
    }

    /// Parse an error from its displayed string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "#ERROR!" => Some(CellError::Formula),
            "#CIRCULAR!" => Some(CellError::CircularReference),
            _ => None,
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse text that looks like a plain decimal number
///
/// Accepts optional sign, digits, a decimal point and an exponent, with
/// surrounding whitespace. Words such as `inf` or `NaN` that `f64::from_str`
/// would accept are rejected, as are non-finite results.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'))
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
