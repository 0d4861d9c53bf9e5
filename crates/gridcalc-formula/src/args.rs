//! Argument list splitting and classification

use gridcalc_core::{parse_number, CellAddress, CellRange};
use lazy_regex::regex_is_match;

use crate::ast::Argument;
use crate::error::{FormulaError, FormulaResult};

/// Split the text between a function's parentheses on top-level commas
///
/// Commas inside double quotes or nested parentheses do not split. Pieces
/// are trimmed; a blank list yields no pieces.
pub fn split_args(text: &str) -> FormulaResult<Vec<&str>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| FormulaError::Parse("unmatched ')' in arguments".into()))?;
            }
            ',' if !in_quotes && depth == 0 => {
                pieces.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if in_quotes {
        return Err(FormulaError::Parse("unterminated string in arguments".into()));
    }
    if depth > 0 {
        return Err(FormulaError::Parse("unmatched '(' in arguments".into()));
    }

    pieces.push(text[start..].trim());
    Ok(pieces)
}

/// Classify one trimmed argument
///
/// Priority: range, cell reference, quoted string, criterion, number.
pub fn classify_arg(piece: &str) -> FormulaResult<Argument> {
    if piece.contains(':') {
        return Ok(Argument::Range(CellRange::parse(piece)?));
    }
    if regex_is_match!(r"^[A-Z]\d+$", piece) {
        return Ok(Argument::CellRef(CellAddress::parse(piece)?));
    }
    if piece.len() >= 2 && piece.starts_with('"') && piece.ends_with('"') {
        return Ok(Argument::Text(piece[1..piece.len() - 1].to_string()));
    }
    if piece.starts_with(['>', '<', '=']) {
        return Ok(Argument::Criterion(piece.to_string()));
    }
    Ok(Argument::Number(parse_number(piece).unwrap_or(f64::NAN)))
}

/// Split and classify a function's argument list
///
/// ```
/// use gridcalc_formula::{classify_args, Argument};
///
/// let args = classify_args(r#"A1:A3, ">10", B1:B3"#).unwrap();
/// assert!(matches!(args[0], Argument::Range(_)));
/// assert_eq!(args[1], Argument::Text(">10".into()));
/// ```
pub fn classify_args(text: &str) -> FormulaResult<Vec<Argument>> {
    split_args(text)?.into_iter().map(classify_arg).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    #[test]
    fn test_split() {
        assert_eq!(split_args("A1, B2 ,3").unwrap(), vec!["A1", "B2", "3"]);
        assert_eq!(split_args("").unwrap(), Vec::<&str>::new());
        assert_eq!(split_args("  ").unwrap(), Vec::<&str>::new());
        assert_eq!(split_args("A1,").unwrap(), vec!["A1", ""]);
    }

    #[test]
    fn test_split_respects_quotes_and_parentheses() {
        assert_eq!(
            split_args(r#"A1:A3, "a,b", (1,2)"#).unwrap(),
            vec!["A1:A3", r#""a,b""#, "(1,2)"]
        );
    }

    #[test]
    fn test_split_unbalanced() {
        assert!(split_args("(1, 2").is_err());
        assert!(split_args("1), 2").is_err());
        assert!(split_args(r#""abc, 2"#).is_err());
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(
            classify_arg("A1:B3").unwrap(),
            Argument::Range(CellRange::new(addr("A1"), addr("B3")))
        );
        assert_eq!(classify_arg("B4").unwrap(), Argument::CellRef(addr("B4")));
        assert_eq!(
            classify_arg(r#""Red""#).unwrap(),
            Argument::Text("Red".into())
        );
        assert_eq!(
            classify_arg(r#"">10""#).unwrap(),
            Argument::Text(">10".into())
        );
        assert_eq!(
            classify_arg(">=5").unwrap(),
            Argument::Criterion(">=5".into())
        );
        assert_eq!(classify_arg("2.5").unwrap(), Argument::Number(2.5));
    }

    #[test]
    fn test_classify_non_numeric_is_nan() {
        match classify_arg("hello").unwrap() {
            Argument::Number(n) => assert!(n.is_nan()),
            other => panic!("expected number, got {:?}", other),
        }
        match classify_arg(r#"""#).unwrap() {
            Argument::Number(n) => assert!(n.is_nan()),
            other => panic!("expected number, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_bad_range() {
        assert!(classify_arg("A1:").is_err());
        assert!(classify_args("A1:B2, Z:9").is_err());
    }

    #[test]
    fn test_classify_row_zero_reference() {
        assert!(classify_arg("A0").is_err());
    }
}
