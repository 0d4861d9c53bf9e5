//! Tokenizer and shunting-yard evaluator for arithmetic expressions
//!
//! Only `+ - * /`, parentheses and decimal literals are understood. Anything
//! the token pattern does not match (whitespace included) is skipped.

use gridcalc_core::CellAddress;
use lazy_regex::regex;

use crate::ast::{Operator, Token};
use crate::error::{FormulaError, FormulaResult};

/// Tokenize a plain arithmetic expression (no cell references)
pub fn tokenize(expression: &str) -> Vec<Token> {
    regex!(r"\d+\.?\d*|[-+*/()]")
        .find_iter(expression)
        .filter_map(|m| symbol_token(m.as_str()).or_else(|| number_token(m.as_str())))
        .collect()
}

/// Tokenize a formula body, recognizing `[A-Z]\d+` cell references as
/// operands
pub fn tokenize_formula(body: &str) -> FormulaResult<Vec<Token>> {
    regex!(r"[A-Z]\d+|\d+\.?\d*|[-+*/()]")
        .find_iter(body)
        .map(|m| {
            let text = m.as_str();
            if text.starts_with(|c: char| c.is_ascii_uppercase()) {
                return Ok(Token::CellRef(CellAddress::parse(text)?));
            }
            symbol_token(text)
                .or_else(|| number_token(text))
                .ok_or_else(|| FormulaError::Parse(format!("invalid number '{}'", text)))
        })
        .collect()
}

fn symbol_token(text: &str) -> Option<Token> {
    let token = match text {
        "+" => Token::Operator(Operator::Add),
        "-" => Token::Operator(Operator::Subtract),
        "*" => Token::Operator(Operator::Multiply),
        "/" => Token::Operator(Operator::Divide),
        "(" => Token::LeftParen,
        ")" => Token::RightParen,
        _ => return None,
    };
    Some(token)
}

fn number_token(text: &str) -> Option<Token> {
    text.parse::<f64>().ok().map(Token::Number)
}

/// Evaluate a plain arithmetic expression
///
/// ```
/// use gridcalc_formula::evaluate_arithmetic;
///
/// assert_eq!(evaluate_arithmetic("2 + 3 * 4").unwrap(), 14.0);
/// assert_eq!(evaluate_arithmetic("(2 + 3) * 4").unwrap(), 20.0);
/// assert!(evaluate_arithmetic("2 +").is_err());
/// ```
pub fn evaluate_arithmetic(expression: &str) -> FormulaResult<f64> {
    evaluate_tokens(&tokenize(expression), |_| 0.0)
}

enum Pending {
    Op(Operator),
    Paren,
}

/// Evaluate a token stream, reading cell references through `cell_number`
pub fn evaluate_tokens<F>(tokens: &[Token], mut cell_number: F) -> FormulaResult<f64>
where
    F: FnMut(CellAddress) -> f64,
{
    let mut operands: Vec<f64> = Vec::new();
    let mut operators: Vec<Pending> = Vec::new();

    for token in tokens {
        match *token {
            Token::Number(n) => operands.push(n),
            Token::CellRef(addr) => operands.push(cell_number(addr)),
            Token::LeftParen => operators.push(Pending::Paren),
            Token::RightParen => loop {
                match operators.pop() {
                    Some(Pending::Op(op)) => apply(&mut operands, op)?,
                    Some(Pending::Paren) => break,
                    None => return Err(FormulaError::Parse("unmatched ')'".into())),
                }
            },
            Token::Operator(op) => {
                while let Some(&Pending::Op(top)) = operators.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    operators.pop();
                    apply(&mut operands, top)?;
                }
                operators.push(Pending::Op(op));
            }
        }
    }

    while let Some(pending) = operators.pop() {
        match pending {
            Pending::Op(op) => apply(&mut operands, op)?,
            Pending::Paren => return Err(FormulaError::Parse("unmatched '('".into())),
        }
    }

    let result = match operands.as_slice() {
        [value] => *value,
        [] => return Err(FormulaError::Parse("empty expression".into())),
        _ => return Err(FormulaError::Parse("missing operator".into())),
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(FormulaError::Evaluation("result is not a finite number".into()))
    }
}

fn apply(operands: &mut Vec<f64>, op: Operator) -> FormulaResult<()> {
    let (Some(right), Some(left)) = (operands.pop(), operands.pop()) else {
        return Err(FormulaError::Parse(format!(
            "missing operand for '{}'",
            op.symbol()
        )));
    };

    let value = match op {
        Operator::Add => left + right,
        Operator::Subtract => left - right,
        Operator::Multiply => left * right,
        Operator::Divide => {
            if right == 0.0 {
                return Err(FormulaError::Evaluation("division by zero".into()));
            }
            left / right
        }
    };
    operands.push(value);
    Ok(())
}
