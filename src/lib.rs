//! # calc
//!
//! An infix arithmetic expression evaluator: numbers, `+ - * /` and
//! parentheses, with the usual precedence and left-to-right grouping.
//! The whole crate is a shell around one function:
//!
//! ```
//! assert_eq!(calc::evaluate("2+2*2"), Ok(6.0));
//! assert_eq!(calc::evaluate("2*(2+2)"), Ok(8.0));
//! assert_eq!(calc::evaluate("10/0"), Err(calc::CalcError::DivisionByZero));
//! ```
//!
//! Unary signs are not supported; `-1+2` is rejected as an invalid
//! expression. The [`app`] module carries the two thin I/O fronts over
//! [`evaluate`]: a console loop and an HTTP endpoint.

pub mod app;
pub mod error;
pub mod eval;
pub mod lex;

pub use error::CalcError;
pub use lex::{Lexer, Op, Token, TokenKind};

/// Tokenizes and evaluates `expression`. Pure and stateless; every call is
/// independent and fails fast on the first error.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let tokens = Lexer::new(expression).collect::<Result<Vec<_>, _>>()?;
    eval::evaluate_tokens(&tokens)
}
