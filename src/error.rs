use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Everything that can go wrong while evaluating an expression.
///
/// All four kinds are user-input errors: the caller reports them and keeps
/// running. Shells attach the expression text with
/// [`miette::Report::with_source_code`] to get the labeled rendering.
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum CalcError {
    #[error("invalid character '{token}'")]
    #[diagnostic(help("only digits, '.', '+', '-', '*', '/', '(' and ')' are allowed"))]
    InvalidCharacter {
        token: char,

        #[label("this character")]
        span: SourceSpan,
    },

    #[error("invalid expression")]
    #[diagnostic(help("expected operators between two operands, e.g. `2+2`"))]
    InvalidExpression,

    #[error("mismatched parentheses")]
    #[diagnostic(help("every '(' needs a matching ')'"))]
    MismatchedParentheses,

    #[error("division by zero")]
    DivisionByZero,
}
