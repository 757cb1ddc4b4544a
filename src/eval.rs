use crate::{
    error::CalcError,
    lex::{Op, Token, TokenKind},
};

/// An operator stack entry. A left paren sits on the stack as a scope
/// marker that no operator may be popped past.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Op(Op),
    LeftParen,
}

/// Evaluates a token sequence with the two-stack shunting-yard scheme:
/// numbers go on the operand stack, operators wait on the operator stack
/// until something with lower precedence (or a paren boundary) arrives.
pub fn evaluate_tokens(tokens: &[Token<'_>]) -> Result<f64, CalcError> {
    let mut operands: Vec<f64> = Vec::new();
    let mut operators: Vec<Pending> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Number(n) => operands.push(n),
            TokenKind::Op(op) => {
                // >= keeps equal precedence left-associative: 8-2-2 is (8-2)-2.
                while let Some(Pending::Op(top)) = operators.last().copied() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    operators.pop();
                    apply(&mut operands, top)?;
                }
                operators.push(Pending::Op(op));
            }
            TokenKind::LeftParen => operators.push(Pending::LeftParen),
            TokenKind::RightParen => loop {
                match operators.pop() {
                    Some(Pending::Op(op)) => apply(&mut operands, op)?,
                    Some(Pending::LeftParen) => break,
                    None => return Err(CalcError::MismatchedParentheses),
                }
            },
        }
    }

    while let Some(pending) = operators.pop() {
        match pending {
            Pending::Op(op) => apply(&mut operands, op)?,
            Pending::LeftParen => return Err(CalcError::MismatchedParentheses),
        }
    }

    match operands.as_slice() {
        [result] => Ok(*result),
        _ => Err(CalcError::InvalidExpression),
    }
}

/// Pops two operands (right first) and pushes the result back. Fewer than
/// two operands means an operator landed without both of its arguments.
fn apply(operands: &mut Vec<f64>, op: Op) -> Result<(), CalcError> {
    let rhs = operands.pop().ok_or(CalcError::InvalidExpression)?;
    let lhs = operands.pop().ok_or(CalcError::InvalidExpression)?;
    let result = match op {
        Op::Add => lhs + rhs,
        Op::Sub => lhs - rhs,
        Op::Mul => lhs * rhs,
        Op::Div => {
            if rhs == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            lhs / rhs
        }
    };
    operands.push(result);
    Ok(())
}
