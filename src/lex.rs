use std::fmt::Display;

use miette::SourceSpan;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'de> {
    pub kind: TokenKind,
    pub literal: &'de str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Op(Op),
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// Add/Sub bind looser than Mul/Div; equal ranks resolve left to right.
    pub fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.literal;
        match self.kind {
            TokenKind::LeftParen => write!(f, "LEFT_PAREN {lit}"),
            TokenKind::RightParen => write!(f, "RIGHT_PAREN {lit}"),
            TokenKind::Op(Op::Add) => write!(f, "PLUS {lit}"),
            TokenKind::Op(Op::Sub) => write!(f, "MINUS {lit}"),
            TokenKind::Op(Op::Mul) => write!(f, "STAR {lit}"),
            TokenKind::Op(Op::Div) => write!(f, "SLASH {lit}"),
            TokenKind::Number(n) => write!(f, "NUMBER {lit} {n}"),
        }
    }
}

pub struct Lexer<'de> {
    rest: &'de str,
    byte: usize,
}

impl<'de> Lexer<'de> {
    pub fn new(input: &'de str) -> Self {
        Lexer {
            rest: input,
            byte: 0,
        }
    }
}

impl<'de> Iterator for Lexer<'de> {
    type Item = Result<Token<'de>, CalcError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.rest.chars();
            let c = chars.next()?;
            let literal = &self.rest[..c.len_utf8()];
            let cur = self.rest;
            self.rest = chars.as_str();
            self.byte += c.len_utf8();

            let process = |kind: TokenKind| Some(Ok(Token { kind, literal }));

            match c {
                '(' => return process(TokenKind::LeftParen),
                ')' => return process(TokenKind::RightParen),
                '+' => return process(TokenKind::Op(Op::Add)),
                '-' => return process(TokenKind::Op(Op::Sub)),
                '*' => return process(TokenKind::Op(Op::Mul)),
                '/' => return process(TokenKind::Op(Op::Div)),
                '0'..='9' => {
                    let first_non_digit = cur
                        .find(|c| !matches!(c, '0'..='9' | '.'))
                        .unwrap_or(cur.len());

                    let literal = &cur[..first_non_digit];

                    let extra_bytes = literal.len() - c.len_utf8();
                    self.byte += extra_bytes;
                    self.rest = &self.rest[extra_bytes..];

                    // `1.2.3` is rejected outright, never truncated to `1.2`.
                    if literal.bytes().filter(|&b| b == b'.').count() > 1 {
                        return Some(Err(CalcError::InvalidExpression));
                    }

                    let n = match literal.parse() {
                        Ok(n) => n,
                        Err(_) => return Some(Err(CalcError::InvalidExpression)),
                    };

                    return Some(Ok(Token {
                        kind: TokenKind::Number(n),
                        literal,
                    }));
                }
                ' ' | '\r' | '\t' | '\n' => continue, // Skip whitespace
                c => {
                    return Some(Err(CalcError::InvalidCharacter {
                        token: c,
                        span: SourceSpan::from(self.byte - c.len_utf8()..self.byte),
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Result<Vec<TokenKind>, CalcError> {
        Lexer::new(input)
            .map(|token| token.map(|t| t.kind))
            .collect()
    }

    #[test]
    fn tokenizes_in_input_order() {
        let tokens = kinds("1+2*(3-4)/5").unwrap();
        assert_eq!(
            tokens,
            vec![
                TokenKind::Number(1.0),
                TokenKind::Op(Op::Add),
                TokenKind::Number(2.0),
                TokenKind::Op(Op::Mul),
                TokenKind::LeftParen,
                TokenKind::Number(3.0),
                TokenKind::Op(Op::Sub),
                TokenKind::Number(4.0),
                TokenKind::RightParen,
                TokenKind::Op(Op::Div),
                TokenKind::Number(5.0),
            ]
        );
    }

    #[test]
    fn skips_whitespace() {
        assert_eq!(
            kinds(" 1 +\t2\r\n").unwrap(),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Op(Op::Add),
                TokenKind::Number(2.0),
            ]
        );
    }

    #[test]
    fn groups_decimal_digits_into_one_number() {
        assert_eq!(kinds("12.5").unwrap(), vec![TokenKind::Number(12.5)]);
    }

    #[test]
    fn rejects_letters() {
        let err = kinds("2a+2").unwrap_err();
        assert!(matches!(err, CalcError::InvalidCharacter { token: 'a', .. }));
    }

    #[test]
    fn rejects_lone_dot() {
        let err = kinds(".5").unwrap_err();
        assert!(matches!(err, CalcError::InvalidCharacter { token: '.', .. }));
    }

    #[test]
    fn rejects_double_decimal_point() {
        assert_eq!(kinds("1.2.3").unwrap_err(), CalcError::InvalidExpression);
    }

    #[test]
    fn invalid_character_span_points_at_offender() {
        let err = Lexer::new("12 & 3").find_map(Result::err).unwrap();
        let CalcError::InvalidCharacter { token, span } = err else {
            panic!("expected InvalidCharacter, got {err:?}");
        };
        assert_eq!(token, '&');
        assert_eq!(span.offset(), 3);
    }

    #[test]
    fn token_display_carries_literal() {
        let token = Lexer::new("3.5").next().unwrap().unwrap();
        assert_eq!(token.to_string(), "NUMBER 3.5 3.5");
    }
}
