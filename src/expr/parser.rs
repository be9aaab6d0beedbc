//! Tokenizer and recursive-descent parser for expression text.
//!
//! Grammar, loosest to tightest binding:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := ('-' | '+') unary | power
//! power  := atom ('^' unary)?        right-associative
//! atom   := number | 'x' | 'pi' | 'e' | name '(' expr ')' | '(' expr ')'
//! ```
//!
//! Unary minus binds looser than `^`, so `-x^2` is `-(x^2)`. Unknown
//! identifiers are rejected here, which is what keeps [`Expr::eval`]
//! infallible.

use super::ast::{Expr, Func};
use crate::error::ParseError;

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(src: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let at = i;
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'+' => {
                tokens.push((Token::Plus, at));
                i += 1;
            }
            b'-' => {
                tokens.push((Token::Minus, at));
                i += 1;
            }
            b'*' => {
                tokens.push((Token::Star, at));
                i += 1;
            }
            b'/' => {
                tokens.push((Token::Slash, at));
                i += 1;
            }
            b'^' => {
                tokens.push((Token::Caret, at));
                i += 1;
            }
            b'(' => {
                tokens.push((Token::LParen, at));
                i += 1;
            }
            b')' => {
                tokens.push((Token::RParen, at));
                i += 1;
            }
            b'0'..=b'9' | b'.' => {
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                // scientific notation, only when a digit actually follows
                if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                    let mut j = i + 1;
                    if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                        j += 1;
                    }
                    if j < bytes.len() && bytes[j].is_ascii_digit() {
                        i = j;
                        while i < bytes.len() && bytes[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let value: f64 = src[at..i]
                    .parse()
                    .map_err(|_| ParseError::MalformedNumber { at })?;
                tokens.push((Token::Num(value), at));
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push((Token::Ident(src[at..i].to_owned()), at));
            }
            _ => {
                let ch = src[at..].chars().next().unwrap_or('\u{fffd}');
                return Err(ParseError::UnexpectedChar { ch, at });
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    node = Expr::Add(node.into(), self.term()?.into());
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    node = Expr::Sub(node.into(), self.term()?.into());
                }
                _ => return Ok(node),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    node = Expr::Mul(node.into(), self.unary()?.into());
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    node = Expr::Div(node.into(), self.unary()?.into());
                }
                _ => return Ok(node),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Neg(self.unary()?.into()))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.atom()?;
        if let Some(Token::Caret) = self.peek() {
            self.pos += 1;
            let exponent = self.unary()?;
            Ok(Expr::Pow(base.into(), exponent.into()))
        } else {
            Ok(base)
        }
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        match self.tokens.get(self.pos).cloned() {
            None => Err(ParseError::UnexpectedEnd),
            Some((Token::Num(value), _)) => {
                self.pos += 1;
                Ok(Expr::Num(value))
            }
            Some((Token::LParen, _)) => {
                self.pos += 1;
                let inner = self.expr()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some((Token::Ident(name), _)) => {
                self.pos += 1;
                if let Some(Token::LParen) = self.peek() {
                    let func =
                        Func::from_name(&name).ok_or(ParseError::UnknownIdent(name))?;
                    self.pos += 1;
                    let arg = self.expr()?;
                    self.expect_rparen()?;
                    Ok(Expr::Call(func, arg.into()))
                } else {
                    match name.as_str() {
                        "x" => Ok(Expr::Var),
                        "pi" => Ok(Expr::Num(std::f64::consts::PI)),
                        "e" => Ok(Expr::Num(std::f64::consts::E)),
                        _ => Err(ParseError::UnknownIdent(name)),
                    }
                }
            }
            Some((_, at)) => Err(ParseError::Expected {
                expected: "a value",
                at,
            }),
        }
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        match self.tokens.get(self.pos) {
            Some((Token::RParen, _)) => {
                self.pos += 1;
                Ok(())
            }
            Some(&(_, at)) => Err(ParseError::Expected {
                expected: "')'",
                at,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

impl Expr {
    /// Parse expression text into a tree.
    ///
    /// ```
    /// use rust_ritz::Expr;
    ///
    /// let f = Expr::parse("sin(x) + 2").unwrap();
    /// assert_eq!(f.eval(0.0), 2.0);
    /// ```
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        let mut parser = Parser {
            tokens: tokenize(src)?,
            pos: 0,
        };
        let expr = parser.expr()?;
        if let Some(&(_, at)) = parser.tokens.get(parser.pos) {
            return Err(ParseError::Trailing { at });
        }
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_precedence() {
        let f = Expr::parse("1 + 2 * x").unwrap();
        assert_eq!(f.eval(3.0), 7.0);

        let g = Expr::parse("(1 + 2) * x").unwrap();
        assert_eq!(g.eval(3.0), 9.0);

        let h = Expr::parse("2 * x^2").unwrap();
        assert_eq!(h.eval(3.0), 18.0);
    }

    #[test]
    fn power_is_right_associative() {
        let f = Expr::parse("2^3^2").unwrap();
        assert_eq!(f.eval(0.0), 512.0);
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        let f = Expr::parse("-x^2").unwrap();
        assert_eq!(f.eval(3.0), -9.0);

        let g = Expr::parse("x^-1").unwrap();
        assert_eq!(g.eval(4.0), 0.25);
    }

    #[test]
    fn parses_functions_and_constants() {
        let f = Expr::parse("sin(pi / 2)").unwrap();
        assert!((f.eval(0.0) - 1.0).abs() < 1e-15);

        let g = Expr::parse("ln(e)").unwrap();
        assert!((g.eval(0.0) - 1.0).abs() < 1e-15);

        let h = Expr::parse("log(e^2)").unwrap();
        assert!((h.eval(0.0) - 2.0).abs() < 1e-14);
    }

    #[test]
    fn parses_number_forms() {
        assert_eq!(Expr::parse("0.5").unwrap().eval(0.0), 0.5);
        assert_eq!(Expr::parse(".25").unwrap().eval(0.0), 0.25);
        assert_eq!(Expr::parse("1e3").unwrap().eval(0.0), 1000.0);
        assert_eq!(Expr::parse("2.5e-2").unwrap().eval(0.0), 0.025);
    }

    #[test]
    fn rejects_unknown_identifiers() {
        assert_eq!(
            Expr::parse("y + 2"),
            Err(ParseError::UnknownIdent("y".into()))
        );
        assert_eq!(
            Expr::parse("sinh(x)"),
            Err(ParseError::UnknownIdent("sinh".into()))
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            Expr::parse("x +"),
            Err(ParseError::UnexpectedEnd)
        ));
        assert!(matches!(
            Expr::parse("(x + 2"),
            Err(ParseError::UnexpectedEnd)
        ));
        assert!(matches!(
            Expr::parse("x + * 2"),
            Err(ParseError::Expected { .. })
        ));
        assert!(matches!(
            Expr::parse("1.2.3"),
            Err(ParseError::MalformedNumber { at: 0 })
        ));
        assert!(matches!(
            Expr::parse("x # 2"),
            Err(ParseError::UnexpectedChar { ch: '#', .. })
        ));
        assert!(matches!(
            Expr::parse("x 2"),
            Err(ParseError::Trailing { .. })
        ));
    }

    #[test]
    fn whitespace_is_insignificant() {
        let a = Expr::parse("x^2+1").unwrap();
        let b = Expr::parse("  x ^ 2  +  1 ").unwrap();
        assert_eq!(a, b);
    }
}
