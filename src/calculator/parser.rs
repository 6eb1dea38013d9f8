//! Recursive descent evaluator for sanitized expressions.
//!
//! Values are computed while parsing; no syntax tree is built.
//!
//! GRAMMAR:
//!   expression     --> additive
//!   additive       --> multiplicative ( ("+" | "-") multiplicative )*
//!   multiplicative --> unary ( ("*" | "/" | "%") unary )*
//!   unary          --> ("-" | "+") unary | power
//!   power          --> primary ( "^" unary )?
//!   primary        --> NUMBER | IDENT "(" expression ")" | "(" expression ")"
//!
//! Named functions work in radians: `sin cos tan log10 ln sqrt abs`.

use super::error::{CalcError, CalcResult};
use super::lexer::{Lexer, Token};

/// Deepest nesting of parentheses, function calls, signs and exponents.
const MAX_DEPTH: usize = 128;

/// Parse and evaluate `input`, returning the raw value.
///
/// The value may be infinite or NaN; finiteness is checked by the caller.
pub fn eval_str(input: &str) -> CalcResult<f64> {
    Parser::new(input).parse()
}

struct Parser {
    lexer: Lexer,
    current_token: Token,
    depth: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token();
        Self {
            lexer,
            current_token,
            depth: 0,
        }
    }

    fn parse(&mut self) -> CalcResult<f64> {
        if self.current_token == Token::Eof {
            return Err(CalcError::evaluation("empty expression"));
        }

        let value = self.parse_additive()?;

        if self.current_token != Token::Eof {
            return Err(CalcError::evaluation(format!(
                "unexpected token after expression: {:?}",
                self.current_token
            )));
        }

        Ok(value)
    }

    fn advance(&mut self) {
        self.current_token = self.lexer.next_token();
    }

    fn expect(&mut self, expected: Token) -> CalcResult<()> {
        if self.current_token == expected {
            self.advance();
            Ok(())
        } else {
            Err(CalcError::evaluation(format!(
                "expected {:?}, found {:?}",
                expected, self.current_token
            )))
        }
    }

    /// Run `parse` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> CalcResult<f64>) -> CalcResult<f64> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::evaluation("expression nested too deeply"));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_additive(&mut self) -> CalcResult<f64> {
        let mut left = self.parse_multiplicative()?;

        loop {
            match self.current_token {
                Token::Plus => {
                    self.advance();
                    left += self.parse_multiplicative()?;
                }
                Token::Minus => {
                    self.advance();
                    left -= self.parse_multiplicative()?;
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> CalcResult<f64> {
        let mut left = self.parse_unary()?;

        loop {
            match self.current_token {
                Token::Asterisk => {
                    self.advance();
                    left *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.advance();
                    left /= self.parse_unary()?;
                }
                Token::Percent => {
                    self.advance();
                    left %= self.parse_unary()?;
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<f64> {
        match self.current_token {
            Token::Minus => {
                self.advance();
                Ok(-self.nested(Self::parse_unary)?)
            }
            Token::Plus => {
                self.advance();
                self.nested(Self::parse_unary)
            }
            _ => self.parse_power(),
        }
    }

    /// `^` is right-associative: its exponent goes back through `unary`.
    fn parse_power(&mut self) -> CalcResult<f64> {
        let base = self.parse_primary()?;

        if self.current_token == Token::Caret {
            self.advance();
            let exponent = self.nested(Self::parse_unary)?;
            return Ok(base.powf(exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> CalcResult<f64> {
        match std::mem::replace(&mut self.current_token, Token::Eof) {
            Token::Number(value) => {
                self.advance();
                Ok(value)
            }
            Token::LParen => {
                self.advance();
                let value = self.nested(Self::parse_additive)?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Token::Ident(name) => {
                self.advance();
                let function = lookup_function(&name)?;
                self.expect(Token::LParen)?;
                let arg = self.nested(Self::parse_additive)?;
                self.expect(Token::RParen)?;
                Ok(function(arg))
            }
            Token::Malformed(text) => Err(CalcError::evaluation(format!(
                "malformed number '{}'",
                text
            ))),
            Token::Illegal(ch) => Err(CalcError::evaluation(format!(
                "illegal character '{}'",
                ch
            ))),
            Token::Eof => Err(CalcError::evaluation("unexpected end of expression")),
            other => Err(CalcError::evaluation(format!(
                "unexpected token {:?}",
                other
            ))),
        }
    }
}

fn lookup_function(name: &str) -> CalcResult<fn(f64) -> f64> {
    let function: fn(f64) -> f64 = match name {
        "sin" => f64::sin,
        "cos" => f64::cos,
        "tan" => f64::tan,
        "log10" => f64::log10,
        "ln" => f64::ln,
        "sqrt" => f64::sqrt,
        "abs" => f64::abs,
        _ => return Err(CalcError::UnknownFunction(name.to_string())),
    };
    Ok(function)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::error::FaultKind;

    fn eval(input: &str) -> f64 {
        eval_str(input).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2+3*4"), 14.0);
        assert_eq!(eval("(2+3)*4"), 20.0);
        assert_eq!(eval("10-4-3"), 3.0);
        assert_eq!(eval("100/10/5"), 2.0);
        assert_eq!(eval("7%3+1"), 2.0);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(eval("-5+2"), -3.0);
        assert_eq!(eval("3*-2"), -6.0);
        assert_eq!(eval("--4"), 4.0);
        assert_eq!(eval("-(2+3)"), -5.0);
    }

    #[test]
    fn test_power() {
        assert_eq!(eval("2^3^2"), 512.0);
        assert_eq!(eval("-2^2"), -4.0);
        assert_eq!(eval("2^-1"), 0.5);
    }

    #[test]
    fn test_functions_in_radians() {
        assert!(eval("sin(0)").abs() < 1e-12);
        assert!((eval("cos(0)") - 1.0).abs() < 1e-12);
        assert_eq!(eval("log10(1000)"), 3.0);
        assert_eq!(eval("sqrt(16)+abs(-2)"), 6.0);
        assert!((eval("ln(2.718281828459045)") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_values_are_returned() {
        assert!(eval("5/0").is_infinite());
        assert!(eval("5%0").is_nan());
    }

    #[test]
    fn test_syntax_errors() {
        for input in ["", "5+", "(2+3", "2+3)", "2(3)", "*4", "1.2.3", "4#2"] {
            let err = eval_str(input).unwrap_err();
            assert_eq!(err.kind(), FaultKind::Evaluation, "input: {input}");
        }
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let depth = 100_000;
        let input = format!("1+{}2{}", "(".repeat(depth), ")".repeat(depth));
        let err = eval_str(&input).unwrap_err();
        assert_eq!(
            err,
            CalcError::evaluation("expression nested too deeply")
        );

        let signs = format!("{}3", "-".repeat(depth));
        assert_eq!(eval_str(&signs).unwrap_err().kind(), FaultKind::Evaluation);

        let powers = format!("2{}", "^1".repeat(depth));
        assert_eq!(eval_str(&powers).unwrap_err().kind(), FaultKind::Evaluation);
    }

    #[test]
    fn test_moderate_nesting_still_evaluates() {
        let input = format!("{}7{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(eval(&input), 7.0);
        assert_eq!(eval(&format!("{}3", "-".repeat(100))), 3.0);
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            eval_str("asin(1)"),
            Err(CalcError::UnknownFunction("asin".into()))
        );
    }
}
