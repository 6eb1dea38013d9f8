//! Tokenizer for sanitized arithmetic expressions.
//!
//! Input is expected to have gone through [`super::sanitize`], so the only
//! operators left are ASCII: `+ - * / % ^ ( )`.

/// A single lexical token.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    /// A number-shaped run of characters that is not a valid number (e.g. `1.2.3`).
    Malformed(String),
    Illegal(char),
    Eof,
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Advances the lexer and returns the next token.
    pub fn next_token(&mut self) -> Token {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }

        match self.bump() {
            Some('+') => Token::Plus,
            Some('-') => Token::Minus,
            Some('*') => Token::Asterisk,
            Some('/') => Token::Slash,
            Some('%') => Token::Percent,
            Some('^') => Token::Caret,
            Some('(') => Token::LParen,
            Some(')') => Token::RParen,
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.read_number(ch),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.read_ident(ch),
            Some(ch) => Token::Illegal(ch),
            None => Token::Eof,
        }
    }

    fn read_number(&mut self, first: char) -> Token {
        let mut text = String::from(first);
        while let Some(ch) = self.peek() {
            if !(ch.is_ascii_digit() || ch == '.') {
                break;
            }
            text.push(ch);
            self.pos += 1;
        }

        // Exponent: only when an actual digit follows, so `2e` stays malformed.
        if matches!(self.peek(), Some('e' | 'E')) {
            let digit_at = match self.peek_at(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    text.extend(self.bump());
                }
                while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
                    text.push(ch);
                    self.pos += 1;
                }
            }
        }

        match text.parse::<f64>() {
            Ok(value) => Token::Number(value),
            Err(_) => Token::Malformed(text),
        }
    }

    fn read_ident(&mut self, first: char) -> Token {
        let mut name = String::from(first);
        while let Some(ch) = self.peek() {
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                break;
            }
            name.push(ch);
            self.pos += 1;
        }
        Token::Ident(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            if token == Token::Eof {
                break;
            }
            out.push(token);
        }
        out
    }

    #[test]
    fn test_operators_and_numbers() {
        assert_eq!(
            tokens("2 * (3.5 - .5) % 4 ^ 2"),
            vec![
                Token::Number(2.0),
                Token::Asterisk,
                Token::LParen,
                Token::Number(3.5),
                Token::Minus,
                Token::Number(0.5),
                Token::RParen,
                Token::Percent,
                Token::Number(4.0),
                Token::Caret,
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_trailing_dot_is_a_number() {
        assert_eq!(tokens("0."), vec![Token::Number(0.0)]);
    }

    #[test]
    fn test_malformed_number() {
        assert_eq!(tokens("1.2.3"), vec![Token::Malformed("1.2.3".into())]);
        assert_eq!(tokens("."), vec![Token::Malformed(".".into())]);
    }

    #[test]
    fn test_exponent() {
        assert_eq!(tokens("1e5"), vec![Token::Number(100000.0)]);
        assert_eq!(tokens("2.5e-3"), vec![Token::Number(0.0025)]);
        assert_eq!(
            tokens("2e"),
            vec![Token::Number(2.0), Token::Ident("e".into())]
        );
    }

    #[test]
    fn test_identifiers_and_illegal() {
        assert_eq!(
            tokens("log10(x)#"),
            vec![
                Token::Ident("log10".into()),
                Token::LParen,
                Token::Ident("x".into()),
                Token::RParen,
                Token::Illegal('#'),
            ]
        );
    }
}
