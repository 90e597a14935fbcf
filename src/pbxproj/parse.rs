use super::{Dict, Value};
use std::collections::HashMap;
use std::str::Chars;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

pub(super) fn parse(input: &str) -> Result<(Value, HashMap<String, String>), ParseError> {
    let mut parser = Parser {
        chars: input.chars(),
        line: 1,
        column: 1,
        annotations: HashMap::new(),
    };
    parser.skip_trivia()?;
    let root = parser.value()?;
    parser.skip_trivia()?;
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("unexpected '{c}' after the root value")));
    }
    Ok((root, parser.annotations))
}

/// Characters accepted in an unquoted string on input.
fn is_unquoted(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '+' | '/' | ':' | '.' | '-')
}

struct Parser<'a> {
    chars: Chars<'a>,
    line: usize,
    column: usize,
    annotations: HashMap<String, String>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn at_comment(&self) -> bool {
        self.peek() == Some('/') && matches!(self.peek_second(), Some('/' | '*'))
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.at_comment() => {
                    self.comment()?;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Consumes one comment and returns its trimmed text.
    fn comment(&mut self) -> Result<String, ParseError> {
        self.bump();
        let mut text = String::new();
        match self.bump() {
            Some('/') => {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    text.push(c);
                    self.bump();
                }
            }
            _ => loop {
                match self.bump() {
                    Some('*') if self.peek() == Some('/') => {
                        self.bump();
                        break;
                    }
                    Some(c) => text.push(c),
                    None => return Err(self.error("unterminated comment")),
                }
            },
        }
        Ok(text.trim().to_string())
    }

    /// Records a block comment that directly follows `token` on the same line.
    fn annotation_for(&mut self, token: &str) -> Result<(), ParseError> {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.bump();
        }
        if self.peek() == Some('/') && self.peek_second() == Some('*') {
            let text = self.comment()?;
            self.annotations.entry(token.to_string()).or_insert(text);
        }
        Ok(())
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            Some('{') => self.dict().map(Value::Dict),
            Some('(') => self.array().map(Value::Array),
            Some('<') => self.data().map(Value::Data),
            Some(c) if c == '"' || c == '\'' || is_unquoted(c) => self.string().map(Value::String),
            Some(c) => Err(self.error(format!("unexpected '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn dict(&mut self) -> Result<Dict, ParseError> {
        self.expect('{')?;
        let mut dict = Dict::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.bump();
                return Ok(dict);
            }
            let key = match self.peek() {
                Some(c) if c == '"' || c == '\'' || is_unquoted(c) => self.string()?,
                Some(c) => return Err(self.error(format!("expected a key, found '{c}'"))),
                None => return Err(self.error("unterminated dictionary")),
            };
            self.skip_trivia()?;
            self.expect('=')?;
            self.skip_trivia()?;
            let value = self.value()?;
            self.skip_trivia()?;
            self.expect(';')?;
            if dict.insert(key.clone(), value).is_some() {
                return Err(self.error(format!("duplicate key '{key}'")));
            }
        }
    }

    fn array(&mut self) -> Result<Vec<Value>, ParseError> {
        self.expect('(')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(')') {
                self.bump();
                return Ok(items);
            }
            items.push(self.value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(')') => {}
                Some(c) => return Err(self.error(format!("expected ',' or ')', found '{c}'"))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn data(&mut self) -> Result<Vec<u8>, ParseError> {
        self.expect('<')?;
        let mut nibbles = Vec::new();
        loop {
            match self.bump() {
                Some('>') => break,
                Some(c) if c.is_whitespace() => {}
                Some(c) => match c.to_digit(16) {
                    Some(n) => nibbles.push(n as u8),
                    None => return Err(self.error(format!("invalid hex digit '{c}' in data"))),
                },
                None => return Err(self.error("unterminated data")),
            }
        }
        if nibbles.len() % 2 != 0 {
            return Err(self.error("odd number of hex digits in data"));
        }
        Ok(nibbles.chunks(2).map(|pair| pair[0] << 4 | pair[1]).collect())
    }

    fn string(&mut self) -> Result<String, ParseError> {
        let text = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.bump();
                self.quoted(q)?
            }
            _ => {
                let mut text = String::new();
                while let Some(c) = self.peek().filter(|&c| is_unquoted(c)) {
                    if self.at_comment() {
                        break;
                    }
                    text.push(c);
                    self.bump();
                }
                text
            }
        };
        self.annotation_for(&text)?;
        Ok(text)
    }

    fn quoted(&mut self, quote: char) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(text),
                Some('\\') => text.push(self.escape()?),
                Some(c) => text.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn escape(&mut self) -> Result<char, ParseError> {
        let c = self.bump().ok_or_else(|| self.error("unterminated escape"))?;
        let decoded = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'a' => '\u{7}',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            'U' | 'u' => {
                let code = self.radix_digits(16, 4, 0);
                char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape"))?
            }
            '0'..='7' => {
                let code = self.radix_digits(8, 2, c.to_digit(8).unwrap_or_default());
                char::from_u32(code).ok_or_else(|| self.error("invalid octal escape"))?
            }
            other => other,
        };
        Ok(decoded)
    }

    /// Folds up to `max` more digits in `radix` into `code`.
    fn radix_digits(&mut self, radix: u32, max: usize, mut code: u32) -> u32 {
        for _ in 0..max {
            match self.peek().and_then(|c| c.to_digit(radix)) {
                Some(d) => {
                    code = code * radix + d;
                    self.bump();
                }
                None => break,
            }
        }
        code
    }
}
