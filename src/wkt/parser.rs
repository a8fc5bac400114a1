//!
//! WKT CRS tokenizer
//!
//! Drives a [`Processor`] over the nested `KEYWORD[...]` structure.
//! Both bracket styles (`[]` and `()`) are accepted, quoted strings
//! use the doubled quote escape, whitespace is ignored outside of
//! quotes.
//!
use crate::errors::{Error, Result};

/// An attribute of a WKT node
#[derive(Debug)]
pub enum Attribute<'a, T> {
    /// A `"quoted"` string (quotes stripped, inner doubled quotes kept)
    Quoted(&'a str),
    /// A numeric literal, kept as source text
    Number(&'a str),
    /// A bare identifier (axis directions, `PixelIsPoint`, ...)
    Ident(&'a str),
    /// A nested node, already processed
    Keyword(&'a str, T),
}

/// Processor transforming the syntactic stream into nodes
pub trait Processor<'a> {
    type Err;
    type Output;

    fn process<I>(&self, key: &'a str, depth: usize, attrs: I) -> Result<Self::Output, Self::Err>
    where
        I: Iterator<Item = Attribute<'a, Self::Output>>;
}

/// Parse a WKT string with the given processor
pub fn parse<'a, P>(s: &'a str, processor: &P) -> Result<P::Output>
where
    P: Processor<'a, Err = Error>,
{
    let mut cursor = Cursor { s, pos: 0 };
    cursor.skip_whitespace();
    let key = cursor.ident()?;
    let node = parse_node(&mut cursor, key, 0, processor)?;
    cursor.skip_whitespace();
    if !cursor.at_end() {
        return Err(Error::WktParseError("Trailing characters".into()));
    }
    Ok(node)
}

struct Cursor<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.s.len()
    }

    fn peek(&self) -> Option<char> {
        self.s[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    /// Read an identifier: [A-Za-z][A-Za-z0-9_]*
    fn ident(&mut self) -> Result<&'a str> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        if self.pos == start {
            Err(Error::WktParseError(format!(
                "Expected identifier at offset {start}"
            )))
        } else {
            Ok(&self.s[start..self.pos])
        }
    }

    /// Read a number token up to a separator
    fn number(&mut self) -> Result<&'a str> {
        let start = self.pos;
        while matches!(self.peek(),
            Some(c) if c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        {
            self.bump();
        }
        if self.pos == start {
            Err(Error::WktParseError(format!(
                "Expected number at offset {start}"
            )))
        } else {
            Ok(&self.s[start..self.pos])
        }
    }

    /// Read a quoted string, `""` escapes stay in the slice
    fn quoted(&mut self) -> Result<&'a str> {
        // skip opening quote
        self.bump();
        let start = self.pos;
        loop {
            match self.peek() {
                Some('"') => {
                    // a doubled quote is an escaped quote
                    if self.s[self.pos + 1..].starts_with('"') {
                        self.bump();
                        self.bump();
                    } else {
                        let end = self.pos;
                        self.bump();
                        return Ok(&self.s[start..end]);
                    }
                }
                Some(_) => self.bump(),
                None => {
                    return Err(Error::WktParseError("Unterminated quoted string".into()));
                }
            }
        }
    }
}

fn parse_node<'a, P>(
    cursor: &mut Cursor<'a>,
    key: &'a str,
    depth: usize,
    processor: &P,
) -> Result<P::Output>
where
    P: Processor<'a, Err = Error>,
{
    cursor.skip_whitespace();
    let closing = match cursor.peek() {
        Some('[') => ']',
        Some('(') => ')',
        _ => {
            return Err(Error::WktParseError(format!(
                "Expected '[' after keyword {key}"
            )))
        }
    };
    cursor.bump();

    let mut attrs: Vec<Attribute<'a, P::Output>> = vec![];

    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            Some('"') => attrs.push(Attribute::Quoted(cursor.quoted()?)),
            Some(',') => {
                cursor.bump();
            }
            Some(c) if c == closing => {
                cursor.bump();
                break;
            }
            Some(c) if c.is_ascii_digit() || c == '+' || c == '-' || c == '.' => {
                attrs.push(Attribute::Number(cursor.number()?));
            }
            Some(c) if c.is_alphanumeric() || c == '_' => {
                let ident = cursor.ident()?;
                cursor.skip_whitespace();
                if matches!(cursor.peek(), Some('[') | Some('(')) {
                    let node = parse_node(cursor, ident, depth + 1, processor)?;
                    attrs.push(Attribute::Keyword(ident, node));
                } else {
                    attrs.push(Attribute::Ident(ident));
                }
            }
            Some(c) => {
                return Err(Error::WktParseError(format!(
                    "Unexpected character '{c}' in {key}"
                )));
            }
            None => {
                return Err(Error::WktParseError(format!("Unterminated node {key}")));
            }
        }
    }

    processor.process(key, depth, attrs.into_iter())
}
