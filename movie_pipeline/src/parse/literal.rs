//! Decoder for string-serialized literal data.
//!
//! Raw catalog columns such as `genres` or `crew` hold text like
//! `[{'id': 18, 'name': 'Drama'}]`: object literals written with single
//! quotes, `True`/`False`/`None` and tuples, so they are not JSON. This module
//! accepts exactly the literal subset of that notation (numbers, strings,
//! booleans, null, lists, tuples and mappings) and rejects everything else.
//! Nothing is ever evaluated; a bare name that is not one of the three
//! keywords is an error.
//!
//! Decoded values are plain [`serde_json::Value`]s.

use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::trace;

const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("invalid number {text:?}")]
    InvalidNumber { text: String },

    #[error("{name:?} is not a literal")]
    NotALiteral { name: String },

    #[error("mapping key at offset {offset} is not a scalar")]
    InvalidKey { offset: usize },

    #[error("nesting too deep")]
    TooDeep,

    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}

/// Parses one complete literal. Surrounding whitespace is allowed, anything
/// else after the value is an error.
pub fn parse_literal(text: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser {
        src: text,
        bytes: text.as_bytes(),
        pos: 0,
    };
    let value = parser.value(0)?;
    parser.skip_ws();
    if parser.pos < parser.bytes.len() {
        return Err(LiteralError::TrailingInput { offset: parser.pos });
    }
    Ok(value)
}

/// A structured cell after decoding.
///
/// `Empty` covers absent cells, `None`, and anything that failed to decode.
/// Callers never see the parse error itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StructuredField {
    #[default]
    Empty,
    Value(Value),
}

impl StructuredField {
    /// Decodes a raw text cell.
    pub fn from_cell(cell: Option<&str>) -> Self {
        match cell {
            Some(text) => Self::decode(text),
            None => Self::Empty,
        }
    }

    /// Accepts a value that may already be structured. Strings are decoded
    /// once; lists and mappings pass through unchanged.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::String(text) => Self::decode(&text),
            other => Self::Value(other),
        }
    }

    fn decode(text: &str) -> Self {
        match parse_literal(text) {
            Ok(Value::Null) => Self::Empty,
            Ok(value) => Self::Value(value),
            Err(err) => {
                trace!(%err, "structured cell did not decode");
                Self::Empty
            }
        }
    }

    /// The list items, or an empty slice when the cell is not a list.
    pub fn entries(&self) -> &[Value] {
        match self {
            Self::Value(Value::Array(items)) => items,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn unexpected(&self) -> LiteralError {
        match self.src.get(self.pos..).and_then(|rest| rest.chars().next()) {
            Some(found) => LiteralError::UnexpectedChar {
                found,
                offset: self.pos,
            },
            None => LiteralError::UnexpectedEnd,
        }
    }

    fn value(&mut self, depth: usize) -> Result<Value, LiteralError> {
        if depth > MAX_DEPTH {
            return Err(LiteralError::TooDeep);
        }
        self.skip_ws();
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd),
            Some(b'[') => {
                self.pos += 1;
                self.sequence(b']', depth).map(Value::Array)
            }
            Some(b'(') => {
                self.pos += 1;
                self.sequence(b')', depth).map(Value::Array)
            }
            Some(b'{') => {
                self.pos += 1;
                self.mapping(depth)
            }
            Some(b'\'' | b'"') => self.string().map(Value::String),
            Some(b'u' | b'U') if matches!(self.bytes.get(self.pos + 1), Some(b'\'' | b'"')) => {
                self.pos += 1;
                self.string().map(Value::String)
            }
            Some(b'-' | b'+' | b'.' | b'0'..=b'9') => self.number(),
            Some(c) if c.is_ascii_alphabetic() || c == b'_' => self.keyword(),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn sequence(&mut self, close: u8, depth: usize) -> Result<Vec<Value>, LiteralError> {
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(items);
            }
            items.push(self.value(depth + 1)?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok(items);
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn mapping(&mut self, depth: usize) -> Result<Value, LiteralError> {
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(Value::Object(map));
            }

            let key_offset = self.pos;
            let key = match self.value(depth + 1)? {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(true) => "True".to_string(),
                Value::Bool(false) => "False".to_string(),
                Value::Null => "None".to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(LiteralError::InvalidKey { offset: key_offset });
                }
            };

            self.skip_ws();
            if self.peek() != Some(b':') {
                return Err(self.unexpected());
            }
            self.pos += 1;

            let value = self.value(depth + 1)?;
            map.insert(key, value);

            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(map));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        let quote = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        let start = self.pos;
        self.pos += 1;

        let mut out: Vec<u8> = Vec::new();
        loop {
            match self.peek() {
                None => return Err(LiteralError::UnexpectedEnd),
                Some(b) if b == quote => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    let escape_at = self.pos;
                    self.pos += 1;
                    self.escape(escape_at, &mut out)?;
                }
                Some(b'\n') => return Err(self.unexpected()),
                Some(b) => {
                    out.push(b);
                    self.pos += 1;
                }
            }
        }

        String::from_utf8(out).map_err(|_| LiteralError::InvalidEscape { offset: start })
    }

    fn escape(&mut self, escape_at: usize, out: &mut Vec<u8>) -> Result<(), LiteralError> {
        let c = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        self.pos += 1;
        let decoded = match c {
            b'\\' => '\\',
            b'\'' => '\'',
            b'"' => '"',
            b'n' => '\n',
            b't' => '\t',
            b'r' => '\r',
            b'0' => '\0',
            b'a' => '\u{07}',
            b'b' => '\u{08}',
            b'f' => '\u{0c}',
            b'v' => '\u{0b}',
            // line continuation
            b'\n' => return Ok(()),
            b'x' => self.hex_escape(2, escape_at)?,
            b'u' => self.hex_escape(4, escape_at)?,
            b'U' => self.hex_escape(8, escape_at)?,
            // unknown escapes keep the backslash
            other => {
                out.push(b'\\');
                out.push(other);
                return Ok(());
            }
        };
        let mut buf = [0u8; 4];
        out.extend_from_slice(decoded.encode_utf8(&mut buf).as_bytes());
        Ok(())
    }

    fn hex_escape(&mut self, digits: usize, escape_at: usize) -> Result<char, LiteralError> {
        let invalid = LiteralError::InvalidEscape { offset: escape_at };
        let end = self.pos + digits;
        let hex = self.src.get(self.pos..end).ok_or(invalid.clone())?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid);
        }
        let code = u32::from_str_radix(hex, 16).map_err(|_| invalid.clone())?;
        self.pos = end;
        char::from_u32(code).ok_or(invalid)
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        let digits_start = self.pos;
        let mut is_float = false;
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => {}
                b'.' => is_float = true,
                b'e' | b'E' => {
                    is_float = true;
                    if matches!(self.bytes.get(self.pos + 1), Some(b'-' | b'+')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
            self.pos += 1;
        }

        let text = &self.src[start..self.pos];
        let invalid = || LiteralError::InvalidNumber {
            text: text.to_string(),
        };
        if self.pos == digits_start {
            return Err(invalid());
        }

        if !is_float {
            if let Ok(v) = text.parse::<i64>() {
                return Ok(Value::Number(v.into()));
            }
        }
        // floats, and integers too large for i64
        let v: f64 = text.parse().map_err(|_| invalid())?;
        Number::from_f64(v).map(Value::Number).ok_or_else(invalid)
    }

    fn keyword(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        match &self.src[start..self.pos] {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            other => Err(LiteralError::NotALiteral {
                name: other.to_string(),
            }),
        }
    }
}
