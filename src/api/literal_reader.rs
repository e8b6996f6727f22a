//! Lenient reader for JavaScript-style object literals.
//!
//! Accepts the JSON grammar plus the relaxations commonly found in charting
//! library examples:
//!
//! ```text
//! value   ::= object | array | string | number | keyword | code
//! object  ::= '{' (key ':' value ','?)* '}'
//! array   ::= '[' (value ','?)* ']'
//! key     ::= string | IDENT | number
//! string  ::= '"' ... '"' | '\'' ... '\''
//! keyword ::= true | false | null | undefined | NaN | Infinity
//! code    ::= SENTINEL <any text> SENTINEL
//! ```

use crate::core::{JS_CODE_SENTINEL, JsCode, OptionMap, OptionValue};
use crate::error::{LiteralError, LiteralResult};

const MAX_DEPTH: usize = 256;

pub(crate) struct LiteralReader<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> LiteralReader<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    /// Reads exactly one value; anything but whitespace after it is an error.
    pub(crate) fn read_document(mut self) -> LiteralResult<OptionValue> {
        let value = self.read_value()?;
        self.skip_whitespace();
        if self.pos < self.src.len() {
            return Err(self.error("unexpected trailing characters"));
        }
        Ok(value)
    }

    fn read_value(&mut self) -> LiteralResult<OptionValue> {
        self.skip_whitespace();
        if self.rest().starts_with(JS_CODE_SENTINEL) {
            return self.read_code();
        }
        match self.peek() {
            Some('{') => self.nested(Self::read_object),
            Some('[') => self.nested(Self::read_array),
            Some(quote @ ('"' | '\'')) => self.read_string(quote).map(OptionValue::String),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => {
                self.read_number()
            }
            Some(c) if is_ident_start(c) => self.read_keyword(),
            Some(c) => Err(self.error(format!("unexpected character `{c}`"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn nested(
        &mut self,
        read: fn(&mut Self) -> LiteralResult<OptionValue>,
    ) -> LiteralResult<OptionValue> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(format!("nesting deeper than {MAX_DEPTH} levels")));
        }
        self.depth += 1;
        let value = read(self);
        self.depth -= 1;
        value
    }

    fn read_object(&mut self) -> LiteralResult<OptionValue> {
        self.consume('{')?;
        let mut map = OptionMap::new();
        loop {
            self.skip_whitespace();
            if self.eat('}') {
                return Ok(OptionValue::Object(map));
            }
            let key = self.read_key()?;
            self.skip_whitespace();
            self.consume(':')?;
            let value = self.read_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            if self.eat(',') {
                continue;
            }
            if self.eat('}') {
                return Ok(OptionValue::Object(map));
            }
            return Err(self.error("expected `,` or `}` after object entry"));
        }
    }

    fn read_array(&mut self) -> LiteralResult<OptionValue> {
        self.consume('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eat(']') {
                return Ok(OptionValue::Array(items));
            }
            items.push(self.read_value()?);

            self.skip_whitespace();
            if self.eat(',') {
                continue;
            }
            if self.eat(']') {
                return Ok(OptionValue::Array(items));
            }
            return Err(self.error("expected `,` or `]` after array element"));
        }
    }

    fn read_key(&mut self) -> LiteralResult<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.read_string(quote),
            Some(c) if is_ident_start(c) || c.is_ascii_digit() => {
                Ok(self.take_while(is_ident_continue).to_owned())
            }
            Some(c) => Err(self.error(format!("unexpected character `{c}` in object key"))),
            None => Err(self.error("unexpected end of input in object")),
        }
    }

    fn read_string(&mut self, quote: char) -> LiteralResult<String> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        while let Some(c) = self.bump() {
            if c == quote {
                return Ok(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }
            match self.bump() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('b') => out.push('\u{08}'),
                Some('f') => out.push('\u{0c}'),
                Some('0') => out.push('\0'),
                Some('u') => out.push(self.read_unicode_escape()?),
                Some('x') => out.push(self.read_hex_escape()?),
                // Line continuation.
                Some('\n') => {}
                Some(other) => out.push(other),
                None => break,
            }
        }
        Err(LiteralError::parse(start, "unterminated string literal"))
    }

    fn read_unicode_escape(&mut self) -> LiteralResult<char> {
        let high = self.read_hex_digits(4)?;
        if (0xD800..0xDC00).contains(&high) && self.rest().starts_with("\\u") {
            self.pos += 2;
            let low = self.read_hex_digits(4)?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(self.error(format!(
                    "high surrogate `\\u{high:04X}` followed by `\\u{low:04X}`"
                )));
            }
            let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(combined)
                .ok_or_else(|| self.error("invalid surrogate pair in unicode escape"));
        }
        char::from_u32(high).ok_or_else(|| self.error("invalid unicode escape"))
    }

    fn read_hex_escape(&mut self) -> LiteralResult<char> {
        let code = self.read_hex_digits(2)?;
        char::from_u32(code).ok_or_else(|| self.error("invalid hex escape"))
    }

    fn read_hex_digits(&mut self, count: usize) -> LiteralResult<u32> {
        let digits = self
            .rest()
            .get(..count)
            .filter(|digits| digits.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.error(format!("expected {count} hex digits in escape")))?;
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| self.error(format!("invalid hex digits `{digits}`")))?;
        self.pos += count;
        Ok(value)
    }

    fn read_number(&mut self) -> LiteralResult<OptionValue> {
        let start = self.pos;
        let text = self.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        let text = text.strip_prefix('+').unwrap_or(text);

        match text {
            "Infinity" => return Ok(OptionValue::Float(f64::INFINITY)),
            "-Infinity" => return Ok(OptionValue::Float(f64::NEG_INFINITY)),
            _ => {}
        }
        if let Ok(int) = text.parse::<i64>() {
            return Ok(OptionValue::Int(int));
        }
        if let Ok(uint) = text.parse::<u64>() {
            return Ok(OptionValue::UInt(uint));
        }
        text.parse::<f64>()
            .ok()
            .filter(|_| !text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E'))
            .map(OptionValue::Float)
            .ok_or_else(|| LiteralError::parse(start, format!("invalid number `{text}`")))
    }

    fn read_keyword(&mut self) -> LiteralResult<OptionValue> {
        let start = self.pos;
        match self.take_while(is_ident_continue) {
            "true" => Ok(OptionValue::Bool(true)),
            "false" => Ok(OptionValue::Bool(false)),
            "null" | "undefined" => Ok(OptionValue::Null),
            "NaN" => Ok(OptionValue::Float(f64::NAN)),
            "Infinity" => Ok(OptionValue::Float(f64::INFINITY)),
            other => Err(LiteralError::parse(
                start,
                format!("unsupported bare identifier `{other}`"),
            )),
        }
    }

    fn read_code(&mut self) -> LiteralResult<OptionValue> {
        let start = self.pos;
        self.pos += JS_CODE_SENTINEL.len();
        let len = self
            .rest()
            .find(JS_CODE_SENTINEL)
            .ok_or_else(|| LiteralError::parse(start, "unterminated code marker"))?;
        let code = &self.src[self.pos..self.pos + len];
        self.pos += len + JS_CODE_SENTINEL.len();
        Ok(OptionValue::Code(JsCode::verbatim(code)))
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        let len = self
            .rest()
            .find(|c: char| !pred(c))
            .unwrap_or(self.src.len() - start);
        self.pos += len;
        &self.src[start..self.pos]
    }

    fn consume(&mut self, expected: char) -> LiteralResult<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{expected}`")))
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError::parse(self.pos, message)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
