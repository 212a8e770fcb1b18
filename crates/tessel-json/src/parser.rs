//! Recursive-descent JSON parser.
//!
//! The parser walks the input with an explicit byte cursor and an explicit
//! nesting counter. The next non-whitespace byte selects the production:
//! `n`, `t`, `f` start a literal, `"` a string, `[` an array, `{` an object,
//! and anything else is read as a number.
//!
//! # Key design decisions
//!
//! - **Depth before content**: entering an array or object bumps the depth
//!   first and fails with `MaxDepthExceeded` before the bracket is consumed,
//!   so a document nested exactly `max_depth` levels parses and one level more
//!   does not.
//! - **Context, not concatenation**: an error raised inside a container gets
//!   one context frame per enclosing array element / object member on its way
//!   out. The kind, root message and byte offset of the original failure are
//!   left untouched.
//! - **Escapes**: only `\" \\ \/ \b \f \n \r \t` are decoded. `\u` escapes are
//!   rejected with `UnknownEscape`; raw control characters pass through.
//! - **Numbers** follow the JSON grammar (no leading `+`, no leading zeros,
//!   digits required around `.` and after `e`). The scanned text is converted
//!   with `str::parse::<f64>`; overflow to infinity is `NumberOutOfRange`.
//! - **Duplicate keys**: the first occurrence wins.

use tracing::{debug, trace};

use crate::error::{ErrorKind, JsonError, Result};
use crate::json::Json;
use crate::options::ParseOptions;
use crate::value::{Array, Object};

/// Parse a complete JSON document with [`ParseOptions::strict`].
///
/// ```
/// let doc = tessel_json::parse(r#"{"b": [1, 2], "a": null}"#).unwrap();
/// let keys: Vec<&String> = doc.object_iter().unwrap().map(|(k, _)| k).collect();
/// assert_eq!(keys, ["a", "b"]);
/// assert_eq!(doc.member("b").unwrap().at(1).unwrap().get_number().unwrap(), 2.0);
/// ```
pub fn parse(text: &str) -> Result<Json> {
    parse_with(text, ParseOptions::strict())
}

/// Parse with explicit options.
pub fn parse_with(text: &str, options: ParseOptions) -> Result<Json> {
    let (value, _) = run(text, options)?;
    Ok(value)
}

/// Parse the first value in `text` and return it with the byte offset where
/// parsing stopped. Anything after that offset is not examined.
pub fn parse_prefix(text: &str) -> Result<(Json, usize)> {
    run(text, ParseOptions::lenient())
}

fn run(text: &str, options: ParseOptions) -> Result<(Json, usize)> {
    debug!(
        len = text.len(),
        max_depth = options.effective_max_depth(),
        "parsing JSON"
    );
    let mut parser = Parser::new(text, options);
    let result = parser.parse_value().and_then(|value| {
        if !options.allow_trailing {
            parser.expect_end()?;
        }
        Ok((value, parser.pos))
    });
    match &result {
        Ok((value, end)) => debug!(kind = ?value.kind().ok(), end, "parsed JSON"),
        Err(err) => debug!(kind = ?err.kind(), offset = err.offset(), "JSON parse failed"),
    }
    result
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: ParseOptions) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            depth: 0,
            max_depth: options.effective_max_depth(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// The character at the cursor, for error messages.
    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\0')
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.pos += 1;
        }
    }

    fn unexpected_end(&self) -> JsonError {
        JsonError::syntax(ErrorKind::UnexpectedEnd, "unexpected end of input", self.pos)
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(JsonError::syntax(
                ErrorKind::TrailingCharacters,
                format!(
                    "trailing characters after JSON value, starting with '{}'",
                    self.current_char()
                ),
                self.pos,
            ));
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Json> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.unexpected_end()),
            Some(b'n') => self.parse_literal("null", Json::null()),
            Some(b't') => self.parse_literal("true", Json::from(true)),
            Some(b'f') => self.parse_literal("false", Json::from(false)),
            Some(b'"') => Ok(Json::from(self.parse_string()?)),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(_) => self.parse_number(),
        }
    }

    fn parse_literal(&mut self, literal: &str, value: Json) -> Result<Json> {
        let rest = &self.bytes[self.pos..];
        if rest.starts_with(literal.as_bytes()) {
            self.pos += literal.len();
            return Ok(value);
        }
        let got: String = self.input[self.pos..].chars().take(literal.len()).collect();
        Err(JsonError::syntax(
            ErrorKind::InvalidLiteral,
            format!("expected '{literal}', found '{got}'"),
            self.pos,
        ))
    }

    /// Parse a string literal; the cursor must be on the opening quote.
    fn parse_string(&mut self) -> Result<String> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        let mut run_start = self.pos;

        loop {
            match self.peek() {
                None => {
                    return Err(JsonError::syntax(
                        ErrorKind::UnterminatedString,
                        format!("unterminated string starting at byte {start}"),
                        self.pos,
                    ));
                }
                Some(b'"') => {
                    out.push_str(&self.input[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.input[run_start..self.pos]);
                    self.pos += 1;
                    out.push(self.parse_escape(start)?);
                    self.pos += 1;
                    run_start = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Decode the escape character at the cursor (just after the backslash).
    fn parse_escape(&self, string_start: usize) -> Result<char> {
        let decoded = match self.peek() {
            None => {
                return Err(JsonError::syntax(
                    ErrorKind::UnterminatedString,
                    format!("unterminated string starting at byte {string_start}"),
                    self.pos,
                ));
            }
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{08}',
            Some(b'f') => '\u{0C}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(_) => {
                return Err(JsonError::syntax(
                    ErrorKind::UnknownEscape,
                    format!("unknown escape sequence '\\{}'", self.current_char()),
                    self.pos,
                ));
            }
        };
        Ok(decoded)
    }

    fn parse_number(&mut self) -> Result<Json> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.invalid_number(start)),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.invalid_number(start));
            }
            self.skip_digits();
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.invalid_number(start));
            }
            self.skip_digits();
        }

        let text = &self.input[start..self.pos];
        let number: f64 = text.parse().map_err(|_| {
            JsonError::syntax(
                ErrorKind::InvalidNumber,
                format!("invalid number '{text}'"),
                start,
            )
        })?;
        if !number.is_finite() {
            return Err(JsonError::syntax(
                ErrorKind::NumberOutOfRange,
                format!("number '{text}' is out of range"),
                start,
            ));
        }
        Ok(Json::from(number))
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
    }

    fn invalid_number(&self, start: usize) -> JsonError {
        let message = match self.peek() {
            Some(_) => format!(
                "invalid number: unexpected character '{}'",
                self.current_char()
            ),
            None => "invalid number: input ends mid-number".to_string(),
        };
        let offset = if self.pos < self.bytes.len() { self.pos } else { start };
        JsonError::syntax(ErrorKind::InvalidNumber, message, offset)
    }

    /// Step into a container; the cursor is still on its opening bracket.
    fn descend(&mut self, what: &str) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(JsonError::syntax(
                ErrorKind::MaxDepthExceeded,
                format!(
                    "exceeded maximum nesting depth of {} at {what}",
                    self.max_depth
                ),
                self.pos,
            ));
        }
        trace!(depth = self.depth, offset = self.pos, "entering {what}");
        self.pos += 1;
        Ok(())
    }

    fn parse_array(&mut self) -> Result<Json> {
        self.descend("array")?;
        let mut items = Array::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Json::from(items));
        }

        loop {
            let index = items.len();
            let item = self
                .parse_value()
                .map_err(|e| e.within(format!("array element {index}")))?;
            items.push(item);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    return Err(JsonError::syntax(
                        ErrorKind::InvalidArray,
                        format!(
                            "expected ',' or ']' after array element, found '{}'",
                            self.current_char()
                        ),
                        self.pos,
                    ));
                }
                None => return Err(self.unexpected_end()),
            }
        }

        self.depth -= 1;
        Ok(Json::from(items))
    }

    fn parse_object(&mut self) -> Result<Json> {
        self.descend("object")?;
        let mut map = Object::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Json::from(map));
        }

        loop {
            self.skip_whitespace();
            let key = match self.peek() {
                Some(b'"') => self
                    .parse_string()
                    .map_err(|e| e.within("object key"))?,
                Some(_) => {
                    return Err(JsonError::syntax(
                        ErrorKind::ExpectedKey,
                        format!("expected string key, found '{}'", self.current_char()),
                        self.pos,
                    ));
                }
                None => return Err(self.unexpected_end()),
            };

            let value = self
                .parse_member_value()
                .map_err(|e| e.within(format!("object member \"{key}\"")))?;
            map.entry(key).or_insert(value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    return Err(JsonError::syntax(
                        ErrorKind::InvalidObject,
                        format!(
                            "expected ',' or '}}' after object member, found '{}'",
                            self.current_char()
                        ),
                        self.pos,
                    ));
                }
                None => return Err(self.unexpected_end()),
            }
        }

        self.depth -= 1;
        Ok(Json::from(map))
    }

    /// The `: value` part of an object member.
    fn parse_member_value(&mut self) -> Result<Json> {
        self.skip_whitespace();
        match self.peek() {
            Some(b':') => self.pos += 1,
            Some(_) => {
                return Err(JsonError::syntax(
                    ErrorKind::ExpectedColon,
                    format!("expected ':' after object key, found '{}'", self.current_char()),
                    self.pos,
                ));
            }
            None => return Err(self.unexpected_end()),
        }
        self.parse_value()
    }
}
