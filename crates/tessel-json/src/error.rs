//! Error types for JSON parsing and value access.

use std::fmt;

use thiserror::Error;

use crate::value::Kind;

/// The category of a [`JsonError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operation not valid for the value's kind.
    InvalidType,
    /// Array index past the end.
    IndexOutOfRange,
    /// Object key absent.
    KeyNotFound,
    /// Access through a handle whose value was taken.
    NullHandle,
    /// Input ended where a value or delimiter was expected.
    UnexpectedEnd,
    /// Input ended inside a string literal.
    UnterminatedString,
    /// Backslash followed by an unsupported character.
    UnknownEscape,
    /// `n`/`t`/`f` that did not spell `null`/`true`/`false`.
    InvalidLiteral,
    /// Text at a number position that is not a JSON number.
    InvalidNumber,
    /// Number literal whose magnitude does not fit in an `f64`.
    NumberOutOfRange,
    /// Array/object nesting beyond the configured depth.
    MaxDepthExceeded,
    /// Object member that does not start with a string key.
    ExpectedKey,
    /// Object key not followed by `:`.
    ExpectedColon,
    /// Array element not followed by `,` or `]`.
    InvalidArray,
    /// Object member not followed by `,` or `}`.
    InvalidObject,
    /// Non-whitespace input after the root value.
    TrailingCharacters,
}

impl ErrorKind {
    /// Returns true for errors produced by the parser.
    pub fn is_syntax(self) -> bool {
        !matches!(
            self,
            ErrorKind::InvalidType
                | ErrorKind::IndexOutOfRange
                | ErrorKind::KeyNotFound
                | ErrorKind::NullHandle
        )
    }
}

/// Error returned by parsing and by typed access on a [`Json`](crate::Json).
///
/// Parse errors carry the byte offset into the input where the problem was
/// detected; access errors use offset 0. Errors raised inside nested
/// containers collect one context entry per enclosing array/object, outermost
/// first, while `kind`, `message` and `offset` keep describing the root cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render(.context, .message, .kind, .offset))]
pub struct JsonError {
    kind: ErrorKind,
    message: String,
    offset: usize,
    context: Vec<String>,
}

impl JsonError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            offset,
            context: Vec::new(),
        }
    }

    /// A parse error at `offset`.
    pub(crate) fn syntax(kind: ErrorKind, message: impl Into<String>, offset: usize) -> Self {
        Self::new(kind, message, offset)
    }

    pub(crate) fn invalid_type(operation: &str, kind: Kind) -> Self {
        Self::new(
            ErrorKind::InvalidType,
            format!("invalid type: cannot call {operation} on a JSON {kind}"),
            0,
        )
    }

    pub(crate) fn index_out_of_range(operation: &str, index: usize, len: usize) -> Self {
        Self::new(
            ErrorKind::IndexOutOfRange,
            format!("{operation}: index {index} out of range for array of length {len}"),
            0,
        )
    }

    pub(crate) fn key_not_found(operation: &str, key: &str) -> Self {
        Self::new(
            ErrorKind::KeyNotFound,
            format!("{operation}: key \"{key}\" does not exist"),
            0,
        )
    }

    pub(crate) fn null_handle() -> Self {
        Self::new(
            ErrorKind::NullHandle,
            "bad JSON access: handle holds no value",
            0,
        )
    }

    /// Push a context entry for an enclosing container frame.
    ///
    /// Frames are added innermost first as the error unwinds, so each call
    /// inserts at the front of the chain.
    pub(crate) fn within(mut self, frame: impl Into<String>) -> Self {
        self.context.insert(0, frame.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Byte offset into the parsed input (0 for access errors).
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The root cause message, without container context.
    pub fn root_message(&self) -> &str {
        &self.message
    }

    /// Enclosing container frames, outermost first.
    pub fn context(&self) -> &[String] {
        &self.context
    }
}

fn render(context: &[String], message: &str, kind: &ErrorKind, offset: &usize) -> String {
    let mut out = String::new();
    for frame in context {
        out.push_str(frame);
        out.push_str(": ");
    }
    out.push_str(message);
    if kind.is_syntax() {
        out.push_str(&format!(" (at byte {offset})"));
    }
    out
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Convenience alias used throughout tessel-json.
pub type Result<T> = std::result::Result<T, JsonError>;
