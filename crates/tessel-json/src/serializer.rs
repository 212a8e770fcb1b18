//! Text rendering for values.
//!
//! Arrays print on a single line with `", "` between elements. Objects print
//! one entry per line, indented with tabs according to nesting depth:
//!
//! ```text
//! {
//! 	"list" : [1, 2, {
//! 		"deep" : true
//! 	}],
//! 	"name" : "tessel"
//! }
//! ```
//!
//! # Key design decisions
//!
//! - **Numbers** use the shortest decimal text that reads back to the same
//!   `f64`, so `1` prints as `1` and `0.1` as `0.1`. NaN and the infinities
//!   have no JSON spelling and print as `null`.
//! - **Strings and keys** escape `"`, `\` and the control characters that
//!   have a short escape (`\b \f \n \r \t`), which is exactly the escape set
//!   the parser reads back. Every other character is written verbatim.

use crate::error::Result;
use crate::json::Json;
use crate::value::{Object, Value};

impl Value {
    /// Append this value's text to `out`. `depth` is the indentation level of
    /// the line the value starts on; object entries go one level deeper and
    /// array elements stay on the array's line.
    pub(crate) fn render(&self, out: &mut String, depth: usize) -> Result<()> {
        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => render_number(*n, out),
            Value::String(s) => render_string(s, out),
            Value::Array(items) => render_array(items, out, depth)?,
            Value::Object(map) => render_object(map, out, depth)?,
        }
        Ok(())
    }
}

fn render_number(n: f64, out: &mut String) {
    if n.is_finite() {
        out.push_str(&n.to_string());
    } else {
        out.push_str("null");
    }
}

/// Quote and escape a string so the parser reads it back unchanged.
pub(crate) fn render_string(s: &str, out: &mut String) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
}

fn render_array(items: &[Json], out: &mut String, depth: usize) -> Result<()> {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        item.dump_into(out, depth)?;
    }
    out.push(']');
    Ok(())
}

fn render_object(map: &Object, out: &mut String, depth: usize) -> Result<()> {
    if map.is_empty() {
        out.push_str("{}");
        return Ok(());
    }
    out.push_str("{\n");
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        push_indent(out, depth + 1);
        render_string(key, out);
        out.push_str(" : ");
        value.dump_into(out, depth + 1)?;
    }
    out.push('\n');
    push_indent(out, depth);
    out.push('}');
    Ok(())
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}
