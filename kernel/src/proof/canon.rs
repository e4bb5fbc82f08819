//! Canonical JSON bytes: the one writer every digest goes through.
//!
//! Two values that are equal as JSON always produce the same bytes:
//!
//! - object keys in byte order, at every depth;
//! - compact form, no whitespace;
//! - integers only (`i64` / `u64`); a float anywhere is an error, and
//!   callers render scores and costs with [`float_value`] instead;
//! - strings escaped per RFC 8259 with lowercase `\u00xx` for other
//!   control characters; non-ASCII passes through as UTF-8.

use std::fmt::Write as _;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonError {
    /// A JSON number was not an integer (float, NaN, Infinity).
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },
}

/// Render a float as a JSON string using Rust's shortest round-trip form.
///
/// `0.5` becomes `"0.5"`, `3.0` becomes `"3"`, infinities become `"inf"`/`"-inf"`.
/// Negative zero renders as `"0"`.
#[must_use]
pub fn float_value(value: f64) -> Value {
    let value = if value == 0.0 { 0.0 } else { value };
    Value::String(format!("{value}"))
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any JSON number is not
/// representable as `i64` or `u64`.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    let mut out = String::new();
    emit(&mut out, value)?;
    Ok(out.into_bytes())
}

fn emit(out: &mut String, value: &Value) -> Result<(), CanonError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => {
                let _ = write!(out, "{i}");
            }
            (None, Some(u)) => {
                let _ = write!(out, "{u}");
            }
            (None, None) => {
                return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
            }
        },
        Value::String(s) => emit_str(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit_str(out, key);
                out.push(':');
                emit(out, item)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn emit_str(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if u32::from(c) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
