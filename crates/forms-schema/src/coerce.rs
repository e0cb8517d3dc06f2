//! Value coercion at the decoder boundary
//!
//! Converts untyped parse-tree leaves into the strings and numbers the model
//! stores. Every function here is total; absent values coerce to empty.

use crate::syntax::Value;

/// Coerce a positional value to a string
///
/// Absent and null become `""`, strings pass through, numbers and booleans
/// are rendered.
#[must_use]
pub fn coerce(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => format_number(*n),
        Some(Value::Bool(b)) => b.to_string(),
    }
}

/// Coerce a property value to a string, never failing
///
/// Used for identifiers and option fields read from properties. The parse tree
/// only has scalar leaves, so this agrees with [`coerce`] on every value.
#[must_use]
pub fn safe_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => format_number(*n),
        Some(Value::Bool(b)) => b.to_string(),
        None | Some(Value::Null) => String::new(),
    }
}

/// Coerce a value to a finite number
///
/// Numeric strings are parsed after trimming; booleans count as 1 and 0.
/// Anything else is `None`.
#[must_use]
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => *n,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => return None,
    };
    n.is_finite().then_some(n)
}

/// Coerce a value to an integer
///
/// Fractional numbers are rejected rather than truncated.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn coerce_integer(value: Option<&Value>) -> Option<i64> {
    let n = coerce_number(value)?;
    // 2^63 is exactly representable; anything at or past it overflows i64
    (n.fract() == 0.0 && n.abs() < 9_223_372_036_854_775_808.0).then(|| n as i64)
}

/// Render a number in its shortest form
///
/// Integral values print without a fractional part.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
