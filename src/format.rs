//! Canonical text form of the registry file.
//!
//! Two-space indentation, one element per line, separating commas on the
//! line of the preceding closing character, and a single trailing newline.
//! Numbers and key order follow `JSON.stringify(value, null, 2)`, which is
//! what the registry's other consumers write back: integral floats lose
//! their fraction, and keys that look like array indices sort numerically
//! ahead of all other keys, which keep their source order.

use serde_json::{Map, Number, Value};

use crate::error::{FormatError, ParseError};

/// Render `value` in canonical form.
pub fn canonical(value: &Value) -> String {
    // Serializing a `Value` cannot fail: keys are always strings.
    let mut out = serde_json::to_string_pretty(&normalize(value)).unwrap_or_default();
    out.push('\n');
    out
}

/// Reformat registry text. Fails only when the text is not JSON.
pub fn generate(original: &str) -> Result<String, FormatError> {
    Ok(canonical(&parse_value(original)?))
}

/// Ensure `original` is already canonical. Returns the decoded value so
/// callers do not parse twice.
pub fn check_format(original: &str) -> Result<Value, FormatError> {
    let value = parse_value(original)?;
    let expected = canonical(&value);
    if expected == original {
        return Ok(value);
    }

    let (line, expected_line, found_line) = first_difference(&expected, original);
    Err(FormatError::NotCanonical {
        line,
        expected: expected_line.to_string(),
        found: found_line.to_string(),
    })
}

fn normalize(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(normalize_number(n)),
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        Value::Object(map) => Value::Object(normalize_object(map)),
        other => other.clone(),
    }
}

fn normalize_number(n: &Number) -> Number {
    if n.is_i64() || n.is_u64() {
        return n.clone();
    }
    match n.as_f64() {
        // -0.0 lands on 0 as well.
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Number::from(f as i64)
        }
        _ => n.clone(),
    }
}

fn normalize_object(map: &Map<String, Value>) -> Map<String, Value> {
    let (mut indexed, named): (Vec<_>, Vec<_>) =
        map.iter().partition(|(key, _)| array_index(key).is_some());
    indexed.sort_by_key(|(key, _)| array_index(key));
    indexed
        .into_iter()
        .chain(named)
        .map(|(key, value)| (key.clone(), normalize(value)))
        .collect()
}

/// `Some(n)` when `key` is the canonical decimal form of an array index.
fn array_index(key: &str) -> Option<u32> {
    let canonical_digits = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if !canonical_digits {
        return None;
    }
    key.parse::<u32>().ok().filter(|&n| n != u32::MAX)
}

fn parse_value(input: &str) -> Result<Value, ParseError> {
    serde_json::from_str(input).map_err(|e| ParseError {
        message: e.to_string(),
        line: Some(e.line()),
        column: Some(e.column()),
    })
}

/// 1-based line of the first divergence, with both sides of it. A missing
/// or extra trailing newline shows up as an empty line on one side.
fn first_difference<'a>(expected: &'a str, found: &'a str) -> (usize, &'a str, &'a str) {
    let mut exp = expected.split('\n');
    let mut got = found.split('\n');
    let mut line = 1;
    loop {
        match (exp.next(), got.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            (a, b) => return (line, a.unwrap_or(""), b.unwrap_or("")),
        }
    }
}
