use serde_json::Value;

use crate::error::ParseError;

/// Parse registry text into its records, in declaration order.
///
/// Performs JSON decoding and the root-shape check only. Records are
/// returned as raw values; use [`crate::schema::validate_schema`] before
/// decoding them into [`crate::types::Record`].
pub fn parse(input: &str) -> Result<Vec<Value>, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            message: "empty input".to_string(),
            line: None,
            column: None,
        });
    }

    let value: Value = serde_json::from_str(input).map_err(|e| ParseError {
        message: e.to_string(),
        line: Some(e.line()),
        column: Some(e.column()),
    })?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(ParseError {
            message: format!(
                "registry root must be an array of records, got {}",
                type_name(&other)
            ),
            line: None,
            column: None,
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
