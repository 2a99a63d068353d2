//! Output normalization and validation.
//!
//! Validates a tool's raw return value against its declared output schema
//! and, when the schema describes a wrapped primitive, promotes the bare
//! value into a `{"result": value}` object.
//!
//! Validation is intentionally shallow: only the top-level `type` is
//! checked, never nested `properties` or `items`. An `object` schema accepts
//! any mapping.

use serde_json::{Value, json};

use super::error::ToolError;

/// Validate `output` against the declared schema and apply wrapping.
///
/// With no schema, the output passes through unchanged. A schema whose
/// `properties` holds exactly one entry named `result` marks a wrapped
/// primitive: the bare value is validated against the inner type and wrapped
/// unless it already carries a `result` key.
pub fn normalize_output(output: Value, schema: Option<&Value>) -> Result<Value, ToolError> {
    let Some(schema) = schema else {
        return Ok(output);
    };

    let schema_type = schema.get("type").and_then(Value::as_str);

    if schema_type == Some("object") {
        if let Some(inner) = wrapped_primitive_type(schema) {
            check_primitive(&output, inner)?;

            let already_wrapped = output
                .as_object()
                .is_some_and(|map| map.contains_key("result"));
            if !already_wrapped {
                return Ok(json!({ "result": output }));
            }
        }
    }

    if let Some(expected) = schema_type {
        check_type(&output, expected)?;
    }

    Ok(output)
}

/// The inner primitive type of a wrapped-primitive schema: a single-property
/// object schema whose sole property is named `result`.
fn wrapped_primitive_type(schema: &Value) -> Option<&str> {
    let properties = schema.get("properties")?.as_object()?;
    if properties.len() != 1 {
        return None;
    }
    properties.get("result")?.get("type")?.as_str()
}

/// Validate a bare value against a primitive type name. Type identity is
/// exact: booleans are not integers and vice versa.
fn check_primitive(output: &Value, expected: &str) -> Result<(), ToolError> {
    let ok = match expected {
        "string" => output.is_string(),
        "integer" => output.is_i64() || output.is_u64(),
        "number" => output.is_number(),
        "boolean" => output.is_boolean(),
        // Wrapping only applies to primitives; other inner types are left
        // to the top-level check.
        _ => return Ok(()),
    };

    if ok {
        Ok(())
    } else {
        Err(mismatch(expected, output))
    }
}

/// Validate the top-level runtime type of a value against a schema type
/// name. Names outside the six checked strings pass unchecked.
fn check_type(output: &Value, expected: &str) -> Result<(), ToolError> {
    let ok = match expected {
        "string" => output.is_string(),
        "integer" => output.is_i64() || output.is_u64(),
        "number" => output.is_number(),
        "boolean" => output.is_boolean(),
        "object" => output.is_object(),
        "array" => output.is_array(),
        _ => return Ok(()),
    };

    if ok {
        Ok(())
    } else {
        Err(mismatch(expected, output))
    }
}

fn mismatch(expected: &str, actual: &Value) -> ToolError {
    ToolError::validation(format!("Expected {}, got {}", expected, json_type_name(actual)))
}

/// The JSON type name of a value, for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
