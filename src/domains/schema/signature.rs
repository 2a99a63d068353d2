//! Schema generation from tool signatures.
//!
//! Turns a [`Signature`] into the input schema advertised for a tool and,
//! when a return type is declared, the output schema used for result
//! validation.

use serde_json::{Map, Value, json};

use super::mapper::schema_for;
use super::types::Signature;

/// Generate the input schema for a signature.
///
/// The result always has `"type": "object"`. Properties appear in parameter
/// declaration order; parameters without a default value are listed under
/// `required`. The `required` key is omitted entirely when every parameter
/// has a default.
pub fn input_schema(signature: &Signature) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in &signature.params {
        properties.insert(param.name.clone(), schema_for(&param.ty));
        if !param.has_default {
            required.push(Value::String(param.name.clone()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));

    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }

    Value::Object(schema)
}

/// Generate the output schema for a signature, if it declares a return type.
pub fn output_schema(signature: &Signature) -> Option<Value> {
    signature.returns.as_ref().map(schema_for)
}
