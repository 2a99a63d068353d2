//! Type-to-schema mapping.
//!
//! Maps a [`TypeTag`] descriptor to a JSON-Schema fragment. The mapper is
//! total: every descriptor produces a fragment, and unrecognized shapes fall
//! back to `{"type": "object"}`.

use serde_json::{Value, json};

use super::types::TypeTag;

/// Map a type descriptor to its JSON-Schema fragment.
pub fn schema_for(tag: &TypeTag) -> Value {
    match tag {
        TypeTag::String => json!({ "type": "string" }),
        TypeTag::Integer => json!({ "type": "integer" }),
        TypeTag::Number => json!({ "type": "number" }),
        TypeTag::Boolean => json!({ "type": "boolean" }),
        TypeTag::Null => json!({ "type": "null" }),

        // Nullable: recurse, then widen a scalar "type" into [type, "null"].
        TypeTag::Optional(inner) => {
            let mut schema = schema_for(inner);
            if let Some(obj) = schema.as_object_mut() {
                if let Some(Value::String(ty)) = obj.get("type").cloned() {
                    obj.insert("type".to_string(), json!([ty, "null"]));
                }
            }
            schema
        }

        TypeTag::List(Some(element)) => json!({
            "type": "array",
            "items": schema_for(element),
        }),
        TypeTag::List(None) => json!({ "type": "array" }),

        TypeTag::Map => json!({ "type": "object" }),
        TypeTag::Any => json!({ "type": "object" }),
    }
}
