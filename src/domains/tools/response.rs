//! Response envelope types and conversion.
//!
//! The envelope is the canonical wire shape for tool results: a list of
//! content blocks, optional machine-readable structured data, and an error
//! flag. [`to_envelope`] converts any accepted return shape into an envelope
//! following a fixed precedence order; already-built envelopes are a fixed
//! point.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::ContentBlock;

/// The canonical response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Human-readable content blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentBlock>,

    /// Machine-readable structured data.
    #[serde(
        rename = "structuredContent",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub structured_content: Option<Value>,

    /// Set to `true` on error envelopes; omitted otherwise.
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none", default)]
    pub is_error: Option<bool>,

    /// Optional progress indication (0.0 to 100.0).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub progress: Option<f64>,

    /// Optional metadata passed through to clients.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none", default)]
    pub meta: Option<Value>,
}

impl ResponseEnvelope {
    /// Create a simple text envelope.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            structured_content: None,
            is_error: None,
            progress: None,
            meta: None,
        }
    }

    /// Create an error envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(message)],
            structured_content: None,
            is_error: Some(true),
            progress: None,
            meta: None,
        }
    }

    /// Create an envelope with both text and structured content.
    pub fn with_structured(text: impl Into<String>, structured: Value) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            structured_content: Some(structured),
            is_error: None,
            progress: None,
            meta: None,
        }
    }

    /// Whether this envelope is flagged as an error.
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// The text of the first text content block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| block.as_text())
    }
}

/// Fluent builder for rich envelopes with multiple content types.
///
/// # Example
///
/// ```
/// use mcp_tool_sdk::EnvelopeBuilder;
/// use serde_json::json;
///
/// let envelope = EnvelopeBuilder::new()
///     .text("Process completed")
///     .with_structured(json!({"status": "success", "count": 42}))
///     .with_progress(90.0)
///     .build();
/// assert_eq!(envelope.progress, Some(90.0));
/// ```
#[derive(Debug, Default)]
pub struct EnvelopeBuilder {
    content: Vec<ContentBlock>,
    structured_content: Option<Value>,
    is_error: bool,
    progress: Option<f64>,
    meta: Map<String, Value>,
}

impl EnvelopeBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text content block.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content.push(ContentBlock::text(text));
        self
    }

    /// Add an image content block.
    pub fn image(mut self, data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        self.content.push(ContentBlock::image(data, mime_type));
        self
    }

    /// Add an audio content block.
    pub fn audio(mut self, data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        self.content.push(ContentBlock::audio(data, mime_type));
        self
    }

    /// Add a resource content block.
    pub fn resource(mut self, resource: Value) -> Self {
        self.content.push(ContentBlock::resource(resource));
        self
    }

    /// Set the structured content.
    pub fn with_structured(mut self, structured: Value) -> Self {
        self.structured_content = Some(structured);
        self
    }

    /// Set progress, clamped to the 0.0..=100.0 range.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress.clamp(0.0, 100.0));
        self
    }

    /// Merge metadata keys into the envelope's `_meta` object.
    pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta.extend(meta);
        self
    }

    /// Mark this envelope as an error, appending the message as text.
    pub fn error(mut self, message: impl Into<String>, details: Option<Value>) -> Self {
        self.is_error = true;
        self.content.push(ContentBlock::text(message));
        if let Some(details) = details {
            self.structured_content = Some(serde_json::json!({ "error_details": details }));
        }
        self
    }

    /// Build the final envelope, omitting empty and absent fields.
    pub fn build(self) -> ResponseEnvelope {
        ResponseEnvelope {
            content: self.content,
            structured_content: self.structured_content,
            is_error: self.is_error.then_some(true),
            progress: self.progress,
            meta: (!self.meta.is_empty()).then(|| Value::Object(self.meta)),
        }
    }
}

/// Convert any accepted return shape into a response envelope.
///
/// Precedence order:
/// 1. Already an envelope (object with a `content` key) - pass through.
/// 2. A single-key `{"result": v}` object - structured envelope around the
///    wrapped value.
/// 3. Plain string - text-only envelope.
/// 4. Object or array - structured envelope with pretty-printed JSON text.
/// 5. Number or boolean - text-only envelope with the canonical string form.
/// 6. Null - text-only envelope with an empty string.
///
/// The match below is exhaustive over JSON values, so the "anything else"
/// fallback of looser type systems has no arm here.
pub fn to_envelope(value: Value) -> ResponseEnvelope {
    match value {
        Value::Object(map) => {
            if map.contains_key("content") {
                // An object carrying a content key is envelope-shaped; one
                // that fails to parse as an envelope is treated as plain
                // structured data below.
                if let Ok(envelope) = serde_json::from_value(Value::Object(map.clone())) {
                    return envelope;
                }
            }

            if map.len() == 1 {
                if let Some(wrapped) = map.get("result") {
                    let text = scalar_text(wrapped);
                    return ResponseEnvelope::with_structured(text, Value::Object(map));
                }
            }

            structured_envelope(Value::Object(map))
        }
        Value::Array(items) => structured_envelope(Value::Array(items)),
        Value::String(text) => ResponseEnvelope::text(text),
        Value::Number(n) => ResponseEnvelope::text(n.to_string()),
        Value::Bool(b) => ResponseEnvelope::text(b.to_string()),
        Value::Null => ResponseEnvelope::text(""),
    }
}

/// Structured envelope: pretty-printed JSON text plus the value itself.
fn structured_envelope(value: Value) -> ResponseEnvelope {
    let text = serde_json::to_string_pretty(&value).unwrap_or_default();
    ResponseEnvelope::with_structured(text, value)
}

/// The text form of a wrapped scalar: strings verbatim, everything else in
/// its canonical JSON form.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_envelope() {
        let envelope = ResponseEnvelope::text("Hello, world!");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "Hello, world!"}]})
        );
    }

    #[test]
    fn test_error_envelope() {
        let envelope = ResponseEnvelope::error("Something went wrong");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "content": [{"type": "text", "text": "Something went wrong"}],
                "isError": true
            })
        );
    }

    #[test]
    fn test_with_structured_envelope() {
        let envelope = ResponseEnvelope::with_structured("Result", json!({"value": 42}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "content": [{"type": "text", "text": "Result"}],
                "structuredContent": {"value": 42}
            })
        );
    }

    #[test]
    fn test_to_envelope_string() {
        let envelope = to_envelope(json!("Hello, world!"));
        assert_eq!(envelope, ResponseEnvelope::text("Hello, world!"));
    }

    #[test]
    fn test_to_envelope_integer() {
        let envelope = to_envelope(json!(42));
        assert_eq!(envelope, ResponseEnvelope::text("42"));
    }

    #[test]
    fn test_to_envelope_float() {
        let envelope = to_envelope(json!(3.14159));
        assert_eq!(envelope, ResponseEnvelope::text("3.14159"));
    }

    #[test]
    fn test_to_envelope_boolean() {
        assert_eq!(to_envelope(json!(true)), ResponseEnvelope::text("true"));
        assert_eq!(to_envelope(json!(false)), ResponseEnvelope::text("false"));
    }

    #[test]
    fn test_to_envelope_object() {
        let data = json!({"name": "test", "value": 42});
        let envelope = to_envelope(data.clone());
        assert_eq!(
            envelope,
            ResponseEnvelope::with_structured(
                serde_json::to_string_pretty(&data).unwrap(),
                data
            )
        );
    }

    #[test]
    fn test_to_envelope_array() {
        let data = json!(["item1", "item2", "item3"]);
        let envelope = to_envelope(data.clone());
        assert_eq!(
            envelope,
            ResponseEnvelope::with_structured(
                serde_json::to_string_pretty(&data).unwrap(),
                data
            )
        );
    }

    #[test]
    fn test_to_envelope_null() {
        assert_eq!(to_envelope(Value::Null), ResponseEnvelope::text(""));
    }

    #[test]
    fn test_to_envelope_is_fixed_point_on_envelopes() {
        let envelope = ResponseEnvelope::with_structured("Result", json!({"value": 1}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(to_envelope(value), envelope);
    }

    #[test]
    fn test_to_envelope_wrapped_string() {
        let envelope = to_envelope(json!({"result": "hello"}));
        assert_eq!(
            envelope,
            ResponseEnvelope::with_structured("hello", json!({"result": "hello"}))
        );
    }

    #[test]
    fn test_to_envelope_wrapped_number() {
        let envelope = to_envelope(json!({"result": 7}));
        assert_eq!(
            envelope,
            ResponseEnvelope::with_structured("7", json!({"result": 7}))
        );
    }

    #[test]
    fn test_multi_key_object_with_result_is_not_wrapped() {
        let data = json!({"result": 7, "extra": true});
        let envelope = to_envelope(data.clone());
        assert_eq!(envelope.structured_content, Some(data));
        // Text is the pretty-printed object, not "7".
        assert!(envelope.first_text().unwrap().contains("extra"));
    }

    #[test]
    fn test_builder_simple_text() {
        let envelope = EnvelopeBuilder::new().text("Hello").build();
        assert_eq!(envelope, ResponseEnvelope::text("Hello"));
    }

    #[test]
    fn test_builder_rich_response() {
        let envelope = EnvelopeBuilder::new()
            .text("Process completed")
            .text("Details: ok")
            .with_structured(json!({"status": "success"}))
            .with_progress(90.0)
            .build();

        assert_eq!(envelope.content.len(), 2);
        assert_eq!(envelope.structured_content, Some(json!({"status": "success"})));
        assert_eq!(envelope.progress, Some(90.0));
        assert_eq!(envelope.is_error, None);
    }

    #[test]
    fn test_builder_progress_clamped() {
        let envelope = EnvelopeBuilder::new().with_progress(150.0).build();
        assert_eq!(envelope.progress, Some(100.0));

        let envelope = EnvelopeBuilder::new().with_progress(-5.0).build();
        assert_eq!(envelope.progress, Some(0.0));
    }

    #[test]
    fn test_builder_error_with_details() {
        let envelope = EnvelopeBuilder::new()
            .error("Something went wrong", Some(json!({"code": 500})))
            .build();

        assert!(envelope.is_error());
        assert_eq!(
            envelope.structured_content,
            Some(json!({"error_details": {"code": 500}}))
        );
    }

    #[test]
    fn test_builder_meta_merging() {
        let mut first = Map::new();
        first.insert("a".to_string(), json!(1));
        let mut second = Map::new();
        second.insert("b".to_string(), json!(2));

        let envelope = EnvelopeBuilder::new()
            .text("ok")
            .with_meta(first)
            .with_meta(second)
            .build();

        assert_eq!(envelope.meta, Some(json!({"a": 1, "b": 2})));
    }

    #[test]
    fn test_builder_image_and_audio() {
        let envelope = EnvelopeBuilder::new()
            .image("imgdata", "image/png")
            .audio("sounddata", "audio/wav")
            .resource(json!({"uri": "file:///x"}))
            .build();

        assert!(envelope.content[0].is_image());
        assert!(envelope.content[1].is_audio());
        assert!(envelope.content[2].is_resource());
    }
}
