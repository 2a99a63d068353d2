//! Content block types for tool responses.
//!
//! A response envelope carries one or more content blocks. Blocks are a
//! closed tagged variant serialized with a `type` discriminator, matching
//! the wire shape expected by protocol clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single block of response content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Human-readable text.
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        annotations: Option<Value>,
    },

    /// Base64-encoded image data.
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        annotations: Option<Value>,
    },

    /// Base64-encoded audio data.
    Audio {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        annotations: Option<Value>,
    },

    /// An embedded resource reference.
    Resource {
        resource: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        annotations: Option<Value>,
    },
}

impl ContentBlock {
    /// Create a text content block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            annotations: None,
        }
    }

    /// Create an image content block.
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Image {
            data: data.into(),
            mime_type: mime_type.into(),
            annotations: None,
        }
    }

    /// Create an audio content block.
    pub fn audio(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Audio {
            data: data.into(),
            mime_type: mime_type.into(),
            annotations: None,
        }
    }

    /// Create a resource content block.
    pub fn resource(resource: Value) -> Self {
        Self::Resource {
            resource,
            annotations: None,
        }
    }

    /// Attach annotations to this block.
    pub fn with_annotations(mut self, value: Value) -> Self {
        let slot = match &mut self {
            Self::Text { annotations, .. }
            | Self::Image { annotations, .. }
            | Self::Audio { annotations, .. }
            | Self::Resource { annotations, .. } => annotations,
        };
        *slot = Some(value);
        self
    }

    /// Check if this block is text content.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Check if this block is image content.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    /// Check if this block is audio content.
    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio { .. })
    }

    /// Check if this block is resource content.
    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource { .. })
    }

    /// The text of this block, if it is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_serialization() {
        let block = ContentBlock::text("Hello");
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value, json!({"type": "text", "text": "Hello"}));
    }

    #[test]
    fn test_text_with_annotations() {
        let block = ContentBlock::text("Hello").with_annotations(json!({"priority": 0.8}));
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({"type": "text", "text": "Hello", "annotations": {"priority": 0.8}})
        );
    }

    #[test]
    fn test_image_serialization() {
        let block = ContentBlock::image("base64data", "image/png");
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({"type": "image", "data": "base64data", "mimeType": "image/png"})
        );
    }

    #[test]
    fn test_audio_serialization() {
        let block = ContentBlock::audio("base64data", "audio/wav");
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({"type": "audio", "data": "base64data", "mimeType": "audio/wav"})
        );
    }

    #[test]
    fn test_resource_serialization() {
        let block = ContentBlock::resource(json!({"uri": "file:///example.txt"}));
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({"type": "resource", "resource": {"uri": "file:///example.txt"}})
        );
    }

    #[test]
    fn test_type_predicates() {
        let text = ContentBlock::text("Hello");
        let image = ContentBlock::image("...", "image/png");

        assert!(text.is_text());
        assert!(!text.is_image());
        assert!(image.is_image());
        assert!(!image.is_text());
        assert!(ContentBlock::audio("...", "audio/wav").is_audio());
        assert!(ContentBlock::resource(json!({})).is_resource());
    }

    #[test]
    fn test_deserialization_round_trip() {
        let value = json!({"type": "text", "text": "Hi"});
        let block: ContentBlock = serde_json::from_value(value).unwrap();
        assert_eq!(block, ContentBlock::text("Hi"));
    }
}
