//! Tool Registry - central registration table for all tools.
//!
//! This module provides:
//! - Tool descriptors binding a name, schemas, and a handler
//! - Registration from explicit signatures (schemas inferred) or from
//!   declarative definitions (schemas supplied)
//! - An insertion-ordered registry used by the dispatcher

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::core::error::{Error, Result};
use crate::domains::schema::{Signature, input_schema, output_schema};

use super::error::ToolError;
use super::normalize::normalize_output;
use super::response::{ResponseEnvelope, to_envelope};

/// The named-argument bag handlers are invoked with, produced by parsing a
/// request body as a JSON object.
pub type ArgumentBag = Map<String, Value>;

type SyncToolFn = dyn Fn(ArgumentBag) -> anyhow::Result<Value> + Send + Sync;
type AsyncToolFn = dyn Fn(ArgumentBag) -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync;

// ============================================================================
// Handlers
// ============================================================================

/// A tool's underlying function.
///
/// Handlers are polymorphic over synchronous and asynchronous execution. The
/// dispatcher's only suspension point is the await on an [`ToolHandler::Async`]
/// arm's future; everything else in a request's lifecycle runs synchronously.
#[derive(Clone)]
pub enum ToolHandler {
    /// A synchronous function, run inline.
    Sync(Arc<SyncToolFn>),

    /// An asynchronous function, awaited by the dispatcher.
    Async(Arc<AsyncToolFn>),
}

impl ToolHandler {
    /// Wrap a synchronous function.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(ArgumentBag) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    /// Wrap an asynchronous function.
    pub fn async_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(ArgumentBag) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Self::Async(Arc::new(move |args| Box::pin(f(args))))
    }

    /// Invoke the underlying function.
    async fn call(&self, args: ArgumentBag) -> anyhow::Result<Value> {
        match self {
            Self::Sync(f) => f(args),
            Self::Async(f) => f(args).await,
        }
    }
}

impl fmt::Debug for ToolHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("ToolHandler::Sync"),
            Self::Async(_) => f.write_str("ToolHandler::Async"),
        }
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// One registered tool: metadata, schemas, and the bound handler.
///
/// Created once at registration and immutable afterwards; descriptors live
/// for the process lifetime and there is no deletion path.
#[derive(Debug)]
pub struct ToolDescriptor {
    /// Unique tool name (registry key).
    pub name: String,

    /// Optional human-readable title.
    pub title: Option<String>,

    /// Human-readable description, empty when none was supplied.
    pub description: String,

    /// JSON Schema for the tool's input, always `"type": "object"`.
    pub input_schema: Value,

    /// JSON Schema for the declared return type, if any.
    pub output_schema: Option<Value>,

    /// Free-form behavior hints, passed through unchanged.
    pub annotations: Option<Value>,

    /// Free-form metadata, passed through unchanged.
    pub meta: Option<Value>,

    handler: ToolHandler,
}

impl ToolDescriptor {
    /// Execute the bound handler with the given argument bag.
    ///
    /// Runs the underlying function, validates/wraps the raw result against
    /// the declared output schema, and converts it into the canonical
    /// envelope. All failures come back as [`ToolError`] values; nothing
    /// escapes past the caller.
    pub async fn invoke(&self, args: ArgumentBag) -> std::result::Result<ResponseEnvelope, ToolError> {
        let raw = self
            .handler
            .call(args)
            .await
            .map_err(|e| ToolError::execution(e.to_string()))?;

        let normalized = normalize_output(raw, self.output_schema.as_ref())?;
        Ok(to_envelope(normalized))
    }

    /// The listing entry for this tool, with absent optional fields omitted.
    pub fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: self.name.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            input_schema: self.input_schema.clone(),
            output_schema: self.output_schema.clone(),
            annotations: self.annotations.clone(),
            meta: self.meta.clone(),
        }
    }
}

/// Tool metadata as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolMetadata {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub description: String,

    #[serde(rename = "inputSchema")]
    pub input_schema: Value,

    #[serde(rename = "outputSchema", skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Value>,

    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

// ============================================================================
// Registration forms
// ============================================================================

/// A tool registered from an explicit signature; schemas are inferred.
///
/// # Example
///
/// ```
/// use mcp_tool_sdk::{Param, Signature, Tool, ToolHandler, ToolRegistry, TypeTag};
/// use serde_json::{Value, json};
///
/// let mut registry = ToolRegistry::new();
/// registry.register(
///     Tool::new(
///         "add",
///         Signature::new([
///             Param::required("a", TypeTag::Integer),
///             Param::required("b", TypeTag::Integer),
///         ])
///         .returns(TypeTag::Integer),
///         ToolHandler::sync(|args| {
///             let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
///             let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
///             Ok(json!(a + b))
///         }),
///     )
///     .description("Add two numbers"),
/// );
/// ```
pub struct Tool {
    name: String,
    description: Option<String>,
    annotations: Option<Value>,
    signature: Signature,
    handler: ToolHandler,
}

impl Tool {
    /// Create a tool from its name, signature, and handler.
    pub fn new(name: impl Into<String>, signature: Signature, handler: ToolHandler) -> Self {
        Self {
            name: name.into(),
            description: None,
            annotations: None,
            signature,
            handler,
        }
    }

    /// Set the tool description (defaults to empty).
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach behavior annotations, passed through to clients unchanged.
    pub fn annotations(mut self, annotations: Value) -> Self {
        self.annotations = Some(annotations);
        self
    }

    fn into_descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            input_schema: input_schema(&self.signature),
            output_schema: output_schema(&self.signature),
            name: self.name,
            title: None,
            description: self.description.unwrap_or_default(),
            annotations: self.annotations,
            meta: None,
            handler: self.handler,
        }
    }
}

/// A declarative tool definition, registered under a key whose camelCase
/// form becomes the tool name unless `name` is set explicitly.
pub struct ToolDefinition {
    /// Explicit name override; takes precedence over the derived name.
    pub name: Option<String>,

    /// Optional human-readable title.
    pub title: Option<String>,

    /// Tool description.
    pub description: String,

    /// Input schema; defaults to `{"type": "object"}` when absent.
    pub input_schema: Option<Value>,

    /// Optional output schema for result validation.
    pub output_schema: Option<Value>,

    /// Optional behavior annotations.
    pub annotations: Option<Value>,

    /// Optional metadata.
    pub meta: Option<Value>,

    /// The tool handler.
    pub handler: ToolHandler,
}

impl ToolDefinition {
    /// Create a definition with the given description and handler.
    pub fn new(description: impl Into<String>, handler: ToolHandler) -> Self {
        Self {
            name: None,
            title: None,
            description: description.into(),
            input_schema: None,
            output_schema: None,
            annotations: None,
            meta: None,
            handler,
        }
    }

    /// Override the tool name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the input schema.
    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }

    /// Set the output schema.
    pub fn with_output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    /// Set behavior annotations.
    pub fn with_annotations(mut self, annotations: Value) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set metadata.
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Insertion-ordered, name-keyed table of tool descriptors.
///
/// Names are unique at any instant; re-registering a name replaces the
/// descriptor in place, keeping its original listing position. Iteration
/// order for metadata listing equals registration order. The registry is
/// built once at startup and read-only afterwards, so it may be shared
/// across concurrent requests without locking.
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool from an explicit signature.
    ///
    /// Infers the input schema from the parameter list and the output schema
    /// from the return type (if declared), then inserts the descriptor.
    pub fn register(&mut self, tool: Tool) {
        self.insert(tool.into_descriptor());
    }

    /// Register a tool from a declarative definition.
    ///
    /// The effective name is the definition's explicit `name`, or the
    /// snake_case form of `key`. Malformed definitions are registration-time
    /// errors and abort startup; they are never converted into request-time
    /// error envelopes.
    pub fn register_definition(&mut self, key: &str, definition: ToolDefinition) -> Result<()> {
        if let Some(schema) = &definition.input_schema {
            if !schema.is_object() {
                return Err(Error::config(format!(
                    "tool '{}': inputSchema must be a JSON object",
                    key
                )));
            }
        }
        if let Some(schema) = &definition.output_schema {
            if !schema.is_object() {
                return Err(Error::config(format!(
                    "tool '{}': outputSchema must be a JSON object",
                    key
                )));
            }
        }

        let name = definition
            .name
            .unwrap_or_else(|| camel_to_snake(key));

        self.insert(ToolDescriptor {
            name,
            title: definition.title,
            description: definition.description,
            input_schema: definition
                .input_schema
                .unwrap_or_else(|| json!({ "type": "object" })),
            output_schema: definition.output_schema,
            annotations: definition.annotations,
            meta: definition.meta,
            handler: definition.handler,
        });

        Ok(())
    }

    fn insert(&mut self, descriptor: ToolDescriptor) {
        info!("Registered tool: {}", descriptor.name);

        match self.index.get(&descriptor.name) {
            Some(&position) => {
                // Last write wins, keeping the original listing position.
                self.tools[position] = descriptor;
            }
            None => {
                self.index
                    .insert(descriptor.name.clone(), self.tools.len());
                self.tools.push(descriptor);
            }
        }
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    /// Metadata for every registered tool, in registration order.
    pub fn list(&self) -> Vec<ToolMetadata> {
        self.tools.iter().map(ToolDescriptor::metadata).collect()
    }

    /// All tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert camelCase to snake_case: insert `_` before every non-initial
/// uppercase letter, then lowercase the whole string.
pub fn camel_to_snake(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(ch.to_lowercase());
    }
    result
}
