//! MCP Tool SDK
//!
//! This crate turns ordinary Rust functions into remotely callable tools
//! exposed over a small request/response protocol (list-tools, call-tool).
//! Tools declare explicit signatures; the SDK infers JSON-Schema input and
//! output descriptors, validates and wraps return values into a canonical
//! envelope, and routes inbound requests to the right handler.
//!
//! # Architecture
//!
//! - **core**: Configuration, unified error handling, logging, and the
//!   optional HTTP transport (feature: `http`)
//! - **domains**: Business logic organized by bounded contexts
//!   - **schema**: Type descriptors and JSON-Schema generation
//!   - **tools**: Registration, normalization, envelopes, and dispatch
//!
//! # Example
//!
//! ```rust
//! use mcp_tool_sdk::{
//!     Dispatcher, Param, Request, Signature, Tool, ToolHandler, ToolRegistry, TypeTag,
//! };
//! use serde_json::{Value, json};
//!
//! # tokio_test::block_on(async {
//! let mut registry = ToolRegistry::new();
//! registry.register(
//!     Tool::new(
//!         "add",
//!         Signature::new([
//!             Param::required("a", TypeTag::Integer),
//!             Param::required("b", TypeTag::Integer),
//!         ])
//!         .returns(TypeTag::Integer),
//!         ToolHandler::sync(|args| {
//!             let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
//!             let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
//!             Ok(json!(a + b))
//!         }),
//!     )
//!     .description("Add two numbers"),
//! );
//!
//! let dispatcher = Dispatcher::new(registry);
//! let response = dispatcher
//!     .dispatch(Request::call("add", r#"{"a": 2, "b": 3}"#))
//!     .await;
//! assert_eq!(response.status, 200);
//! # });
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, Result, init_logging};
pub use crate::domains::schema::{
    Param, Signature, TypeTag, input_schema, output_schema, schema_for,
};
pub use crate::domains::tools::{
    ArgumentBag, ContentBlock, Dispatcher, EnvelopeBuilder, Request, Response, ResponseEnvelope,
    Tool, ToolDefinition, ToolDescriptor, ToolError, ToolHandler, ToolMetadata, ToolRegistry,
    to_envelope,
};

#[cfg(feature = "http")]
pub use crate::core::transport::{HttpConfig, HttpTransport};
