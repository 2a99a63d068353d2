//! Tools domain module.
//!
//! This module handles the full lifecycle of a tool: registration (with
//! schema inference), output normalization, envelope building, and request
//! dispatch.
//!
//! ## Architecture
//!
//! - `registry.rs` - Descriptors, registration forms, and the ordered registry
//! - `dispatch.rs` - Method+path routing and request execution
//! - `normalize.rs` - Output validation and primitive wrapping
//! - `response.rs` - Response envelopes and the fluent builder
//! - `content.rs` - Content block variants
//! - `error.rs` - Tool-specific error types
//!
//! ## Registering a Tool
//!
//! 1. Describe the function's parameters with [`Signature`](crate::Signature)
//! 2. Wrap the function in a [`ToolHandler`] (sync or async)
//! 3. `registry.register(Tool::new(name, signature, handler))`
//! 4. Hand the finished registry to a [`Dispatcher`]

mod content;
mod dispatch;
mod error;
mod normalize;
pub mod registry;
mod response;

pub use content::ContentBlock;
pub use dispatch::{Dispatcher, Request, Response};
pub use error::ToolError;
pub use normalize::normalize_output;
pub use registry::{
    ArgumentBag, Tool, ToolDefinition, ToolDescriptor, ToolHandler, ToolMetadata, ToolRegistry,
    camel_to_snake,
};
pub use response::{EnvelopeBuilder, ResponseEnvelope, to_envelope};
