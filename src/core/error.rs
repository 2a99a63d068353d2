//! Error types and handling for the SDK.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, providing consistent error
//! handling across the entire crate.

use thiserror::Error;

/// A specialized Result type for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the SDK.
///
/// Request-time errors (`Tool`) are always caught at the dispatcher boundary
/// and converted to response envelopes. Registration-time errors (`Config`)
/// are deliberately left to propagate: the registry is expected to be static
/// and correct before serving traffic.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the transport layer.
    #[cfg(feature = "http")]
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),

    /// Configuration or registration errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
