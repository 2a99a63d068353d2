//! Tool-specific error types.

use http::StatusCode;
use thiserror::Error;

/// Errors that can occur while handling a single tool request.
///
/// Every variant is caught at the dispatcher boundary and converted into a
/// response envelope; none escape to the hosting layer.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool '{0}' not found")]
    NotFound(String),

    /// The request used an unsupported method/path combination.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The tool's output did not match its declared schema.
    ///
    /// Display is the bare message so the dispatcher can compose the
    /// user-visible `Tool execution failed: ...` text around it.
    #[error("{0}")]
    Validation(String),

    /// The wrapped function failed, or the request body could not be parsed.
    #[error("{0}")]
    Execution(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new execution error.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// The protocol status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Validation(_) | Self::Execution(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ToolError::not_found("unknown");
        assert_eq!(err.to_string(), "Tool 'unknown' not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_display_is_bare_message() {
        let err = ToolError::validation("Expected integer, got string");
        assert_eq!(err.to_string(), "Expected integer, got string");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_method_not_allowed_status() {
        assert_eq!(
            ToolError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
