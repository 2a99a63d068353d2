//! Request dispatcher.
//!
//! Routes an inbound method+path request to either the tool-metadata listing
//! (`GET /`) or a tool invocation (`POST /{name}`), and maps handler
//! success/failure into protocol responses. Every error raised while
//! handling a request is converted into a response here; none escape to the
//! hosting layer.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::error::ToolError;
use super::registry::{ArgumentBag, ToolRegistry};
use super::response::ResponseEnvelope;

/// An inbound request at the dispatch boundary.
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method.
    pub method: Method,

    /// Request path, e.g. `/` or `/echo`.
    pub path: String,

    /// Raw request body; empty means no arguments.
    pub body: Bytes,
}

impl Request {
    /// A `GET` request for the tool listing.
    pub fn list() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            body: Bytes::new(),
        }
    }

    /// A `POST` request invoking `name` with the given JSON body.
    pub fn call(name: &str, body: impl Into<Bytes>) -> Self {
        Self {
            method: Method::POST,
            path: format!("/{}", name),
            body: body.into(),
        }
    }
}

/// An outbound response at the dispatch boundary.
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code.
    pub status: StatusCode,

    /// Response headers; always carries `content-type: application/json`.
    pub headers: HeaderMap,

    /// UTF-8 JSON body.
    pub body: Bytes,
}

impl Response {
    /// Build a JSON response with the given status.
    fn json<T: serde::Serialize>(status: StatusCode, payload: &T) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            status,
            headers,
            body: Bytes::from(serde_json::to_vec(payload).unwrap_or_default()),
        }
    }

    /// Parse the body back into a JSON value (test and client convenience).
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_slice(&self.body)
    }
}

/// Routes requests against a frozen tool registry.
///
/// The registry is frozen behind an `Arc` at construction; it is never
/// mutated afterwards, so a dispatcher may serve concurrent requests without
/// locking. The only suspension point during a request is the await on an
/// asynchronous handler's completion.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher over a fully built registry.
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The registry this dispatcher serves.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one request, producing exactly one response.
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn dispatch(&self, request: Request) -> Response {
        if request.method == Method::GET && (request.path == "/" || request.path.is_empty()) {
            info!("Listing {} tools", self.registry.len());
            return Response::json(StatusCode::OK, &self.registry.list());
        }

        if request.method == Method::POST {
            let name = request.path.trim_start_matches('/');
            return self.call_tool(name, &request.body).await;
        }

        warn!("Method not allowed: {} {}", request.method, request.path);
        let mut response = Response::json(
            StatusCode::METHOD_NOT_ALLOWED,
            &json!({
                "error": {
                    "code": -32601,
                    "message": "Method not allowed"
                }
            }),
        );
        response
            .headers
            .insert(ALLOW, HeaderValue::from_static("GET, POST"));
        response
    }

    /// Execute the named tool with the request body as its argument bag.
    async fn call_tool(&self, name: &str, body: &Bytes) -> Response {
        let Some(tool) = self.registry.get(name) else {
            warn!("Unknown tool requested: {}", name);
            let err = ToolError::not_found(name);
            return Response::json(err.status(), &ResponseEnvelope::error(err.to_string()));
        };

        let args = match parse_arguments(body) {
            Ok(args) => args,
            Err(err) => return execution_failure(&err),
        };

        match tool.invoke(args).await {
            Ok(envelope) => Response::json(StatusCode::OK, &envelope),
            Err(err) => execution_failure(&err),
        }
    }
}

/// Parse a request body into a named-argument bag. An empty body is an empty
/// bag; anything that is not a JSON object is an execution error.
fn parse_arguments(body: &Bytes) -> Result<ArgumentBag, ToolError> {
    if body.is_empty() {
        return Ok(ArgumentBag::new());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ToolError::execution(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ToolError::execution(format!(
            "expected a JSON object of arguments, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A failure during body parsing, execution, validation, or normalization.
fn execution_failure(err: &ToolError) -> Response {
    warn!("Tool execution failed: {}", err);
    Response::json(
        err.status(),
        &ResponseEnvelope::error(format!("Tool execution failed: {}", err)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::schema::{Param, Signature, TypeTag};
    use crate::domains::tools::registry::{Tool, ToolDefinition, ToolHandler};
    use serde_json::json;

    fn test_dispatcher() -> Dispatcher {
        let mut registry = ToolRegistry::new();

        registry.register(
            Tool::new(
                "echo",
                Signature::new([Param::required("message", TypeTag::String)])
                    .returns(TypeTag::String),
                ToolHandler::sync(|args| {
                    let message = args.get("message").and_then(Value::as_str).unwrap_or_default();
                    Ok(json!(format!("Echo: {}", message)))
                }),
            )
            .description("Echo the input"),
        );

        registry.register(
            Tool::new(
                "add",
                Signature::new([
                    Param::required("a", TypeTag::Integer),
                    Param::required("b", TypeTag::Integer),
                ])
                .returns(TypeTag::Integer),
                ToolHandler::sync(|args| {
                    let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
                    let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
                    Ok(json!(a + b))
                }),
            )
            .description("Add two numbers"),
        );

        registry.register(Tool::new(
            "fail",
            Signature::default(),
            ToolHandler::sync(|_| anyhow::bail!("Test error")),
        ));

        registry.register(Tool::new(
            "profile",
            Signature::new([Param::required("name", TypeTag::String)]).returns(TypeTag::Map),
            ToolHandler::async_fn(|args| async move {
                let name = args.get("name").and_then(Value::as_str).unwrap_or_default().to_string();
                Ok(json!({"name": name, "status": "active"}))
            }),
        ));

        Dispatcher::new(registry)
    }

    #[tokio::test]
    async fn test_get_root_lists_tools() {
        let dispatcher = test_dispatcher();
        let response = dispatcher.dispatch(Request::list()).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let metadata = response.body_json().unwrap();
        let names: Vec<_> = metadata
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["echo", "add", "fail", "profile"]);
        assert_eq!(metadata[0]["description"], "Echo the input");
        assert!(metadata[0].get("inputSchema").is_some());
    }

    #[tokio::test]
    async fn test_get_empty_path_lists_tools() {
        let dispatcher = test_dispatcher();
        let response = dispatcher
            .dispatch(Request {
                method: Method::GET,
                path: String::new(),
                body: Bytes::new(),
            })
            .await;

        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_post_executes_tool() {
        let dispatcher = test_dispatcher();
        let response = dispatcher
            .dispatch(Request::call("echo", r#"{"message": "Hello"}"#))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.body_json().unwrap();
        assert_eq!(body["content"][0]["text"], "Echo: Hello");
    }

    #[tokio::test]
    async fn test_integer_round_trip() {
        let dispatcher = test_dispatcher();
        let response = dispatcher
            .dispatch(Request::call("add", r#"{"a": 2, "b": 3}"#))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.body_json().unwrap();
        assert_eq!(body["content"][0]["text"], "5");
        assert!(body.get("structuredContent").is_none());
    }

    #[tokio::test]
    async fn test_async_handler_structured_round_trip() {
        let dispatcher = test_dispatcher();
        let response = dispatcher
            .dispatch(Request::call("profile", r#"{"name": "Alice"}"#))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.body_json().unwrap();
        assert_eq!(
            body["structuredContent"],
            json!({"name": "Alice", "status": "active"})
        );
        let expected_text =
            serde_json::to_string_pretty(&json!({"name": "Alice", "status": "active"})).unwrap();
        assert_eq!(body["content"][0]["text"], expected_text);
    }

    #[tokio::test]
    async fn test_unknown_tool_returns_404() {
        let dispatcher = test_dispatcher();
        let response = dispatcher.dispatch(Request::call("unknown", "{}")).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        let body = response.body_json().unwrap();
        assert_eq!(body["content"][0]["text"], "Tool 'unknown' not found");
        assert_eq!(body["isError"], true);
    }

    #[tokio::test]
    async fn test_failing_handler_returns_400() {
        let dispatcher = test_dispatcher();
        let response = dispatcher.dispatch(Request::call("fail", "{}")).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let body = response.body_json().unwrap();
        let text = body["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Tool execution failed: "));
        assert!(text.contains("Test error"));
        assert_eq!(body["isError"], true);
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400() {
        let dispatcher = test_dispatcher();
        let response = dispatcher.dispatch(Request::call("echo", "{not json")).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let body = response.body_json().unwrap();
        assert!(
            body["content"][0]["text"]
                .as_str()
                .unwrap()
                .starts_with("Tool execution failed: ")
        );
    }

    #[tokio::test]
    async fn test_non_object_body_returns_400() {
        let dispatcher = test_dispatcher();
        let response = dispatcher.dispatch(Request::call("echo", "[1, 2]")).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_body_treated_as_empty_bag() {
        let dispatcher = test_dispatcher();
        let response = dispatcher.dispatch(Request::call("echo", "")).await;

        // Missing "message" means the handler sees an empty default.
        assert_eq!(response.status, StatusCode::OK);
        let body = response.body_json().unwrap();
        assert_eq!(body["content"][0]["text"], "Echo: ");
    }

    #[tokio::test]
    async fn test_delete_returns_405_with_allow_header() {
        let dispatcher = test_dispatcher();
        let response = dispatcher
            .dispatch(Request {
                method: Method::DELETE,
                path: "/".to_string(),
                body: Bytes::new(),
            })
            .await;

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers.get(ALLOW).unwrap(), "GET, POST");
        let body = response.body_json().unwrap();
        assert_eq!(body["error"]["code"], -32601);
        assert_eq!(body["error"]["message"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_get_non_root_path_returns_405() {
        let dispatcher = test_dispatcher();
        let response = dispatcher
            .dispatch(Request {
                method: Method::GET,
                path: "/echo".to_string(),
                body: Bytes::new(),
            })
            .await;

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_listing_empty_registry() {
        let dispatcher = Dispatcher::new(ToolRegistry::new());
        let response = dispatcher.dispatch(Request::list()).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body_json().unwrap(), json!([]));
    }

    #[tokio::test]
    async fn test_declarative_tool_dispatch() {
        let mut registry = ToolRegistry::new();
        registry
            .register_definition(
                "wordCount",
                ToolDefinition::new(
                    "Count words in text",
                    ToolHandler::sync(|args| {
                        let text = args.get("text").and_then(Value::as_str).unwrap_or_default();
                        Ok(json!({"result": text.split_whitespace().count()}))
                    }),
                )
                .with_input_schema(json!({
                    "type": "object",
                    "properties": {"text": {"type": "string"}},
                    "required": ["text"]
                })),
            )
            .unwrap();

        let dispatcher = Dispatcher::new(registry);
        let response = dispatcher
            .dispatch(Request::call("word_count", r#"{"text": "one two three"}"#))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.body_json().unwrap();
        assert_eq!(body["content"][0]["text"], "3");
        assert_eq!(body["structuredContent"], json!({"result": 3}));
    }
}
