//! HTTP transport implementation.
//!
//! Serves the tool protocol over a real socket: `GET /` returns the tool
//! listing, `POST /{name}` invokes a tool, and everything else is answered
//! with 405 by the dispatcher. The transport only converts between axum
//! requests/responses and the dispatch boundary types; all protocol logic
//! lives in [`Dispatcher`].

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::domains::tools::{Dispatcher, Request};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Create from the top-level [`Config`](crate::Config).
    pub fn from_config(config: &crate::core::Config) -> Self {
        Self::new(config.transport.clone())
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport until the process is stopped.
    pub async fn run(self, dispatcher: Dispatcher) -> TransportResult<()> {
        let addr = self.address();
        let app = router(dispatcher, self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Listing:  GET /");
        info!("  → Invoke:   POST /{{name}}");
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the protocol router around a dispatcher.
///
/// The dispatcher handles routing itself, so every path except `/health`
/// falls through to it.
pub fn router(dispatcher: Dispatcher, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .fallback(handle_protocol)
        .with_state(dispatcher);

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Convert the axum request to the dispatch boundary shape and back.
async fn handle_protocol(
    State(dispatcher): State<Dispatcher>,
    request: axum::extract::Request,
) -> axum::response::Response {
    let (parts, body) = request.into_parts();

    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    let response = dispatcher
        .dispatch(Request {
            method: parts.method,
            path: parts.uri.path().to_string(),
            body,
        })
        .await;

    let mut out = axum::response::Response::new(Body::from(response.body));
    *out.status_mut() = response.status;
    *out.headers_mut() = response.headers;
    out
}
