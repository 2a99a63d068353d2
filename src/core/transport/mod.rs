//! Transport layer.
//!
//! The core registry/dispatch layer is transport-free: hosts hand
//! [`Request`](crate::Request) values to a [`Dispatcher`](crate::Dispatcher)
//! and forward the resulting [`Response`](crate::Response) bytes however
//! they like. This module provides an optional HTTP adapter (feature:
//! `http`) that serves the protocol over a real socket with axum.

mod config;
mod error;
pub mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use self::http::HttpTransport;
