//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the SDK,
//! including error handling, configuration, logging, and the optional
//! transport layer.

pub mod config;
pub mod error;
pub mod logging;

#[cfg(feature = "http")]
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;

#[cfg(feature = "http")]
pub use transport::{HttpConfig, HttpTransport};
