//! Typed JSON HTTP client.
//!
//! Every call returns a [`FetchResult`]: `Success` with the decoded body and
//! the response headers, or `Failure` with an [`ErrorInfo`]. Transport
//! failures, HTTP error statuses and unreadable bodies are all reported the
//! same way, so callers branch on the result instead of handling errors.

pub mod client;
pub mod config;
pub mod errors;
pub mod net;

pub use client::{Client, NO_BODY};
pub use config::{CallOptions, ClientConfig, ClientConfigBuilder, ClientConfigError};
pub use errors::{ClientError, HeaderError};
pub use net::{ErrorInfo, FetchResult, HeaderInput, HeaderSet};
