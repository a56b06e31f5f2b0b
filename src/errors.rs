use crate::config::ClientConfigError;

/// Errors raised while turning caller supplied headers into a `HeaderMap`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("Invalid header name: {0:?}")]
    InvalidName(String),

    #[error("Invalid value for header {name:?}")]
    InvalidValue { name: String },
}

/// Errors that can occur while constructing a [`Client`](crate::Client).
///
/// Calls themselves never fail with this type; they always return a
/// [`FetchResult`](crate::FetchResult).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid client configuration: {0}")]
    Config(#[from] ClientConfigError),

    #[error("Invalid default headers: {0}")]
    Headers(#[from] HeaderError),

    #[error("Cannot build HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),
}
