//! The public client.
//!
//! A [`Client`] owns an immutable base URL, an immutable set of default
//! headers and a `reqwest` transport. Every call merges the per-call header
//! overrides over the defaults, executes one request and returns a
//! [`FetchResult`]. Calls never return `Err` and never panic.
//!
//! ```no_run
//! # async fn run() -> Result<(), typed_fetch::ClientError> {
//! use serde_json::Value;
//! use typed_fetch::{CallOptions, Client, FetchResult, NO_BODY};
//!
//! let client = Client::builder()
//!     .url("https://api.example.com")
//!     .header("Authorization", "Bearer token")
//!     .connect()?;
//!
//! let opts = CallOptions::new().headers([("x-request-id", "42")]);
//! match client.post::<Value, _>("/jobs", NO_BODY, Some(opts)).await {
//!     FetchResult::Success { data, .. } => println!("{data}"),
//!     FetchResult::Failure { error, .. } => eprintln!("{error}"),
//! }
//! # Ok(()) }
//! ```
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{self, CallOptions, ClientConfig, ClientConfigBuilder};
use crate::errors::ClientError;
use crate::net::fetch::{execute, resolve_url};
use crate::net::{merge_headers, ErrorInfo, FetchResult};

/// Typed `None` for calls without a request body.
pub const NO_BODY: Option<&()> = None;

/// JSON HTTP client returning [`FetchResult`] for every call.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Option<String>,
    default_headers: HeaderMap,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client.
    ///
    /// The default headers are seeded with `Content-Type: application/json`
    /// and the configured headers are merged over that seed.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config::validate(&config)?;

        let mut seed = HeaderMap::new();
        seed.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let default_headers = merge_headers(&seed, config.headers)?;

        let http = match config.http_client {
            Some(http) => http,
            None => reqwest::Client::builder().build()?,
        };

        Ok(Self {
            base_url: config.url,
            default_headers,
            http,
        })
    }

    /// Start building a client configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfig::builder()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    pub async fn get<T>(&self, path: &str, options: Option<CallOptions>) -> FetchResult<T>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, path, NO_BODY, options).await
    }

    pub async fn post<T, B>(&self, path: &str, body: Option<&B>, options: Option<CallOptions>) -> FetchResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, body, options).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B, options: Option<CallOptions>) -> FetchResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body), options).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B, options: Option<CallOptions>) -> FetchResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body), options).await
    }

    pub async fn delete<T, B>(&self, path: &str, body: Option<&B>, options: Option<CallOptions>) -> FetchResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::DELETE, path, body, options).await
    }

    /// Issue a single request with an arbitrary method.
    ///
    /// `path` is appended verbatim to the base URL unless it is already an
    /// absolute URL.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: Option<CallOptions>,
    ) -> FetchResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = resolve_url(self.base_url.as_deref(), path);

        let overrides = options.and_then(|o| o.headers);
        let headers = match merge_headers(&self.default_headers, overrides) {
            Ok(headers) => headers,
            Err(e) => {
                log::warn!("{method} {url}: {e}");
                return FetchResult::failure(ErrorInfo::application(e.to_string(), None), None);
            }
        };

        execute(&self.http, method, &url, headers, body).await
    }
}
