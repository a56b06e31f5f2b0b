//! Client and per-call configuration.
//!
//! [`ClientConfig`] is fixed once a [`Client`](crate::Client) is built: the
//! base URL and the default headers never change afterwards. Per-call header
//! overrides live in [`CallOptions`] and are dropped after the call.
//!
//! # Examples
//!
//! ```rust
//! use typed_fetch::ClientConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ClientConfig::builder()
//!     .url("https://api.example.com/v1")
//!     .header("Authorization", "Bearer token")
//!     .build()?; // returns Result<ClientConfig, ClientConfigError>
//! assert_eq!(cfg.url.as_deref(), Some("https://api.example.com/v1"));
//! # Ok(()) }
//! ```
//!
//! # Errors
//!
//! Builder validation returns [`ClientConfigError`] if the base URL is not an
//! absolute URL with a host.

use url::Url;

use crate::errors::ClientError;
use crate::net::HeaderInput;
use crate::Client;

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Base URL every relative path is appended to.
    pub url: Option<String>,
    /// Headers sent with every call, merged over `Content-Type: application/json`.
    pub headers: Option<HeaderInput>,
    /// Preconfigured transport (timeouts, proxies, TLS). A default one is
    /// created when `None`.
    pub http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    inner: ClientConfig,
    pairs: Vec<(String, String)>,
}

impl ClientConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut ClientConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn url<S: Into<String>>(self, url: S) -> Self { self.map(|c| c.url = Some(url.into())) }
    pub fn headers<H: Into<HeaderInput>>(self, headers: H) -> Self { self.map(|c| c.headers = Some(headers.into())) }
    pub fn http_client(self, client: reqwest::Client) -> Self { self.map(|c| c.http_client = Some(client)) }

    /// Add a single default header. Applied after anything given to [`headers`](Self::headers).
    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// Validate and build the final config.
    pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
        let mut cfg = self.inner;
        validate(&cfg)?;

        if !self.pairs.is_empty() {
            cfg.headers = Some(match cfg.headers.take() {
                None => HeaderInput::Pairs(self.pairs),
                Some(headers) => {
                    let mut pairs = pairs_of(headers);
                    pairs.extend(self.pairs);
                    HeaderInput::Pairs(pairs)
                }
            });
        }

        Ok(cfg)
    }

    /// Build the config and construct a [`Client`] from it.
    pub fn connect(self) -> Result<Client, ClientError> {
        Client::new(self.build()?)
    }
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Headers overriding the client defaults for this call only.
    pub headers: Option<HeaderInput>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers<H: Into<HeaderInput>>(mut self, headers: H) -> Self {
        self.headers = Some(headers.into());
        self
    }
}

impl From<HeaderInput> for CallOptions {
    fn from(headers: HeaderInput) -> Self {
        Self { headers: Some(headers) }
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientConfigError {
    #[error("base url {url:?} is not valid: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("base url {0:?} must be absolute")]
    RelativeUrl(String),
}

pub(crate) fn validate(c: &ClientConfig) -> Result<(), ClientConfigError> {
    if let Some(url) = &c.url {
        let parsed = Url::parse(url).map_err(|e| ClientConfigError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        if !parsed.has_host() {
            return Err(ClientConfigError::RelativeUrl(url.clone()));
        }
    }
    Ok(())
}

fn pairs_of(headers: HeaderInput) -> Vec<(String, String)> {
    match headers {
        HeaderInput::Pairs(pairs) => pairs,
        HeaderInput::Record(record) => record.into_iter().collect(),
        HeaderInput::Headers(map) => crate::net::header_set(&map).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let cfg = ClientConfig::default();
        assert!(cfg.url.is_none());
        assert!(cfg.headers.is_none());
        assert!(cfg.http_client.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let cfg = ClientConfig::builder()
            .url("http://localhost:8080")
            .headers([("x-a", "1")])
            .build()
            .unwrap();

        assert_eq!(cfg.url.as_deref(), Some("http://localhost:8080"));
        assert!(matches!(cfg.headers, Some(HeaderInput::Pairs(ref p)) if p.len() == 1));
    }

    #[test]
    fn single_headers_are_applied_after_bulk_headers() {
        let cfg = ClientConfig::builder()
            .headers([("x-a", "1"), ("x-b", "1")])
            .header("x-a", "2")
            .build()
            .unwrap();

        let map = cfg.headers.unwrap().into_header_map().unwrap();
        assert_eq!(map["x-a"], "2");
        assert_eq!(map["x-b"], "1");
    }

    #[test]
    fn garbage_url_is_rejected() {
        let err = ClientConfig::builder().url("not a url").build().unwrap_err();
        assert!(matches!(err, ClientConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn url_without_host_is_rejected() {
        let err = ClientConfig::builder().url("mailto:someone").build().unwrap_err();
        assert_eq!(err, ClientConfigError::RelativeUrl("mailto:someone".to_string()));
    }

    #[test]
    fn call_options_carry_headers() {
        let opts = CallOptions::new().headers(vec![("x-trace", "on")]);
        assert!(opts.headers.is_some());
        assert!(CallOptions::default().headers.is_none());
    }
}
