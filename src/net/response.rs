//! Uniform call result.
//!
//! Every call returns a [`FetchResult`]: either the decoded body together with
//! the response headers, or an [`ErrorInfo`] describing what went wrong.
//!
//! ## Notes
//! - `Failure::headers` is `None` only when no HTTP response was received
//!   (transport failure, or the request could not be prepared).
//! - `ErrorInfo::status_code` follows the same rule: `None` means there was no
//!   response at all.
use std::collections::HashMap;

use serde::Serialize;

/// Flat header mapping with lower-case names.
pub type HeaderSet = HashMap<String, String>;

/// Name used for every failure that doesn't carry its own name.
pub const APPLICATION_ERROR: &str = "application_error";

/// Message for requests that never produced a response.
pub const UNRESOLVED_REQUEST_MESSAGE: &str = "Unable to resolve request";

/// Message for JSON error bodies without a `message` field.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Message for error bodies that are not valid JSON.
pub const UNPROCESSABLE_BODY_MESSAGE: &str = "Internal server error - unable to process response";

/// Last-resort message when the status has no canonical reason.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Description of a failed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    pub message: String,
    /// HTTP status of the response, `None` if no response was received.
    pub status_code: Option<u16>,
    pub name: String,
}

impl ErrorInfo {
    /// A failure named [`APPLICATION_ERROR`].
    pub fn application<S: Into<String>>(message: S, status_code: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status_code,
            name: APPLICATION_ERROR.to_string(),
        }
    }

    /// Failure for a request that never received a response.
    pub fn unresolved() -> Self {
        Self::application(UNRESOLVED_REQUEST_MESSAGE, None)
    }

    pub fn is_transport(&self) -> bool {
        self.status_code.is_none()
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{} ({}): {}", self.name, code, self.message),
            None => write!(f, "{}: {}", self.name, self.message),
        }
    }
}

/// Result of a single call.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult<T> {
    Success {
        data: T,
        headers: HeaderSet,
    },
    Failure {
        error: ErrorInfo,
        /// Response headers, if a response was received.
        headers: Option<HeaderSet>,
    },
}

impl<T> FetchResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchResult::Success { data, .. } => Some(data),
            FetchResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            FetchResult::Success { .. } => None,
            FetchResult::Failure { error, .. } => Some(error),
        }
    }

    /// Response headers. `None` only when no response was received.
    pub fn headers(&self) -> Option<&HeaderSet> {
        match self {
            FetchResult::Success { headers, .. } => Some(headers),
            FetchResult::Failure { headers, .. } => headers.as_ref(),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FetchResult<U> {
        match self {
            FetchResult::Success { data, headers } => FetchResult::Success { data: f(data), headers },
            FetchResult::Failure { error, headers } => FetchResult::Failure { error, headers },
        }
    }

    /// Convert into a standard `Result` for use with `?`.
    pub fn into_result(self) -> Result<(T, HeaderSet), (ErrorInfo, Option<HeaderSet>)> {
        match self {
            FetchResult::Success { data, headers } => Ok((data, headers)),
            FetchResult::Failure { error, headers } => Err((error, headers)),
        }
    }

    pub(crate) fn failure(error: ErrorInfo, headers: Option<HeaderSet>) -> Self {
        FetchResult::Failure { error, headers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_info_serializes_camel_case() {
        let info = ErrorInfo::application("boom", Some(502));
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "boom", "statusCode": 502, "name": "application_error"})
        );

        let json = serde_json::to_value(ErrorInfo::unresolved()).unwrap();
        assert!(json["statusCode"].is_null());
    }

    #[test]
    fn accessors_follow_variant() {
        let ok: FetchResult<u32> = FetchResult::Success { data: 7, headers: HeaderSet::new() };
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&7));
        assert!(ok.error().is_none());
        assert!(ok.headers().is_some());

        let failed: FetchResult<u32> = FetchResult::failure(ErrorInfo::unresolved(), None);
        assert!(failed.is_failure());
        assert!(failed.data().is_none());
        assert!(failed.error().unwrap().is_transport());
        assert!(failed.headers().is_none());
    }

    #[test]
    fn map_keeps_headers_and_errors() {
        let mut headers = HeaderSet::new();
        headers.insert("x-a".to_string(), "1".to_string());

        let ok = FetchResult::Success { data: 2, headers: headers.clone() }.map(|n| n * 10);
        assert_eq!(ok, FetchResult::Success { data: 20, headers: headers.clone() });

        let failed: FetchResult<i32> = FetchResult::failure(ErrorInfo::application("x", Some(400)), Some(headers));
        let (error, headers) = failed.map(|n| n + 1).into_result().unwrap_err();
        assert_eq!(error.status_code, Some(400));
        assert!(headers.is_some());
    }

    #[test]
    fn display_includes_status_when_present() {
        assert_eq!(
            ErrorInfo::application("nope", Some(404)).to_string(),
            "application_error (404): nope"
        );
        assert_eq!(ErrorInfo::unresolved().to_string(), "application_error: Unable to resolve request");
    }
}
