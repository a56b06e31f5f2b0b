use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use serde_json::Value;
use url::Url;

use crate::net::headers::header_set;
use crate::net::response::{
    ErrorInfo, FetchResult, APPLICATION_ERROR, REQUEST_FAILED_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
    UNPROCESSABLE_BODY_MESSAGE,
};

/// Build the target URL for `path`.
///
/// Absolute URLs are used as-is. Anything else is appended verbatim to the base
/// URL, without touching slashes.
pub fn resolve_url(base: Option<&str>, path: &str) -> String {
    let is_absolute = Url::parse(path).map(|u| u.has_host()).unwrap_or(false);
    match base {
        Some(base) if !is_absolute => format!("{base}{path}"),
        _ => path.to_string(),
    }
}

/// Executes exactly one HTTP call and folds the outcome into a [`FetchResult`].
pub async fn execute<T, B>(
    http: &reqwest::Client,
    method: Method,
    url: &str,
    headers: HeaderMap,
    body: Option<&B>,
) -> FetchResult<T>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let url = match Url::parse(url) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("{method} {url}: invalid request URL: {e}");
            return FetchResult::failure(ErrorInfo::application(format!("Invalid request URL: {e}"), None), None);
        }
    };

    let mut request = http.request(method.clone(), url.clone()).headers(headers);
    if let Some(body) = body {
        match serde_json::to_vec(body) {
            Ok(bytes) => request = request.body(bytes),
            Err(e) => {
                return FetchResult::failure(
                    ErrorInfo::application(format!("Unable to serialize request body: {e}"), None),
                    None,
                );
            }
        }
    }

    log::debug!("{method} {url}");
    let res = match request.send().await {
        Ok(res) => res,
        Err(e) => {
            log::warn!("{method} {url}: request did not complete: {e}");
            return FetchResult::failure(ErrorInfo::unresolved(), None);
        }
    };

    let status = res.status();
    let headers = header_set(res.headers());
    log::debug!("{method} {url}: {status}");

    // Note: does not deal with streaming
    let body = res.bytes().await;

    if !status.is_success() {
        let error = match body {
            Ok(bytes) => error_from_body(status, &bytes),
            Err(e) => ErrorInfo::application(e.to_string(), Some(status.as_u16())),
        };
        return FetchResult::failure(error, Some(headers));
    }

    let bytes = match body {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("{method} {url}: cannot read response body: {e}");
            return FetchResult::failure(ErrorInfo::application(e.to_string(), Some(status.as_u16())), Some(headers));
        }
    };

    match decode_success(&bytes) {
        Ok(data) => FetchResult::Success { data, headers },
        Err(e) => {
            log::warn!("{method} {url}: cannot parse response body: {e}");
            FetchResult::failure(
                ErrorInfo::application(format!("Unable to parse response body: {e}"), Some(status.as_u16())),
                Some(headers),
            )
        }
    }
}

/// Extract an [`ErrorInfo`] from a non-2xx response body.
pub(crate) fn error_from_body(status: StatusCode, bytes: &[u8]) -> ErrorInfo {
    let code = Some(status.as_u16());

    match serde_json::from_slice::<Value>(bytes) {
        Ok(body) => ErrorInfo {
            message: string_field(&body, "message").unwrap_or(UNEXPECTED_ERROR_MESSAGE).to_string(),
            status_code: code,
            name: string_field(&body, "name").unwrap_or(APPLICATION_ERROR).to_string(),
        },
        Err(e) if matches!(e.classify(), Category::Syntax | Category::Eof) => {
            ErrorInfo::application(UNPROCESSABLE_BODY_MESSAGE, code)
        }
        // Parsing bytes into a `Value` only reports syntax or EOF errors today;
        // any other category lands here.
        Err(e) => {
            log::warn!("unexpected failure reading error body: {e}");
            ErrorInfo::application(status.canonical_reason().unwrap_or(REQUEST_FAILED_MESSAGE), code)
        }
    }
}

/// Decode a 2xx body. An empty body decodes as JSON `null`.
pub(crate) fn decode_success<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(b"null");
    }
    serde_json::from_slice(bytes)
}

fn string_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn relative_paths_are_joined_verbatim() {
        let base = Some("http://api.local/v1");
        assert_eq!(resolve_url(base, "/users"), "http://api.local/v1/users");
        assert_eq!(resolve_url(base, "users"), "http://api.local/v1users");
        assert_eq!(resolve_url(Some("http://api.local/"), "/users"), "http://api.local//users");
    }

    #[test]
    fn absolute_paths_are_used_as_is() {
        assert_eq!(
            resolve_url(Some("http://api.local"), "https://other.example/x"),
            "https://other.example/x"
        );
        assert_eq!(resolve_url(None, "/users"), "/users");
    }

    #[test]
    fn structured_error_body_is_extracted() {
        let info = error_from_body(
            StatusCode::BAD_REQUEST,
            br#"{"name":"api_failure","message":"Something went wrong"}"#,
        );
        assert_eq!(info.status_code, Some(400));
        assert_eq!(info.name, "api_failure");
        assert_eq!(info.message, "Something went wrong");
    }

    #[test]
    fn json_error_body_without_fields_falls_back() {
        let info = error_from_body(StatusCode::NOT_FOUND, br#"{"detail":"missing"}"#);
        assert_eq!(info.name, APPLICATION_ERROR);
        assert_eq!(info.message, UNEXPECTED_ERROR_MESSAGE);

        let info = error_from_body(StatusCode::CONFLICT, br#"[1, 2, 3]"#);
        assert_eq!(info.status_code, Some(409));
        assert_eq!(info.message, UNEXPECTED_ERROR_MESSAGE);
    }

    #[test]
    fn non_string_fields_are_ignored() {
        let info = error_from_body(StatusCode::BAD_REQUEST, br#"{"name":42,"message":{"a":1}}"#);
        assert_eq!(info.name, APPLICATION_ERROR);
        assert_eq!(info.message, UNEXPECTED_ERROR_MESSAGE);
    }

    #[test]
    fn unparsable_error_body_gets_generic_message() {
        let info = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, b"Internal Server Error");
        assert_eq!(info.status_code, Some(500));
        assert_eq!(info.name, APPLICATION_ERROR);
        assert_eq!(info.message, UNPROCESSABLE_BODY_MESSAGE);

        let info = error_from_body(StatusCode::BAD_GATEWAY, b"");
        assert_eq!(info.message, UNPROCESSABLE_BODY_MESSAGE);
    }

    #[test]
    fn empty_success_body_decodes_as_null() {
        let () = decode_success(b"").unwrap();

        let value: Value = decode_success(b"  \n").unwrap();
        assert!(value.is_null());

        let missing: Option<u32> = decode_success(b"").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn typed_success_body_decodes() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct User {
            id: u32,
        }

        let user: User = decode_success(br#"{"id":1}"#).unwrap();
        assert_eq!(user, User { id: 1 });
        assert!(decode_success::<User>(b"not json").is_err());
    }
}
