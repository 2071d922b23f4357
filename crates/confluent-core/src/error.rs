//! Structured error type for Confluent API responses
//!
//! Every non-2xx response from the control plane is parsed into an
//! [`ApiError`] carrying the HTTP status, a machine-readable error code, the
//! server-provided message, and any additional detail fields from the
//! response body. Rate-limited responses additionally carry the server's
//! `Retry-After` hint so the retry engine can honor it over its own backoff.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Common machine-readable error codes returned by the Confluent APIs.
pub const ERROR_CODE_INVALID_REQUEST: &str = "INVALID_REQUEST";
pub const ERROR_CODE_UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const ERROR_CODE_FORBIDDEN: &str = "FORBIDDEN";
pub const ERROR_CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const ERROR_CODE_CONFLICT: &str = "CONFLICT";
pub const ERROR_CODE_RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
pub const ERROR_CODE_INTERNAL_SERVER: &str = "INTERNAL_SERVER_ERROR";
pub const ERROR_CODE_BAD_GATEWAY: &str = "BAD_GATEWAY";
pub const ERROR_CODE_SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";
pub const ERROR_CODE_GATEWAY_TIMEOUT: &str = "GATEWAY_TIMEOUT";

/// A structured Confluent API error.
///
/// Produced at the transport boundary from an error response; everything the
/// retry engine needs for classification (status class, rate-limit hint) is
/// carried here as plain data rather than recovered by downcasting. The
/// constructors always fill `code`, falling back to a status-derived value.
#[derive(Debug, Clone, Error)]
#[error("api error {code} ({status}): {message}")]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Machine-readable error code, derived from the response body or the
    /// status code when the body does not provide one.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Additional fields from the JSON error body (e.g. the Schema Registry
    /// numeric `error_code`).
    pub details: HashMap<String, Value>,
    /// Server-supplied `Retry-After` hint, when present on the response.
    pub retry_after: Option<Duration>,
}

impl ApiError {
    /// Create an error from bare parts. Intended for tests and for callers
    /// that already hold a decoded error body. An empty code falls back to
    /// the status-derived one.
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        let mut code = code.into();
        if code.is_empty() {
            code = status_code_to_error_code(status).to_string();
        }
        Self {
            status,
            code,
            message: message.into(),
            details: HashMap::new(),
            retry_after: None,
        }
    }

    /// Attach a server-supplied retry-after hint.
    pub fn with_retry_after(mut self, hint: Duration) -> Self {
        self.retry_after = Some(hint);
        self
    }

    /// Parse an error response into a structured error.
    ///
    /// The body is decoded as JSON when possible; `error_code` and `message`
    /// fields are lifted out and the full object is retained in `details`.
    /// Non-JSON bodies become the message verbatim. `retry_after_header` is
    /// the raw `Retry-After` header value in seconds, if the response had one.
    pub fn from_response(status: u16, body: &[u8], retry_after_header: Option<&str>) -> Self {
        let mut code = String::new();
        let mut message = String::new();
        let mut details = HashMap::new();

        if !body.is_empty() {
            match serde_json::from_slice::<HashMap<String, Value>>(body) {
                Ok(parsed) => {
                    if let Some(c) = parsed.get("error_code").and_then(Value::as_str) {
                        code = c.to_string();
                    }
                    if let Some(m) = parsed
                        .get("message")
                        .or_else(|| parsed.get("error"))
                        .and_then(Value::as_str)
                    {
                        message = m.to_string();
                    }
                    details = parsed;
                }
                Err(_) => {
                    message = String::from_utf8_lossy(body).trim().to_string();
                }
            }
        }

        if message.is_empty() {
            message = status_code_to_error_code(status).to_string();
        }
        if code.is_empty() {
            code = status_code_to_error_code(status).to_string();
        }

        let retry_after = retry_after_header
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        Self {
            status,
            code,
            message,
            details,
            retry_after,
        }
    }

    /// True for 400 Bad Request.
    pub fn is_bad_request(&self) -> bool {
        self.status == 400
    }

    /// True for 401 Unauthorized.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// True for 403 Forbidden.
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    /// True for 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// True for 409 Conflict.
    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }

    /// True for 429 Too Many Requests.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// True for any 5xx-class status.
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// True when the error is worth retrying under the default stance:
    /// rate limiting or a server-side fault.
    pub fn is_retryable(&self) -> bool {
        self.is_rate_limited() || self.is_server_error()
    }
}

/// Map an HTTP status code to a Confluent error code string.
pub fn status_code_to_error_code(status: u16) -> &'static str {
    match status {
        400 => ERROR_CODE_INVALID_REQUEST,
        401 => ERROR_CODE_UNAUTHORIZED,
        403 => ERROR_CODE_FORBIDDEN,
        404 => ERROR_CODE_NOT_FOUND,
        409 => ERROR_CODE_CONFLICT,
        429 => ERROR_CODE_RATE_LIMIT_EXCEEDED,
        500 => ERROR_CODE_INTERNAL_SERVER,
        502 => ERROR_CODE_BAD_GATEWAY,
        503 => ERROR_CODE_SERVICE_UNAVAILABLE,
        504 => ERROR_CODE_GATEWAY_TIMEOUT,
        s if s >= 500 => "SERVER_ERROR",
        s if s >= 400 => "CLIENT_ERROR",
        _ => "UNKNOWN_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_confluent_body() {
        let body = br#"{"error_code":"RATE_LIMIT_EXCEEDED","message":"Too many requests"}"#;
        let err = ApiError::from_response(429, body, Some("30"));

        assert_eq!(err.status, 429);
        assert_eq!(err.code, ERROR_CODE_RATE_LIMIT_EXCEEDED);
        assert_eq!(err.message, "Too many requests");
        assert_eq!(err.retry_after, Some(Duration::from_secs(30)));
        assert!(err.is_rate_limited());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_from_response_generic_error_field() {
        let body = br#"{"error":"something broke"}"#;
        let err = ApiError::from_response(500, body, None);

        assert_eq!(err.message, "something broke");
        assert_eq!(err.code, ERROR_CODE_INTERNAL_SERVER);
        assert!(err.is_server_error());
    }

    #[test]
    fn test_from_response_non_json_body() {
        let err = ApiError::from_response(502, b"upstream connect error\n", None);

        assert_eq!(err.message, "upstream connect error");
        assert_eq!(err.code, ERROR_CODE_BAD_GATEWAY);
        assert!(err.details.is_empty());
    }

    #[test]
    fn test_from_response_empty_body_falls_back_to_status() {
        let err = ApiError::from_response(404, b"", None);

        assert_eq!(err.code, ERROR_CODE_NOT_FOUND);
        assert_eq!(err.message, ERROR_CODE_NOT_FOUND);
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_from_response_retains_details() {
        let body = br#"{"error_code":"CONFLICT","message":"exists","resource_id":"lkc-1"}"#;
        let err = ApiError::from_response(409, body, None);

        assert_eq!(
            err.details.get("resource_id").and_then(Value::as_str),
            Some("lkc-1")
        );
        assert!(err.is_conflict());
    }

    #[test]
    fn test_from_response_unparseable_retry_after_ignored() {
        let err = ApiError::from_response(429, b"", Some("tomorrow"));
        assert_eq!(err.retry_after, None);
    }

    #[test]
    fn test_numeric_error_code_stays_in_details() {
        // Schema Registry reports error_code as an integer; it must not be
        // mistaken for the string code but stays reachable in details.
        let body = br#"{"error_code":40401,"message":"Subject not found"}"#;
        let err = ApiError::from_response(404, body, None);

        assert_eq!(err.code, ERROR_CODE_NOT_FOUND);
        assert_eq!(
            err.details.get("error_code").and_then(Value::as_i64),
            Some(40401)
        );
    }

    #[test]
    fn test_display_format() {
        let err = ApiError::new(404, ERROR_CODE_NOT_FOUND, "Resource not found");
        assert_eq!(err.to_string(), "api error NOT_FOUND (404): Resource not found");

        // An empty code falls back to the status-derived one.
        let bare = ApiError::new(500, "", "boom");
        assert_eq!(bare.to_string(), "api error INTERNAL_SERVER_ERROR (500): boom");
    }

    #[test]
    fn test_status_code_fallback_ranges() {
        assert_eq!(status_code_to_error_code(599), "SERVER_ERROR");
        assert_eq!(status_code_to_error_code(418), "CLIENT_ERROR");
        assert_eq!(status_code_to_error_code(302), "UNKNOWN_ERROR");
    }
}
