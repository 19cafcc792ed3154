//! # Request/Response Logging Middleware
//!
//! Structured logging for HTTP requests and responses.
//!
//! Logs method, path, client details, status and duration, tagged with the
//! request ID from [`RequestStamp`](super::RequestStamp). Credential-bearing
//! headers are redacted. Request bodies are never logged; login and
//! registration bodies carry plaintext passwords.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Headers that carry the session token
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie"];

/// Header name/value pairs with sensitive values replaced.
fn sanitized_headers(headers: &axum::http::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.iter().any(|h| name_lower == *h) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

/// Request/response logging middleware
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let request_id = req
        .extensions()
        .get::<super::RequestStamp>()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let client_ip = req
        .headers()
        .get("x-forwarded-for")
        .or_else(|| req.headers().get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    // The query string may carry a session token, so only the path is logged.
    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        user_agent = ?user_agent,
        client_ip = ?client_ip,
        "[REQUEST] {} {}",
        method,
        path,
    );

    debug!(
        request_id = %request_id,
        headers = ?sanitized_headers(req.headers()),
        "[REQUEST HEADERS]"
    );

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();
    let status_code = status.as_u16();

    if status.is_server_error() {
        error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method,
            path,
            status_code,
            duration.as_millis()
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method,
            path,
            status_code,
            duration.as_millis()
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms)",
            method,
            path,
            status_code,
            duration.as_millis()
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn test_credentials_are_redacted() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        headers.insert("cookie", HeaderValue::from_static("token=abc.def.ghi"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let sanitized = sanitized_headers(&headers);
        let rendered = format!("{sanitized:?}");

        assert!(!rendered.contains("abc.def.ghi"));
        assert!(rendered.contains("application/json"));
        assert_eq!(
            sanitized.iter().filter(|(_, v)| v == "***REDACTED***").count(),
            2
        );
    }
}
