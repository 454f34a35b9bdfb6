//! Forwarding a matched request to its upstream.
//!
//! # Responsibilities
//! - Build the upstream URL from the base URL, the path remainder and query
//! - Refuse paths with dot segments or that resolve outside the base path
//! - Drop hop-by-hop, `host`, `origin` and `content-length` headers
//! - Drop client-supplied credential headers and inject the configured ones
//! - Relay status, headers and body back to the client
//! - Map every failure to a JSON `{"error": ...}` response

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::StreamExt;
use serde_json::json;
use thiserror::Error;
use url::Url;

use crate::config::{CredentialHeader, UpstreamConfig};
use crate::http::request::RequestIdExt;
use crate::observability::metrics;

/// Headers that describe a single connection and are never forwarded.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// `.` or `..`, including percent-encoded forms such as `%2e%2E`.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("no route for {path}")]
    NoRoute { path: String },

    #[error("credentials for upstream '{upstream}' are not configured")]
    MissingCredentials { upstream: String },

    #[error("invalid request path {path}")]
    InvalidPath { path: String },

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("failed to read request body")]
    BodyUnreadable,

    #[error("upstream '{upstream}' timed out")]
    UpstreamTimeout { upstream: String },

    #[error("upstream '{upstream}' request failed")]
    UpstreamFailed { upstream: String },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::NoRoute { .. } => StatusCode::NOT_FOUND,
            ProxyError::MissingCredentials { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::InvalidPath { .. } | ProxyError::BodyUnreadable => StatusCode::BAD_REQUEST,
            ProxyError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::UpstreamFailed { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// An upstream with its base URL parsed once per config.
#[derive(Debug, Clone)]
pub struct Upstream {
    pub name: String,
    pub base_url: Url,
    pub credentials: Vec<CredentialHeader>,
}

impl Upstream {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            name: config.name.clone(),
            base_url: Url::parse(&config.base_url)?,
            credentials: config.credentials.clone(),
        })
    }

    /// Base URL + path remainder + original query.
    ///
    /// The result always stays under the base URL's path: dot segments,
    /// raw or percent-encoded, are refused before the credentials go anywhere.
    pub fn url_for(&self, rest: &str, query: Option<&str>) -> Result<Url, ProxyError> {
        let invalid = || ProxyError::InvalidPath {
            path: rest.to_string(),
        };
        if rest.split(['/', '\\']).any(is_dot_segment) {
            tracing::warn!(upstream = %self.name, path = %rest, "Rejected dot segment in path");
            return Err(invalid());
        }

        let mut target = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), rest);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            target.push('?');
            target.push_str(query);
        }
        let url = Url::parse(&target).map_err(|e| {
            tracing::warn!(upstream = %self.name, error = %e, "Invalid upstream URL");
            invalid()
        })?;

        let base = self.base_url.path().trim_end_matches('/');
        let inside = url.path() == base
            || url
                .path()
                .strip_prefix(base)
                .is_some_and(|tail| tail.starts_with('/'));
        if url.origin() != self.base_url.origin() || !inside {
            tracing::warn!(upstream = %self.name, path = %rest, "Resolved URL escapes upstream base path");
            return Err(invalid());
        }
        Ok(url)
    }

    /// Read credential values from the environment.
    pub fn resolve_credentials(&self) -> Result<Vec<(HeaderName, HeaderValue)>, ProxyError> {
        self.credentials
            .iter()
            .map(|credential| {
                let missing = || {
                    tracing::error!(
                        upstream = %self.name,
                        env = %credential.env,
                        "Credential environment variable is unset or invalid"
                    );
                    ProxyError::MissingCredentials {
                        upstream: self.name.clone(),
                    }
                };
                let name = HeaderName::from_bytes(credential.header.as_bytes()).map_err(|_| missing())?;
                let value = std::env::var(&credential.env)
                    .ok()
                    .filter(|v| !v.is_empty())
                    .and_then(|v| HeaderValue::from_str(&v).ok())
                    .ok_or_else(missing)?;
                Ok((name, value))
            })
            .collect()
    }
}

/// Copy client headers that may travel upstream.
pub fn filter_request_headers(headers: &HeaderMap, credentials: &[CredentialHeader]) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (name, value) in headers {
        let is_credential = credentials
            .iter()
            .any(|c| name.as_str().eq_ignore_ascii_case(&c.header));
        let dropped = is_hop_by_hop(name)
            || *name == header::HOST
            || *name == header::ORIGIN
            || *name == header::CONTENT_LENGTH
            || is_credential;
        if !dropped {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// Copy upstream headers that may travel back to the client.
///
/// CORS headers come from the proxy's own layer, never from upstream.
pub fn filter_response_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (name, value) in headers {
        let dropped = is_hop_by_hop(name)
            || *name == header::CONTENT_LENGTH
            || name.as_str().starts_with("access-control-");
        if !dropped {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// Forward `request` to `upstream`, with `rest` already stripped of the route prefix.
pub async fn forward(
    client: &reqwest::Client,
    upstream: &Upstream,
    rest: &str,
    request: Request<Body>,
    max_body_size: usize,
) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();

    let declared = parts
        .headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > max_body_size) {
        return Err(ProxyError::BodyTooLarge { limit: max_body_size });
    }
    let body = read_body(body, max_body_size, &upstream.name).await?;

    let url = upstream.url_for(rest, parts.uri.query())?;
    let mut headers = filter_request_headers(&parts.headers, &upstream.credentials);
    for (name, value) in upstream.resolve_credentials()? {
        headers.insert(name, value);
    }

    tracing::debug!(
        request_id = %parts.headers.request_id(),
        upstream = %upstream.name,
        method = %parts.method,
        url = %url,
        "Forwarding request"
    );

    let response = client
        .request(parts.method, url)
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|e| upstream_error(upstream, &e))?;

    let status = response.status();
    let headers = filter_response_headers(response.headers());
    let bytes = response.bytes().await.map_err(|e| upstream_error(upstream, &e))?;

    let mut relayed = Response::new(Body::from(bytes));
    *relayed.status_mut() = status;
    *relayed.headers_mut() = headers;
    Ok(relayed)
}

/// Buffer the request body, refusing anything past `limit` bytes.
async fn read_body(body: Body, limit: usize, upstream: &str) -> Result<Bytes, ProxyError> {
    let mut stream = body.into_data_stream();
    let mut buffer = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            tracing::warn!(upstream = %upstream, error = %e, "Failed to read request body");
            ProxyError::BodyUnreadable
        })?;
        if buffer.len() + chunk.len() > limit {
            return Err(ProxyError::BodyTooLarge { limit });
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buffer))
}

fn upstream_error(upstream: &Upstream, e: &reqwest::Error) -> ProxyError {
    if e.is_timeout() {
        tracing::warn!(upstream = %upstream.name, error = %e, "Upstream timed out");
        metrics::record_upstream_error(&upstream.name, "timeout");
        ProxyError::UpstreamTimeout {
            upstream: upstream.name.clone(),
        }
    } else {
        tracing::error!(upstream = %upstream.name, error = %e, "Upstream request failed");
        metrics::record_upstream_error(&upstream.name, "connect");
        ProxyError::UpstreamFailed {
            upstream: upstream.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(base: &str) -> Upstream {
        Upstream {
            name: "wallet".into(),
            base_url: Url::parse(base).unwrap(),
            credentials: vec![CredentialHeader {
                header: "X-API-Key".into(),
                env: "XRPL_CONSOLE_TEST_FORWARD_KEY".into(),
            }],
        }
    }

    #[test]
    fn test_url_for() {
        let up = upstream("https://xumm.app/api/v1/platform/payload");
        assert_eq!(
            up.url_for("", None).unwrap().as_str(),
            "https://xumm.app/api/v1/platform/payload"
        );
        assert_eq!(
            up.url_for("/abc", Some("x=1")).unwrap().as_str(),
            "https://xumm.app/api/v1/platform/payload/abc?x=1"
        );
    }

    #[test]
    fn test_url_for_stays_under_base_path() {
        let up = upstream("https://xumm.app/api/v1/platform/payload");
        for rest in [
            "/../../../../admin",
            "/%2e%2e/%2e%2e/other",
            "/%2E%2e/x",
            "/./abc",
            "/abc/..",
            "/..\\..\\admin",
        ] {
            let err = up.url_for(rest, None).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{}", rest);
        }
        assert!(up.url_for("/a..b/..c", None).is_ok());
    }

    #[test]
    fn test_dot_segments() {
        assert!(is_dot_segment(".."));
        assert!(is_dot_segment("%2e"));
        assert!(is_dot_segment(".%2E"));
        assert!(!is_dot_segment("..."));
        assert!(!is_dot_segment("abc"));
    }

    #[tokio::test]
    async fn test_read_body_limit() {
        let body = read_body(Body::from("0123456789"), 10, "wallet").await.unwrap();
        assert_eq!(&body[..], b"0123456789");

        let err = read_body(Body::from("0123456789a"), 10, "wallet").await.unwrap_err();
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_body_read_failure_is_bad_request() {
        let stream = futures_util::stream::iter(vec![
            Ok::<_, std::io::Error>(Bytes::from_static(b"abc")),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "client went away")),
        ]);
        let err = read_body(Body::from_stream(stream), 1024, "wallet").await.unwrap_err();
        assert!(matches!(err, ProxyError::BodyUnreadable));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_request_header_filter() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost"));
        headers.insert(header::ORIGIN, HeaderValue::from_static("http://app"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", HeaderValue::from_static("client-supplied"));
        headers.insert("x-request-id", HeaderValue::from_static("abc"));

        let out = filter_request_headers(&headers, &upstream("http://u").credentials);
        assert_eq!(out.len(), 2);
        assert!(out.contains_key(header::CONTENT_TYPE));
        assert!(out.contains_key("x-request-id"));
    }

    #[test]
    fn test_response_header_filter() {
        let mut headers = HeaderMap::new();
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let out = filter_response_headers(&headers);
        assert_eq!(out.len(), 1);
        assert!(out.contains_key(header::CONTENT_TYPE));
    }

    #[test]
    fn test_missing_credentials() {
        let up = upstream("http://u");
        std::env::remove_var("XRPL_CONSOLE_TEST_FORWARD_KEY");
        let err = up.resolve_credentials().unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!err.to_string().contains("XRPL_CONSOLE_TEST_FORWARD_KEY"));
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = ProxyError::NoRoute { path: "/x".into() }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"error":"no route for /x"}"#);
    }
}
