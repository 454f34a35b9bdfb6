//! HTTP client for the XRPL REST backend.
//!
//! # Responsibilities
//! - Issue exactly one request per submission
//! - Unwrap the `{status, message, result}` envelope
//! - Turn every failure shape into a `BackendError` with a readable message

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::backend::endpoints::Endpoint;
use crate::backend::error::{error_message, BackendError, BackendResult};
use crate::backend::types::{ApiRequest, Envelope};

/// Client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: Url,
    http: Client,
}

impl BackendClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> BackendResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BackendError::InvalidUrl(format!("'{}': {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(BackendError::InvalidUrl(format!(
                "'{}': scheme must be http or https",
                base_url
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Execute a request and return the envelope's `result`.
    pub async fn execute(&self, request: &ApiRequest) -> BackendResult<Value> {
        let url = self.url_for(&request.path)?;

        tracing::debug!(
            method = %request.method,
            url = %url,
            "Calling backend"
        );

        let mut builder = self.http.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body: Option<Value> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            let message = match &body {
                Some(v) => error_message(v),
                None if !text.trim().is_empty() => text.trim().to_string(),
                None => status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            };
            tracing::warn!(status = status.as_u16(), message = %message, "Backend returned error status");
            return Err(BackendError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = body.ok_or_else(|| BackendError::InvalidResponse("body is not JSON".to_string()))?;
        let envelope: Envelope = serde_json::from_value(body.clone())
            .map_err(|e| BackendError::InvalidResponse(format!("missing envelope: {}", e)))?;

        if !envelope.is_success() {
            let message = envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| error_message(&body));
            tracing::warn!(message = %message, "Backend rejected request");
            return Err(BackendError::Rejected { message });
        }

        Ok(envelope.result.unwrap_or(Value::Null))
    }

    /// Join `endpoint` onto the base URL, percent-encoding each segment.
    fn url_for(&self, endpoint: &Endpoint) -> BackendResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(format!("'{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(endpoint.segments());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_base_urls() {
        assert!(BackendClient::new("not a url", Duration::from_secs(1)).is_err());
        assert!(BackendClient::new("ftp://host", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_url_join_keeps_base_path() {
        let client = BackendClient::new("http://localhost:3000/v1/", Duration::from_secs(1)).unwrap();
        let url = client.url_for(&Endpoint::new("/api/server/info")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/v1/api/server/info");

        let client = BackendClient::new("http://localhost:3000", Duration::from_secs(1)).unwrap();
        let url = client.url_for(&Endpoint::new("/api/server/info")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/server/info");
    }

    #[test]
    fn test_dynamic_segments_are_percent_encoded() {
        let client = BackendClient::new("http://localhost:3000", Duration::from_secs(1)).unwrap();
        let url = client.url_for(&crate::backend::endpoints::did("a/b c?d")).unwrap();
        assert_eq!(url.path(), "/api/did/a%2Fb%20c%3Fd");
        assert!(url.query().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = BackendClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client.execute(&ApiRequest::get("/api/server/info")).await.unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)), "got {:?}", err);
    }
}
