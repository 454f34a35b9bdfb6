//! Request and response shapes exchanged with the REST backend.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::endpoints::Endpoint;

/// One HTTP call against the backend, built by a form.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: Endpoint,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// A GET with no body.
    pub fn get(path: impl Into<Endpoint>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// A POST carrying `body` as JSON.
    pub fn post(path: impl Into<Endpoint>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// A DELETE carrying `body` as JSON.
    pub fn delete(path: impl Into<Endpoint>, body: Value) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// Response envelope used by every backend endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_parsing() {
        let env: Envelope = serde_json::from_value(json!({
            "status": "SUCCESS",
            "result": {"ledger_index": 5}
        }))
        .unwrap();
        assert!(env.is_success());
        assert!(env.message.is_none());

        let env: Envelope = serde_json::from_value(json!({
            "status": "error",
            "message": "tecNO_DST"
        }))
        .unwrap();
        assert!(!env.is_success());
        assert!(env.result.is_none());
    }

    #[test]
    fn test_request_builders() {
        let req = ApiRequest::get("/api/ledger/info").with_query("index", "validated");
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.query, vec![("index".to_string(), "validated".to_string())]);
        assert!(req.body.is_none());
    }
}
