//! Client for the signing proxy's payload API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;
use uuid::Uuid;

use crate::backend::error_message;
use crate::wallet::error::{WalletError, WalletResult};
use crate::wallet::types::{CreatedPayload, PayloadStatus};

/// Proxy route that forwards to the wallet service payload API.
pub const PAYLOAD_PATH: &str = "/api/payload";

#[derive(Debug, Clone)]
pub struct SigningClient {
    base_url: Url,
    http: Client,
}

impl SigningClient {
    pub fn new(proxy_url: &str, timeout: Duration) -> WalletResult<Self> {
        let base_url = Url::parse(proxy_url)
            .map_err(|e| WalletError::InvalidUrl(format!("'{}': {}", proxy_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(WalletError::InvalidUrl(format!(
                "'{}': scheme must be http or https",
                proxy_url
            )));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { base_url, http })
    }

    /// Create a sign-in payload; signing it proves control of an account.
    pub async fn create_sign_in(&self) -> WalletResult<CreatedPayload> {
        let body = json!({ "txjson": { "TransactionType": "SignIn" } });
        let url = self.url_for(PAYLOAD_PATH)?;
        self.send(self.http.post(url).json(&body)).await
    }

    pub async fn status(&self, uuid: Uuid) -> WalletResult<PayloadStatus> {
        let url = self.url_for(&format!("{}/{}", PAYLOAD_PATH, uuid))?;
        self.send(self.http.get(url)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> WalletResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .map(|body| error_message(&body))
                .unwrap_or_else(|_| text.trim().to_string());
            return Err(WalletError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| WalletError::InvalidResponse(e.to_string()))
    }

    fn url_for(&self, path: &str) -> WalletResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, path))
            .map_err(|e| WalletError::InvalidUrl(format!("'{}': {}", path, e)))
    }
}
