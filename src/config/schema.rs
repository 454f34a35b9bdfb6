//! Configuration schema definitions.
//!
//! One file configures both binaries: the signing proxy reads `listener`,
//! `routes`, `upstreams`, `cors`, `timeouts` and `observability`; the CLI
//! reads `client` and `wallet`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable holding the wallet service API key.
pub const API_KEY_ENV: &str = "XUMM_API_KEY";
/// Environment variable holding the wallet service API secret.
pub const API_SECRET_ENV: &str = "XUMM_API_SECRET";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub listener: ListenerConfig,

    /// Route definitions mapping path prefixes to upstreams.
    pub routes: Vec<RouteConfig>,

    /// Upstream services and the credentials injected for them.
    pub upstreams: Vec<UpstreamConfig>,

    pub cors: CorsConfig,
    pub timeouts: TimeoutConfig,
    pub observability: ObservabilityConfig,
    pub client: ClientConfig,
    pub wallet: WalletConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let credentials = vec![
            CredentialHeader {
                header: "X-API-Key".to_string(),
                env: API_KEY_ENV.to_string(),
            },
            CredentialHeader {
                header: "X-API-Secret".to_string(),
                env: API_SECRET_ENV.to_string(),
            },
        ];

        Self {
            listener: ListenerConfig::default(),
            routes: vec![
                RouteConfig {
                    name: "payload".to_string(),
                    path_prefix: "/api/payload".to_string(),
                    upstream: "xumm-payload".to_string(),
                    priority: 0,
                },
                RouteConfig {
                    name: "platform".to_string(),
                    path_prefix: "/api/platform".to_string(),
                    upstream: "xumm-platform".to_string(),
                    priority: 0,
                },
            ],
            upstreams: vec![
                UpstreamConfig {
                    name: "xumm-payload".to_string(),
                    base_url: "https://xumm.app/api/v1/platform/payload".to_string(),
                    credentials: credentials.clone(),
                },
                UpstreamConfig {
                    name: "xumm-platform".to_string(),
                    base_url: "https://xumm.app/api/v1/platform".to_string(),
                    credentials,
                },
            ],
            cors: CorsConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            client: ClientConfig::default(),
            wallet: WalletConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Largest request body forwarded upstream, in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            max_body_size: 1024 * 1024,
        }
    }
}

/// Route configuration mapping a path prefix to an upstream.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging/metrics.
    pub name: String,

    /// Path prefix to match; stripped before forwarding.
    pub path_prefix: String,

    /// Upstream name to forward to.
    pub upstream: String,

    /// Route priority (higher = checked first).
    #[serde(default)]
    pub priority: u32,
}

/// An upstream service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    pub name: String,

    /// Base URL the remainder of the request path is appended to.
    pub base_url: String,

    /// Headers injected into every forwarded request.
    #[serde(default)]
    pub credentials: Vec<CredentialHeader>,
}

/// A header whose value is read from the environment at request time.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CredentialHeader {
    pub header: String,
    pub env: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

impl TimeoutConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Where the CLI sends its requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// XRPL REST backend.
    pub backend_url: String,

    /// Signing proxy used for wallet connection.
    pub proxy_url: String,

    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:3000".to_string(),
            proxy_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Wallet connection polling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    pub poll_interval_ms: u64,
    pub timeout_secs: u64,

    /// Session file holding the connected account.
    pub session_path: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            timeout_secs: 300,
            session_path: ".xrpl-console/session.json".to_string(),
        }
    }
}

impl WalletConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.upstreams[0].credentials[0].env, API_KEY_ENV);
        assert!(config.cors.allows_any());
        assert_eq!(config.wallet.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_routes_replace_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [[routes]]
            name = "only"
            path_prefix = "/x"
            upstream = "u"

            [[upstreams]]
            name = "u"
            base_url = "http://127.0.0.1:9000"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].priority, 0);
        assert!(config.upstreams[0].credentials.is_empty());
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.listener.max_body_size, 1024 * 1024);
    }
}
