//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use xrpl_console::config::{CredentialHeader, GatewayConfig, RouteConfig, UpstreamConfig};
use xrpl_console::http::HttpServer;
use xrpl_console::lifecycle::Shutdown;

/// Serve `app` on an ephemeral local port.
pub async fn spawn_app(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// One `/api/payload` route to `base_url`, injecting `X-API-Key` from `key_env`.
pub fn proxy_config(base_url: &str, key_env: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.routes = vec![RouteConfig {
        name: "payload".into(),
        path_prefix: "/api/payload".into(),
        upstream: "wallet".into(),
        priority: 0,
    }];
    config.upstreams = vec![UpstreamConfig {
        name: "wallet".into(),
        base_url: base_url.into(),
        credentials: vec![CredentialHeader {
            header: "X-API-Key".into(),
            env: key_env.into(),
        }],
    }];
    config
}

/// A running signing proxy.
pub struct TestProxy {
    pub addr: SocketAddr,
    pub updates: mpsc::UnboundedSender<GatewayConfig>,
    pub shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub async fn start_proxy(config: GatewayConfig) -> TestProxy {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    TestProxy {
        addr,
        updates,
        shutdown,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
