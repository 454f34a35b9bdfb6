//! HTTP server for the signing proxy.
//!
//! # Responsibilities
//! - Create the axum Router: `/healthz` plus a catch-all forwarding handler
//! - Wire up middleware (request ID, tracing, CORS, timeout)
//! - Swap in reloaded configuration without dropping connections
//! - Serve until the shutdown broadcast fires
//!
//! Routes, upstreams, body limit and upstream timeouts follow reloads.
//! Listener address, CORS and the outer timeout are fixed at startup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{validate_config, ConfigError, CorsConfig, GatewayConfig};
use crate::http::forward::{forward, ProxyError, Upstream};
use crate::http::request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routing::Router as ProxyRouter;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("upstream '{name}' has an invalid base_url: {source}")]
    Upstream {
        name: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Everything derived from one configuration generation.
pub struct RuntimeState {
    pub config: GatewayConfig,
    pub router: ProxyRouter,
    pub upstreams: HashMap<String, Upstream>,
    pub client: reqwest::Client,
}

impl RuntimeState {
    pub fn build(config: GatewayConfig) -> Result<Self, ServerError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let upstreams = config
            .upstreams
            .iter()
            .map(|u| {
                Upstream::from_config(u)
                    .map(|parsed| (u.name.clone(), parsed))
                    .map_err(|source| ServerError::Upstream {
                        name: u.name.clone(),
                        source,
                    })
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        let client = reqwest::Client::builder()
            .connect_timeout(config.timeouts.connect())
            .timeout(config.timeouts.request())
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            router: ProxyRouter::from_config(&config.routes),
            upstreams,
            client,
            config,
        })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<RuntimeState>>,
}

/// HTTP server for the signing proxy.
pub struct HttpServer {
    state: AppState,
    router: Router,
}

impl HttpServer {
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let runtime = RuntimeState::build(config)?;
        let startup_config = runtime.config.clone();
        let state = AppState {
            inner: Arc::new(ArcSwap::from_pointee(runtime)),
        };
        let router = build_router(&startup_config, state.clone());
        Ok(Self { state, router })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve on `listener` until `shutdown` fires, applying `config_updates` as they arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.state.inner.load().router.len(),
            "Signing proxy listening"
        );

        let state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                match RuntimeState::build(config) {
                    Ok(runtime) => {
                        tracing::info!(routes = runtime.router.len(), "Configuration applied");
                        state.inner.store(Arc::new(runtime));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Rejected configuration update, keeping current");
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        reloader.abort();
        tracing::info!("Signing proxy stopped");
        Ok(())
    }
}

/// Build the axum router with all middleware layers.
#[allow(deprecated)]
fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    // Backstop only: upstream timeouts normally answer first with a 504.
    let outer_timeout = config.timeouts.request() + config.timeouts.connect() + Duration::from_secs(1);

    Router::new()
        .route("/healthz", get(health))
        .fallback(proxy_handler)
        .with_state(state)
        .layer(TimeoutLayer::new(outer_timeout))
        .layer(cors_layer(&config.cors))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                request_id = %request.request_id(),
                method = %request.method(),
                path = %request.uri().path(),
            )
        }))
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins = if cors.allows_any() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            cors.allowed_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([X_REQUEST_ID])
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Match a route and forward to its upstream.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let runtime = state.inner.load_full();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let Some((route, rest)) = runtime.router.match_path(&path) else {
        tracing::warn!(path = %path, "No route matched");
        metrics::record_request("none", &method, 404, start);
        return ProxyError::NoRoute { path: path.clone() }.into_response();
    };

    let response = match runtime.upstreams.get(&route.upstream) {
        Some(upstream) => forward(
            &runtime.client,
            upstream,
            rest,
            request,
            runtime.config.listener.max_body_size,
        )
        .await
        .unwrap_or_else(|e| e.into_response()),
        // Unreachable for validated configs.
        None => ProxyError::UpstreamFailed {
            upstream: route.upstream.clone(),
        }
        .into_response(),
    };

    metrics::record_request(&route.name, &method, response.status().as_u16(), start);
    response
}
