//! XRPL console: REST backend forms, wallet sign-in and the signing proxy.

pub mod backend;
pub mod config;
pub mod forms;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod routing;
pub mod wallet;
pub mod xrpl;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
