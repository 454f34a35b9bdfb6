//! HTTP protocol handling for the signing proxy.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum router, CORS, tracing, timeouts)
//!     → request.rs (request ID set and propagated)
//!     → routing (path prefix → upstream)
//!     → forward.rs (header filtering, credential injection, upstream call)
//!     → response relayed to the client
//! ```

pub mod forward;
pub mod request;
pub mod server;

pub use forward::ProxyError;
pub use request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
