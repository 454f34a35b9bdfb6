//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events, pretty or JSON)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → stderr (log aggregation)
//!     → Prometheus scrape endpoint (when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every proxy log line via the TraceLayer span
//! - Metric calls are no-ops until a recorder is installed, so library code
//!   and tests can record unconditionally

pub mod logging;
pub mod metrics;
