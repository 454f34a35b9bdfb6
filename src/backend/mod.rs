//! REST backend integration subsystem.
//!
//! # Data Flow
//! ```text
//! Form (validated input)
//!     → ApiRequest (method, path, query, JSON body)
//!     → client.rs (single HTTP call, no retries)
//!     → Envelope {status, message, result}
//!     → result JSON, or BackendError with a human-readable message
//! ```
//!
//! # Design Decisions
//! - The backend owns every ledger semantic; this side only marshals JSON
//! - Endpoint paths are a fixed table in endpoints.rs
//! - Error bodies of any shape are reduced to one message string

pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

pub use client::BackendClient;
pub use error::{error_message, BackendError, BackendResult};
pub use types::{ApiRequest, Envelope};
