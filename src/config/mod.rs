//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via ArcSwap by the signing proxy
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → config sent to the server, which swaps its runtime state
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All sections have defaults, so an empty file is a working config
//! - Credentials are never stored in the file, only the names of the
//!   environment variables holding them

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_or_default, parse_config, ConfigError};
pub use schema::{
    ClientConfig, CorsConfig, CredentialHeader, GatewayConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, RouteConfig, TimeoutConfig, UpstreamConfig, WalletConfig,
};
pub use validation::{validate_config, ValidationError};
