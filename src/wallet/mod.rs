//! Wallet connection through a third-party signing service.
//!
//! # Data Flow
//! ```text
//! SigningClient::create_sign_in ──► signing proxy ──► wallet service
//!         │
//!         ▼
//! on_created(payload)   (sign URL + terminal QR code)
//!         │
//!         ▼
//! poll status every poll_interval
//!         │
//!         ├─ signed   → account cached in SessionStore
//!         ├─ expired  → Expired
//!         └─ deadline → TimedOut
//! ```
//!
//! All requests go through the signing proxy, which holds the API
//! credentials; this module never sees them.

pub mod error;
pub mod poller;
pub mod qr;
pub mod session;
pub mod signing;
pub mod types;

pub use error::{WalletError, WalletResult};
pub use poller::{ConnectOutcome, WalletConnector};
pub use session::SessionStore;
pub use signing::SigningClient;
pub use types::{CreatedPayload, PayloadState, PayloadStatus};
