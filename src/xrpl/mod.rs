//! XRP Ledger syntax checks and unit conversions.
//!
//! # Data Flow
//! ```text
//! form input (address, seed, currency, amount, dates)
//!     → address.rs / currency.rs / amount.rs (syntax checks)
//!     → time.rs / oracle.rs (ledger encodings)
//!     → request body handed to the REST backend
//! ```
//!
//! # Design Decisions
//! - Only syntax is checked here; ledger semantics belong to the backend
//! - Amounts use integer arithmetic, never floats
//! - Seeds are validated but never logged

pub mod address;
pub mod amount;
pub mod currency;
pub mod oracle;
pub mod time;
pub mod types;

pub use address::{is_valid_classic_address, validate_classic_address, validate_seed, SeedKind};
pub use amount::{drops_to_xrp, xrp_to_drops, DROPS_PER_XRP};
pub use currency::{decode_currency, encode_currency, validate_currency_code, CurrencyCode};
pub use types::{XrplError, XrplResult};
