//! Form layer: one typed form per console operation.
//!
//! # Data Flow
//! ```text
//! user input (CLI flags)
//!     → Form::build (syntax checks via crate::xrpl, JSON body)
//!     → BackendClient::execute (one HTTP call)
//!     → Form::present (unit conversions for display)
//!     → render
//! ```
//!
//! # Design Decisions
//! - Validation happens entirely before any network I/O
//! - Seeds live in `Secret`, whose Debug output is redacted
//! - Amounts are sent in ledger form: XRP as drops strings, tokens as
//!   `{currency, issuer, value}` objects

pub mod account;
pub mod check;
pub mod did;
pub mod escrow;
pub mod nft;
pub mod offer;
pub mod oracle;
pub mod payment;
pub mod present;
pub mod server;
pub mod trustline;

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};
use thiserror::Error;

use crate::backend::{ApiRequest, BackendClient, BackendError};
use crate::xrpl::{self, XrplError};

/// A console operation that validates its input into one backend request.
pub trait Form: Send + Sync {
    /// Validate input and build the backend request.
    fn build(&self) -> Result<ApiRequest, FormError>;

    /// Post-process a successful result for display.
    fn present(&self, result: Value) -> Value {
        result
    }
}

/// Input validation failures. None of these ever reach the network.
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Xrpl(#[from] XrplError),

    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl FormError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        FormError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Anything a submission can fail with.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Form(#[from] FormError),

    #[error("{0}")]
    Backend(#[from] BackendError),
}

impl ConsoleError {
    /// Text for the one-line error notification.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Form(e) => e.to_string(),
            ConsoleError::Backend(e) => e.user_message(),
        }
    }
}

/// Validate, send and present one form.
pub async fn submit(client: &BackendClient, form: &dyn Form) -> Result<Value, ConsoleError> {
    let request = form.build()?;
    let result = client.execute(&request).await?;
    Ok(form.present(result))
}

/// A secret seed. Never printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(seed: impl Into<String>) -> Self {
        Self(seed.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

impl FromStr for Secret {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// An amount as entered: XRP, or an issued-currency value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Xrp(String),
    Token {
        value: String,
        currency: String,
        issuer: String,
    },
}

impl Asset {
    /// Build from separate value / currency / issuer inputs.
    pub fn from_parts(value: &str, currency: Option<&str>, issuer: Option<&str>) -> Self {
        match currency.map(str::trim) {
            None | Some("") | Some("XRP") => Asset::Xrp(value.to_string()),
            Some(code) => Asset::Token {
                value: value.to_string(),
                currency: code.to_string(),
                issuer: issuer.unwrap_or_default().to_string(),
            },
        }
    }

    pub fn is_xrp(&self) -> bool {
        matches!(self, Asset::Xrp(_))
    }

    /// Validate into the ledger amount format.
    pub(crate) fn to_amount(&self, field: &'static str) -> Result<Value, FormError> {
        match self {
            Asset::Xrp(value) => Ok(Value::String(xrp_drops(field, value)?.to_string())),
            Asset::Token {
                value,
                currency: code,
                issuer,
            } => {
                let code = currency(field, code)?;
                let issuer = address(field, issuer)?;
                token_value(field, value)?;
                Ok(json!({ "currency": code, "issuer": issuer, "value": value.trim() }))
            }
        }
    }
}

impl FromStr for Asset {
    type Err = String;

    /// `10` is XRP; `10/USD/rIssuer` is a token amount.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [value] => Ok(Asset::Xrp(value.to_string())),
            [value, "XRP"] => Ok(Asset::Xrp(value.to_string())),
            [value, currency, issuer] => Ok(Asset::Token {
                value: value.to_string(),
                currency: currency.to_string(),
                issuer: issuer.to_string(),
            }),
            _ => Err(format!("expected VALUE or VALUE/CURRENCY/ISSUER, got '{}'", s)),
        }
    }
}

/// One side of an order book: XRP or a currency/issuer pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetId {
    Xrp,
    Token { currency: String, issuer: String },
}

impl AssetId {
    pub(crate) fn to_json(&self, field: &'static str) -> Result<Value, FormError> {
        match self {
            AssetId::Xrp => Ok(json!({ "currency": "XRP" })),
            AssetId::Token {
                currency: code,
                issuer,
            } => Ok(json!({
                "currency": currency(field, code)?,
                "issuer": address(field, issuer)?,
            })),
        }
    }
}

impl FromStr for AssetId {
    type Err = String;

    /// `XRP`, or `USD/rIssuer`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            None if s.eq_ignore_ascii_case("XRP") => Ok(AssetId::Xrp),
            Some((currency, issuer)) => Ok(AssetId::Token {
                currency: currency.to_string(),
                issuer: issuer.to_string(),
            }),
            None => Err(format!("expected XRP or CURRENCY/ISSUER, got '{}'", s)),
        }
    }
}

pub(crate) fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Missing { field });
    }
    Ok(value)
}

pub(crate) fn address(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = required(field, value)?;
    xrpl::validate_classic_address(value).map_err(|e| e.for_field(field))?;
    Ok(value.to_string())
}

pub(crate) fn seed(secret: &Secret) -> Result<String, FormError> {
    let value = required("seed", secret.expose())?;
    xrpl::validate_seed(value)?;
    Ok(value.to_string())
}

pub(crate) fn currency(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = required(field, value)?;
    let code = xrpl::encode_currency(value).map_err(|e| e.for_field(field))?;
    Ok(code.as_str().to_string())
}

pub(crate) fn xrp_drops(field: &'static str, value: &str) -> Result<u64, FormError> {
    let value = required(field, value)?;
    Ok(xrpl::xrp_to_drops(value).map_err(|e| e.for_field(field))?)
}

pub(crate) fn token_value(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = required(field, value)?;
    xrpl::amount::validate_positive_amount(value).map_err(|e| e.for_field(field))?;
    Ok(value.to_string())
}

/// A 256-bit ledger identifier (transaction hash, check id, NFT id, offer id).
pub(crate) fn hash256(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = required(field, value)?;
    if value.len() != 64 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FormError::invalid(field, "expected 64 hexadecimal characters"));
    }
    Ok(value.to_ascii_uppercase())
}

/// Hex-encode free text for a ledger blob field, enforcing a byte limit.
pub(crate) fn hex_text(field: &'static str, value: &str, max_bytes: usize) -> Result<String, FormError> {
    let value = required(field, value)?;
    if value.len() > max_bytes {
        return Err(FormError::invalid(
            field,
            format!("must be at most {} bytes", max_bytes),
        ));
    }
    Ok(hex::encode_upper(value.as_bytes()))
}
