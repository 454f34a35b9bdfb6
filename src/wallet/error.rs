//! Wallet connection errors.

use thiserror::Error;

use crate::xrpl::XrplError;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid signing proxy URL: {0}")]
    InvalidUrl(String),

    #[error("Signing proxy unreachable: {0}")]
    Transport(String),

    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },

    #[error("Invalid signing service response: {0}")]
    InvalidResponse(String),

    /// The wallet reported a signer that is not a classic address.
    #[error("Signed account is invalid: {0}")]
    InvalidAccount(#[from] XrplError),

    #[error("Failed to render QR code: {0}")]
    Qr(String),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Wallet connection cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for WalletError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            WalletError::InvalidResponse(e.to_string())
        } else {
            WalletError::Transport(e.to_string())
        }
    }
}

impl From<std::io::Error> for WalletError {
    fn from(e: std::io::Error) -> Self {
        WalletError::Session(e.to_string())
    }
}

pub type WalletResult<T> = Result<T, WalletError>;
