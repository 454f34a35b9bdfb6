//! Ledger syntax error definitions.

use thiserror::Error;

/// Errors raised by client-side ledger syntax checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XrplError {
    /// Not a syntactically valid classic address.
    #[error("{field}: '{value}' is not a valid XRPL address")]
    InvalidAddress { field: String, value: String },

    /// Not a valid family seed. The value is never echoed back.
    #[error("{field}: not a valid XRPL secret seed")]
    InvalidSeed { field: String },

    /// Currency code is neither a standard nor a 160-bit hex code.
    #[error("{field}: invalid currency code '{value}' ({reason})")]
    InvalidCurrency {
        field: String,
        value: String,
        reason: &'static str,
    },

    /// Amount could not be parsed or is not strictly positive.
    #[error("{field}: invalid amount '{value}' ({reason})")]
    InvalidAmount {
        field: String,
        value: String,
        reason: &'static str,
    },

    /// Date outside what the ledger can represent.
    #[error("{field}: {reason}")]
    InvalidTime { field: String, reason: String },

    /// Malformed hex-encoded ledger field.
    #[error("{field}: invalid hex value '{value}'")]
    InvalidHex { field: String, value: String },
}

impl XrplError {
    /// Re-label the error with the form field it came from.
    pub fn for_field(self, name: &str) -> Self {
        let field = name.to_string();
        match self {
            XrplError::InvalidAddress { value, .. } => XrplError::InvalidAddress { field, value },
            XrplError::InvalidSeed { .. } => XrplError::InvalidSeed { field },
            XrplError::InvalidCurrency { value, reason, .. } => {
                XrplError::InvalidCurrency { field, value, reason }
            }
            XrplError::InvalidAmount { value, reason, .. } => {
                XrplError::InvalidAmount { field, value, reason }
            }
            XrplError::InvalidTime { reason, .. } => XrplError::InvalidTime { field, reason },
            XrplError::InvalidHex { value, .. } => XrplError::InvalidHex { field, value },
        }
    }
}

/// Result type for ledger syntax checks.
pub type XrplResult<T> = Result<T, XrplError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_error_hides_value() {
        let err = XrplError::InvalidSeed { field: "seed".into() };
        assert_eq!(err.to_string(), "seed: not a valid XRPL secret seed");
    }

    #[test]
    fn test_for_field_relabels() {
        let err = XrplError::InvalidAddress {
            field: "address".into(),
            value: "rBad".into(),
        }
        .for_field("destination");
        assert!(err.to_string().starts_with("destination:"));
    }
}
