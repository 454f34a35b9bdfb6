//! Currency code syntax.
//!
//! # Formats
//! - Standard: exactly three characters from the ISO-like set (`XRP` reserved)
//! - Non-standard: 40 hex characters (160 bits), first byte non-zero
//!
//! Longer human-readable names (4..=20 chars) are hex-encoded and zero-padded
//! before they reach the backend.

use std::fmt;

use crate::xrpl::types::{XrplError, XrplResult};

const STANDARD_SYMBOLS: &str = "?!@#$%^&*<>(){}[]|";
const HEX_CODE_LEN: usize = 40;
const MAX_NAME_LEN: usize = 20;

/// A validated currency code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyCode {
    /// Three-character code, e.g. `USD`.
    Standard(String),
    /// 160-bit code as 40 upper-case hex characters.
    Hex(String),
}

impl CurrencyCode {
    /// The code in the form the ledger expects.
    pub fn as_str(&self) -> &str {
        match self {
            CurrencyCode::Standard(code) | CurrencyCode::Hex(code) => code,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a currency code exactly as it will be sent to the ledger.
pub fn validate_currency_code(code: &str) -> XrplResult<CurrencyCode> {
    let invalid = |reason| XrplError::InvalidCurrency {
        field: "currency".to_string(),
        value: code.to_string(),
        reason,
    };

    if code.len() == 3 {
        if code == "XRP" {
            return Err(invalid("XRP is the native asset and cannot be issued"));
        }
        let allowed = code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || STANDARD_SYMBOLS.contains(c));
        if !allowed {
            return Err(invalid("unsupported character"));
        }
        return Ok(CurrencyCode::Standard(code.to_string()));
    }

    if code.len() == HEX_CODE_LEN {
        if !code.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("160-bit codes must be hexadecimal"));
        }
        if code.starts_with("00") {
            return Err(invalid("160-bit codes must not start with 0x00"));
        }
        return Ok(CurrencyCode::Hex(code.to_ascii_uppercase()));
    }

    Err(invalid("expected 3 characters or 40 hex digits"))
}

/// Turn user input into a ledger currency code.
pub fn encode_currency(input: &str) -> XrplResult<CurrencyCode> {
    let name = input.trim();
    if name.len() == 3 || name.len() == HEX_CODE_LEN {
        return validate_currency_code(name);
    }

    let printable = name.bytes().all(|b| b.is_ascii_graphic() || b == b' ');
    if (4..=MAX_NAME_LEN).contains(&name.len()) && printable {
        let mut encoded = hex::encode_upper(name.as_bytes());
        encoded.push_str(&"0".repeat(HEX_CODE_LEN - encoded.len()));
        return Ok(CurrencyCode::Hex(encoded));
    }

    Err(XrplError::InvalidCurrency {
        field: "currency".to_string(),
        value: input.to_string(),
        reason: "names must be 3 to 20 printable characters",
    })
}

/// Best-effort human form of a currency code returned by the ledger.
pub fn decode_currency(code: &str) -> String {
    if code.len() != HEX_CODE_LEN {
        return code.to_string();
    }
    let Ok(bytes) = hex::decode(code) else {
        return code.to_string();
    };

    let trimmed: Vec<u8> = bytes
        .iter()
        .copied()
        .rev()
        .skip_while(|b| *b == 0)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if !trimmed.is_empty() && trimmed.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        String::from_utf8(trimmed).unwrap_or_else(|_| code.to_string())
    } else {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_codes() {
        assert_eq!(
            validate_currency_code("USD").unwrap(),
            CurrencyCode::Standard("USD".into())
        );
        assert!(validate_currency_code("eur").is_ok());
        assert!(validate_currency_code("$$$").is_ok());
        assert!(validate_currency_code("XRP").is_err());
        assert!(validate_currency_code("U D").is_err());
        assert!(validate_currency_code("US").is_err());
    }

    #[test]
    fn test_hex_codes() {
        let code = "534f4c4f00000000000000000000000000000000";
        assert_eq!(
            validate_currency_code(code).unwrap().as_str(),
            "534F4C4F00000000000000000000000000000000"
        );
        assert!(validate_currency_code("0000000000000000000000005553440000000000").is_err());
        assert!(validate_currency_code("Z34F4C4F00000000000000000000000000000000").is_err());
    }

    #[test]
    fn test_encode_long_names() {
        let code = encode_currency("SOLO").unwrap();
        assert_eq!(code.as_str(), "534F4C4F00000000000000000000000000000000");
        assert_eq!(encode_currency(" USD ").unwrap().as_str(), "USD");
        assert!(encode_currency("THIS NAME IS FAR TOO LONG").is_err());
        assert!(encode_currency("AB").is_err());
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_currency("534F4C4F00000000000000000000000000000000"), "SOLO");
        assert_eq!(decode_currency("USD"), "USD");
        let opaque = "0158415500000000C1F76FF6ECB0BAC600000000";
        assert_eq!(decode_currency(opaque), opaque);
    }
}
