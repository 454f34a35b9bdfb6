//! Price oracle value encoding.
//!
//! The ledger stores an `AssetPrice` as a hex-encoded unsigned 64-bit
//! mantissa next to a decimal `Scale`; the displayed price is
//! `mantissa / 10^scale`.

use crate::xrpl::amount::split_decimal;
use crate::xrpl::types::{XrplError, XrplResult};

/// Largest scale the ledger accepts for a price entry.
pub const MAX_PRICE_SCALE: u8 = 10;

/// Decode a hex `AssetPrice` and scale into an exact decimal string.
pub fn decode_asset_price(hex_price: &str, scale: u8) -> XrplResult<String> {
    let invalid = || XrplError::InvalidHex {
        field: "asset_price".to_string(),
        value: hex_price.to_string(),
    };

    let digits = hex_price
        .strip_prefix("0x")
        .or_else(|| hex_price.strip_prefix("0X"))
        .unwrap_or(hex_price);
    if digits.is_empty() || digits.len() > 16 {
        return Err(invalid());
    }
    let mantissa = u64::from_str_radix(digits, 16).map_err(|_| invalid())?;

    if scale > MAX_PRICE_SCALE {
        return Err(XrplError::InvalidAmount {
            field: "scale".to_string(),
            value: scale.to_string(),
            reason: "scale must be at most 10",
        });
    }
    Ok(shift_decimal(mantissa, scale))
}

/// Encode a decimal price as (hex mantissa, scale).
pub fn encode_asset_price(price: &str) -> XrplResult<(String, u8)> {
    let invalid = |reason| XrplError::InvalidAmount {
        field: "price".to_string(),
        value: price.to_string(),
        reason,
    };

    let (whole, fraction) = split_decimal(price.trim()).ok_or_else(|| invalid("not a number"))?;
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > MAX_PRICE_SCALE as usize {
        return Err(invalid("more than 10 decimal places"));
    }

    let mantissa: u64 = format!("{}{}", whole, fraction)
        .trim_start_matches('0')
        .parse()
        .map_err(|_| invalid("must be greater than zero and fit in 64 bits"))?;
    if mantissa == 0 {
        return Err(invalid("must be greater than zero"));
    }

    Ok((format!("{:X}", mantissa), fraction.len() as u8))
}

fn shift_decimal(mantissa: u64, scale: u8) -> String {
    if scale == 0 {
        return mantissa.to_string();
    }
    let scale = scale as usize;
    let digits = format!("{:0>width$}", mantissa, width = scale + 1);
    let (whole, fraction) = digits.split_at(digits.len() - scale);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}
