//! XRP / drops conversion and issued-currency value checks.
//!
//! All arithmetic is done on integers so that `1.1` XRP is exactly
//! `1_100_000` drops.

use crate::xrpl::types::{XrplError, XrplResult};

/// Drops in one XRP.
pub const DROPS_PER_XRP: u64 = 1_000_000;

/// Total XRP supply expressed in drops.
pub const MAX_XRP_DROPS: u64 = 100_000_000_000 * DROPS_PER_XRP;

const XRP_DECIMALS: usize = 6;
const MAX_TOKEN_DIGITS: usize = 16;

/// Parse a positive XRP amount into drops.
pub fn xrp_to_drops(xrp: &str) -> XrplResult<u64> {
    let invalid = |reason| XrplError::InvalidAmount {
        field: "amount".to_string(),
        value: xrp.to_string(),
        reason,
    };

    let (whole, fraction) = split_decimal(xrp.trim()).ok_or_else(|| invalid("not a number"))?;
    if fraction.len() > XRP_DECIMALS {
        return Err(invalid("XRP has at most 6 decimal places"));
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("exceeds total XRP supply"))?
    };
    let padded = format!("{:0<width$}", fraction, width = XRP_DECIMALS);
    let fraction: u64 = padded.parse().map_err(|_| invalid("not a number"))?;

    let drops = whole
        .checked_mul(DROPS_PER_XRP)
        .and_then(|d| d.checked_add(fraction))
        .ok_or_else(|| invalid("exceeds total XRP supply"))?;

    if drops == 0 {
        return Err(invalid("must be greater than zero"));
    }
    if drops > MAX_XRP_DROPS {
        return Err(invalid("exceeds total XRP supply"));
    }
    Ok(drops)
}

/// Render drops as an exact XRP decimal.
pub fn drops_to_xrp(drops: u64) -> String {
    let whole = drops / DROPS_PER_XRP;
    let fraction = drops % DROPS_PER_XRP;
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{:06}", fraction);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Convert the string-encoded drops used in ledger JSON.
pub fn drops_str_to_xrp(drops: &str) -> XrplResult<String> {
    drops
        .trim()
        .parse::<u64>()
        .map(drops_to_xrp)
        .map_err(|_| XrplError::InvalidAmount {
            field: "drops".to_string(),
            value: drops.to_string(),
            reason: "not an integer number of drops",
        })
}

/// Check an issued-currency value: a plain decimal strictly above zero.
pub fn validate_positive_amount(value: &str) -> XrplResult<()> {
    let invalid = |reason| XrplError::InvalidAmount {
        field: "amount".to_string(),
        value: value.to_string(),
        reason,
    };

    let (whole, fraction) = split_decimal(value.trim()).ok_or_else(|| invalid("not a number"))?;
    let digits = format!("{}{}", whole, fraction);
    let significant = digits.trim_start_matches('0');
    if significant.trim_end_matches('0').is_empty() {
        return Err(invalid("must be greater than zero"));
    }
    if significant.trim_end_matches('0').len() > MAX_TOKEN_DIGITS {
        return Err(invalid("more than 16 significant digits"));
    }
    Ok(())
}

/// Split an unsigned decimal into its whole and fractional digit runs.
///
/// Returns `None` for signs, exponents, empty input or stray characters.
pub(crate) fn split_decimal(value: &str) -> Option<(&str, &str)> {
    let (whole, fraction) = match value.split_once('.') {
        Some((w, f)) => (w, f),
        None => (value, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return None;
    }
    Some((whole, fraction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xrp_to_drops() {
        assert_eq!(xrp_to_drops("1").unwrap(), 1_000_000);
        assert_eq!(xrp_to_drops("1.1").unwrap(), 1_100_000);
        assert_eq!(xrp_to_drops("0.000001").unwrap(), 1);
        assert_eq!(xrp_to_drops(".5").unwrap(), 500_000);
        assert_eq!(xrp_to_drops(" 25 ").unwrap(), 25_000_000);
        assert_eq!(xrp_to_drops("100000000000").unwrap(), MAX_XRP_DROPS);
    }

    #[test]
    fn test_xrp_to_drops_rejects() {
        for bad in ["0", "0.0", "-1", "1e3", "abc", "", ".", "1.0000001", "100000000000.000001"] {
            assert!(xrp_to_drops(bad).is_err(), "{} should be rejected", bad);
        }
        assert!(xrp_to_drops("99999999999999999999999").is_err());
    }

    #[test]
    fn test_drops_to_xrp() {
        assert_eq!(drops_to_xrp(0), "0");
        assert_eq!(drops_to_xrp(1), "0.000001");
        assert_eq!(drops_to_xrp(1_500_000), "1.5");
        assert_eq!(drops_to_xrp(20_000_000), "20");
        assert_eq!(drops_str_to_xrp("123456789").unwrap(), "123.456789");
        assert!(drops_str_to_xrp("12.5").is_err());
    }

    #[test]
    fn test_positive_amount() {
        assert!(validate_positive_amount("10").is_ok());
        assert!(validate_positive_amount("0.0001").is_ok());
        assert!(validate_positive_amount("1000000.5").is_ok());
        assert!(validate_positive_amount("0").is_err());
        assert!(validate_positive_amount("0.000").is_err());
        assert!(validate_positive_amount("-5").is_err());
        assert!(validate_positive_amount("12345678901234567").is_err());
        assert!(validate_positive_amount("1e5").is_err());
    }
}
