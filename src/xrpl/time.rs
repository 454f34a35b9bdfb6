//! Ripple epoch time conversion.

use chrono::{DateTime, Duration, Utc};

use crate::xrpl::types::{XrplError, XrplResult};

/// Seconds between the Unix epoch and 2000-01-01T00:00:00Z.
pub const RIPPLE_EPOCH_OFFSET: i64 = 946_684_800;

/// Convert a UTC timestamp to seconds since the Ripple epoch.
pub fn to_ripple_time(at: DateTime<Utc>) -> XrplResult<u32> {
    let seconds = at.timestamp() - RIPPLE_EPOCH_OFFSET;
    u32::try_from(seconds).map_err(|_| XrplError::InvalidTime {
        field: "time".to_string(),
        reason: format!("{} is outside the ledger's time range", at.to_rfc3339()),
    })
}

/// Convert seconds since the Ripple epoch to UTC.
pub fn from_ripple_time(seconds: u32) -> DateTime<Utc> {
    DateTime::from_timestamp(RIPPLE_EPOCH_OFFSET + i64::from(seconds), 0).unwrap_or_default()
}

/// Ripple time `offset` from now.
pub fn ripple_time_after(offset: Duration) -> XrplResult<u32> {
    if offset <= Duration::zero() {
        return Err(XrplError::InvalidTime {
            field: "time".to_string(),
            reason: "offset must be in the future".to_string(),
        });
    }
    let at = Utc::now()
        .checked_add_signed(offset)
        .ok_or_else(|| XrplError::InvalidTime {
            field: "time".to_string(),
            reason: "too far in the future".to_string(),
        })?;
    to_ripple_time(at)
}
