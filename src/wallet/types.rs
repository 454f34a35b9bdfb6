//! Payload shapes returned by the wallet signing service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response to a payload creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPayload {
    pub uuid: Uuid,
    pub next: PayloadNext,
    #[serde(default)]
    pub refs: PayloadRefs,
}

impl CreatedPayload {
    /// URL the user opens (or scans) to review and sign.
    pub fn sign_url(&self) -> &str {
        &self.next.always
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadNext {
    pub always: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayloadRefs {
    #[serde(default)]
    pub qr_png: Option<String>,
    #[serde(default)]
    pub websocket_status: Option<String>,
}

/// Current state of a payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayloadStatus {
    #[serde(default)]
    pub meta: PayloadMeta,
    #[serde(default)]
    pub response: PayloadResponse,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayloadMeta {
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub signed: bool,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub expired: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayloadResponse {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub txid: Option<String>,
}

/// What the poll loop does with a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadState {
    Pending,
    Signed,
    Expired,
}

impl PayloadStatus {
    pub fn state(&self) -> PayloadState {
        if self.meta.signed {
            PayloadState::Signed
        } else if self.meta.expired || self.meta.cancelled {
            PayloadState::Expired
        } else {
            PayloadState::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_created_payload_parses() {
        let payload: CreatedPayload = serde_json::from_value(json!({
            "uuid": "0e6e5c3a-2a3b-4d2c-9f2e-4d7c1f3b9a10",
            "next": {"always": "https://xumm.app/sign/0e6e5c3a"},
            "refs": {"qr_png": "https://xumm.app/sign/0e6e5c3a_q.png"},
            "pushed": false
        }))
        .unwrap();
        assert_eq!(payload.sign_url(), "https://xumm.app/sign/0e6e5c3a");
        assert!(payload.refs.websocket_status.is_none());
    }

    #[test]
    fn test_status_states() {
        let pending: PayloadStatus = serde_json::from_value(json!({"meta": {"exists": true}})).unwrap();
        assert_eq!(pending.state(), PayloadState::Pending);

        let signed: PayloadStatus = serde_json::from_value(json!({
            "meta": {"exists": true, "resolved": true, "signed": true},
            "response": {"account": "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe"}
        }))
        .unwrap();
        assert_eq!(signed.state(), PayloadState::Signed);

        let cancelled: PayloadStatus = serde_json::from_value(json!({"meta": {"cancelled": true}})).unwrap();
        assert_eq!(cancelled.state(), PayloadState::Expired);
    }

    #[test]
    fn test_declined_payload_stays_pending() {
        let declined: PayloadStatus =
            serde_json::from_value(json!({"meta": {"resolved": true, "signed": false}})).unwrap();
        assert_eq!(declined.state(), PayloadState::Pending);
    }
}
