//! Backend route table.
//!
//! Fixed paths are constants; paths carrying user input are built by the
//! functions below as an [`Endpoint`], whose dynamic segments are
//! percent-encoded when the client joins them onto the base URL.

use std::fmt;

pub const ACCOUNT_CREATE: &str = "/api/account/create";
pub const TRUSTLINE_SET: &str = "/api/trustline/set";
pub const TRUSTLINE_REMOVE: &str = "/api/trustline/remove";
pub const PAYMENT_SEND_XRP: &str = "/api/payment/send-xrp";
pub const PAYMENT_SEND_TOKEN: &str = "/api/payment/send-token";
pub const CHECK_CREATE: &str = "/api/check/create";
pub const CHECK_CASH: &str = "/api/check/cash";
pub const CHECK_CANCEL: &str = "/api/check/cancel";
pub const ESCROW_CREATE: &str = "/api/escrow/create";
pub const ESCROW_FINISH: &str = "/api/escrow/finish";
pub const ESCROW_CANCEL: &str = "/api/escrow/cancel";
pub const NFT_MINT: &str = "/api/nft/mint";
pub const NFT_BURN: &str = "/api/nft/burn";
pub const NFT_OFFER_SELL: &str = "/api/nft/offer/sell";
pub const NFT_OFFER_BUY: &str = "/api/nft/offer/buy";
pub const NFT_OFFER_ACCEPT: &str = "/api/nft/offer/accept";
pub const NFT_OFFER_CANCEL: &str = "/api/nft/offer/cancel";
pub const ORACLE_SET: &str = "/api/oracle/set";
pub const ORACLE_DELETE: &str = "/api/oracle/delete";
pub const DID_SET: &str = "/api/did/set";
pub const DID_DELETE: &str = "/api/did/delete";
pub const OFFER_CREATE: &str = "/api/offer/create";
pub const OFFER_CANCEL: &str = "/api/offer/cancel";
pub const OFFER_BOOK: &str = "/api/offer/book";
pub const SERVER_INFO: &str = "/api/server/info";
pub const SERVER_FEE: &str = "/api/server/fee";
pub const LEDGER_INFO: &str = "/api/ledger/info";

/// A backend path as a list of raw segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
}

impl Endpoint {
    /// Split a fixed `/a/b/c` path into segments.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Append one segment; it may contain any character, `/` included.
    pub fn push(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl From<&str> for Endpoint {
    fn from(path: &str) -> Self {
        Endpoint::new(path)
    }
}

/// Unencoded, for logs and comparisons.
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

pub fn account_info(address: &str) -> Endpoint {
    Endpoint::new("/api/account/info").push(address)
}

pub fn account_transactions(address: &str) -> Endpoint {
    Endpoint::new("/api/account/transactions").push(address)
}

pub fn account_objects(address: &str) -> Endpoint {
    Endpoint::new("/api/account/objects").push(address)
}

pub fn trustline_list(address: &str) -> Endpoint {
    Endpoint::new("/api/trustline/list").push(address)
}

pub fn check_list(address: &str) -> Endpoint {
    Endpoint::new("/api/check/list").push(address)
}

pub fn escrow_list(address: &str) -> Endpoint {
    Endpoint::new("/api/escrow/list").push(address)
}

pub fn nft_list(address: &str) -> Endpoint {
    Endpoint::new("/api/nft/list").push(address)
}

pub fn nft_offers(nft_id: &str) -> Endpoint {
    Endpoint::new("/api/nft/offers").push(nft_id)
}

pub fn oracle(address: &str, document_id: u32) -> Endpoint {
    Endpoint::new("/api/oracle").push(address).push(document_id)
}

pub fn did(address: &str) -> Endpoint {
    Endpoint::new("/api/did").push(address)
}

pub fn offer_list(address: &str) -> Endpoint {
    Endpoint::new("/api/offer/list").push(address)
}

pub fn transaction(hash: &str) -> Endpoint {
    Endpoint::new("/api/transaction").push(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_paths() {
        assert_eq!(
            account_info("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh").to_string(),
            "/api/account/info/rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"
        );
        assert_eq!(oracle("rAbc", 7).to_string(), "/api/oracle/rAbc/7");
    }

    #[test]
    fn test_user_input_stays_one_segment() {
        let endpoint = did("a/b c");
        assert_eq!(endpoint.segments().collect::<Vec<_>>(), ["api", "did", "a/b c"]);
        assert_eq!(Endpoint::from(SERVER_INFO).segments().count(), 3);
    }
}
