//! Read-only network queries.

use serde_json::Value;

use crate::backend::{endpoints, ApiRequest};
use crate::forms::{hash256, present, Form, FormError};

const LEDGER_SHORTCUTS: &[&str] = &["validated", "current", "closed"];

#[derive(Debug, Clone, Default)]
pub struct ServerInfo;

impl Form for ServerInfo {
    fn build(&self) -> Result<ApiRequest, FormError> {
        Ok(ApiRequest::get(endpoints::SERVER_INFO))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Fee;

impl Form for Fee {
    fn build(&self) -> Result<ApiRequest, FormError> {
        Ok(ApiRequest::get(endpoints::SERVER_FEE))
    }
}

/// A ledger by index, or one of the `validated`/`current`/`closed` shortcuts.
#[derive(Debug, Clone, Default)]
pub struct LedgerInfo {
    pub index: Option<String>,
}

impl Form for LedgerInfo {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let request = ApiRequest::get(endpoints::LEDGER_INFO);
        let Some(index) = self.index.as_deref().map(str::trim) else {
            return Ok(request);
        };
        let numeric = !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit());
        if !numeric && !LEDGER_SHORTCUTS.contains(&index) {
            return Err(FormError::invalid(
                "ledger_index",
                "expected a number or validated, current, closed",
            ));
        }
        Ok(request.with_query("ledger_index", index))
    }

    fn present(&self, result: Value) -> Value {
        present::annotate_drops(result)
    }
}

#[derive(Debug, Clone)]
pub struct TransactionLookup {
    pub hash: String,
}

impl Form for TransactionLookup {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let hash = hash256("hash", &self.hash)?;
        Ok(ApiRequest::get(endpoints::transaction(&hash)))
    }

    fn present(&self, result: Value) -> Value {
        present::decode_currencies(present::annotate_drops(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_index_values() {
        let latest = LedgerInfo::default().build().unwrap();
        assert!(latest.query.is_empty());

        let by_number = LedgerInfo { index: Some("123".into()) }.build().unwrap();
        assert_eq!(by_number.query[0].1, "123");

        let shortcut = LedgerInfo { index: Some("validated".into()) }.build().unwrap();
        assert_eq!(shortcut.query[0].1, "validated");

        assert!(LedgerInfo { index: Some("latest".into()) }.build().is_err());
    }

    #[test]
    fn test_transaction_hash_uppercased() {
        let hash = "e3fe6ea3d48f0c2b639448020ea4f03d4f4f8ffdb243a852a0f59177921b4879";
        let req = TransactionLookup { hash: hash.into() }.build().unwrap();
        assert_eq!(req.path, endpoints::transaction(&hash.to_uppercase()));
    }
}
