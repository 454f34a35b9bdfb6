//! Account forms: creation, info, history and owned objects.

use serde_json::{json, Value};

use crate::backend::{endpoints, ApiRequest};
use crate::forms::{address, present, Form, FormError};

const MAX_TRANSACTIONS: u32 = 400;

const OBJECT_TYPES: &[&str] = &[
    "check",
    "deposit_preauth",
    "did",
    "escrow",
    "nft_offer",
    "nft_page",
    "offer",
    "oracle",
    "payment_channel",
    "signer_list",
    "state",
    "ticket",
];

/// Ask the backend to generate and fund a new account.
#[derive(Debug, Clone, Default)]
pub struct CreateAccount;

impl Form for CreateAccount {
    fn build(&self) -> Result<ApiRequest, FormError> {
        Ok(ApiRequest::post(endpoints::ACCOUNT_CREATE, json!({})))
    }

    fn present(&self, result: Value) -> Value {
        present::annotate_drops(result)
    }
}

#[derive(Debug, Clone)]
pub struct AccountInfo {
    pub address: String,
}

impl Form for AccountInfo {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let address = address("address", &self.address)?;
        Ok(ApiRequest::get(endpoints::account_info(&address)))
    }

    fn present(&self, result: Value) -> Value {
        present::annotate_drops(result)
    }
}

#[derive(Debug, Clone)]
pub struct AccountTransactions {
    pub address: String,
    pub limit: Option<u32>,
}

impl Form for AccountTransactions {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let address = address("address", &self.address)?;
        let mut request = ApiRequest::get(endpoints::account_transactions(&address));
        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_TRANSACTIONS {
                return Err(FormError::invalid(
                    "limit",
                    format!("must be between 1 and {}", MAX_TRANSACTIONS),
                ));
            }
            request = request.with_query("limit", limit);
        }
        Ok(request)
    }

    fn present(&self, result: Value) -> Value {
        present::decode_currencies(present::annotate_drops(result))
    }
}

#[derive(Debug, Clone)]
pub struct AccountObjects {
    pub address: String,
    pub object_type: Option<String>,
}

impl Form for AccountObjects {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let address = address("address", &self.address)?;
        let mut request = ApiRequest::get(endpoints::account_objects(&address));
        if let Some(kind) = &self.object_type {
            let kind = kind.trim().to_ascii_lowercase();
            if !OBJECT_TYPES.contains(&kind.as_str()) {
                return Err(FormError::invalid(
                    "type",
                    format!("unknown object type; expected one of {}", OBJECT_TYPES.join(", ")),
                ));
            }
            request = request.with_query("type", kind);
        }
        Ok(request)
    }

    fn present(&self, result: Value) -> Value {
        present::annotate_ripple_times(present::decode_currencies(present::annotate_drops(result)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    #[test]
    fn test_account_info_request() {
        let req = AccountInfo { address: ADDRESS.into() }.build().unwrap();
        assert_eq!(req.path.to_string(), format!("/api/account/info/{}", ADDRESS));
    }

    #[test]
    fn test_account_info_presents_xrp_balance() {
        let form = AccountInfo { address: ADDRESS.into() };
        let shown = form.present(json!({"account_data": {"Balance": "99999999000000"}}));
        assert_eq!(shown["account_data"]["BalanceXRP"], "99999999");
    }

    #[test]
    fn test_transactions_limit_bounds() {
        let form = AccountTransactions { address: ADDRESS.into(), limit: Some(0) };
        assert!(form.build().is_err());
        let form = AccountTransactions { address: ADDRESS.into(), limit: Some(20) };
        assert_eq!(form.build().unwrap().query, vec![("limit".to_string(), "20".to_string())]);
    }

    #[test]
    fn test_object_type_filter() {
        let form = AccountObjects { address: ADDRESS.into(), object_type: Some("Escrow".into()) };
        assert_eq!(form.build().unwrap().query[0].1, "escrow");
        let form = AccountObjects { address: ADDRESS.into(), object_type: Some("widgets".into()) };
        assert!(form.build().is_err());
    }
}
