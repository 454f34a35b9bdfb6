//! Trust line forms.

use serde_json::{json, Value};

use crate::backend::{endpoints, ApiRequest};
use crate::forms::{address, currency, present, seed, token_value, Form, FormError, Secret};

#[derive(Debug, Clone)]
pub struct SetTrustLine {
    pub seed: Secret,
    pub issuer: String,
    pub currency: String,
    pub limit: String,
}

impl Form for SetTrustLine {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let body = json!({
            "seed": seed(&self.seed)?,
            "issuer": address("issuer", &self.issuer)?,
            "currency": currency("currency", &self.currency)?,
            "limit": token_value("limit", &self.limit)?,
        });
        Ok(ApiRequest::post(endpoints::TRUSTLINE_SET, body))
    }
}

/// Sets the limit back to zero so the ledger can delete the line.
#[derive(Debug, Clone)]
pub struct RemoveTrustLine {
    pub seed: Secret,
    pub issuer: String,
    pub currency: String,
}

impl Form for RemoveTrustLine {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let body = json!({
            "seed": seed(&self.seed)?,
            "issuer": address("issuer", &self.issuer)?,
            "currency": currency("currency", &self.currency)?,
        });
        Ok(ApiRequest::post(endpoints::TRUSTLINE_REMOVE, body))
    }
}

#[derive(Debug, Clone)]
pub struct ListTrustLines {
    pub address: String,
}

impl Form for ListTrustLines {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let address = address("address", &self.address)?;
        Ok(ApiRequest::get(endpoints::trustline_list(&address)))
    }

    fn present(&self, result: Value) -> Value {
        present::decode_currencies(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";
    const ISSUER: &str = "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH";

    #[test]
    fn test_set_trust_line_body() {
        let form = SetTrustLine {
            seed: Secret::new(SEED),
            issuer: ISSUER.into(),
            currency: "SOLO".into(),
            limit: "1000".into(),
        };
        let req = form.build().unwrap();
        let body = req.body.unwrap();
        assert_eq!(body["currency"], "534F4C4F00000000000000000000000000000000");
        assert_eq!(body["limit"], "1000");
        assert_eq!(body["issuer"], ISSUER);
    }

    #[test]
    fn test_set_trust_line_rejects_zero_limit() {
        let form = SetTrustLine {
            seed: Secret::new(SEED),
            issuer: ISSUER.into(),
            currency: "USD".into(),
            limit: "0".into(),
        };
        let err = form.build().unwrap_err();
        assert!(err.to_string().starts_with("limit:"));
    }

    #[test]
    fn test_remove_requires_valid_seed() {
        let form = RemoveTrustLine {
            seed: Secret::new("garbage"),
            issuer: ISSUER.into(),
            currency: "USD".into(),
        };
        assert!(matches!(form.build(), Err(FormError::Xrpl(_))));
    }
}
