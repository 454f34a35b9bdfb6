//! Payment forms.

use serde_json::{json, Map, Value};

use crate::backend::{endpoints, ApiRequest};
use crate::forms::{address, currency, required, seed, token_value, xrp_drops, Form, FormError, Secret};

const MAX_MEMO_BYTES: usize = 1024;

#[derive(Debug, Clone)]
pub struct SendXrp {
    pub seed: Secret,
    pub destination: String,
    pub amount: String,
    pub destination_tag: Option<u32>,
    pub memo: Option<String>,
}

impl Form for SendXrp {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let mut body = Map::new();
        body.insert("seed".into(), json!(seed(&self.seed)?));
        body.insert("destination".into(), json!(address("destination", &self.destination)?));
        body.insert("amount".into(), json!(xrp_drops("amount", &self.amount)?.to_string()));
        optional_fields(&mut body, self.destination_tag, self.memo.as_deref())?;
        Ok(ApiRequest::post(endpoints::PAYMENT_SEND_XRP, Value::Object(body)))
    }
}

/// Issued-currency payment; the sender needs a trust line or must be the issuer.
#[derive(Debug, Clone)]
pub struct SendToken {
    pub seed: Secret,
    pub destination: String,
    pub currency: String,
    pub issuer: String,
    pub amount: String,
    pub destination_tag: Option<u32>,
    pub memo: Option<String>,
}

impl Form for SendToken {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let mut body = Map::new();
        body.insert("seed".into(), json!(seed(&self.seed)?));
        body.insert("destination".into(), json!(address("destination", &self.destination)?));
        body.insert(
            "amount".into(),
            json!({
                "currency": currency("currency", &self.currency)?,
                "issuer": address("issuer", &self.issuer)?,
                "value": token_value("amount", &self.amount)?,
            }),
        );
        optional_fields(&mut body, self.destination_tag, self.memo.as_deref())?;
        Ok(ApiRequest::post(endpoints::PAYMENT_SEND_TOKEN, Value::Object(body)))
    }
}

fn optional_fields(
    body: &mut Map<String, Value>,
    destination_tag: Option<u32>,
    memo: Option<&str>,
) -> Result<(), FormError> {
    if let Some(tag) = destination_tag {
        body.insert("destination_tag".into(), json!(tag));
    }
    if let Some(memo) = memo {
        let memo = required("memo", memo)?;
        if memo.len() > MAX_MEMO_BYTES {
            return Err(FormError::invalid("memo", format!("must be at most {} bytes", MAX_MEMO_BYTES)));
        }
        body.insert("memo".into(), json!(memo));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";
    const DEST: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";

    fn send_xrp(amount: &str) -> SendXrp {
        SendXrp {
            seed: Secret::new(SEED),
            destination: DEST.into(),
            amount: amount.into(),
            destination_tag: Some(12),
            memo: None,
        }
    }

    #[test]
    fn test_send_xrp_converts_to_drops() {
        let req = send_xrp("2.5").build().unwrap();
        assert_eq!(req.path.to_string(), endpoints::PAYMENT_SEND_XRP);
        let body = req.body.unwrap();
        assert_eq!(body["amount"], "2500000");
        assert_eq!(body["destination_tag"], 12);
        assert!(body.get("memo").is_none());
    }

    #[test]
    fn test_send_xrp_rejects_non_positive() {
        assert!(send_xrp("0").build().is_err());
        assert!(send_xrp("-3").build().is_err());
    }

    #[test]
    fn test_send_token_body() {
        let form = SendToken {
            seed: Secret::new(SEED),
            destination: DEST.into(),
            currency: "USD".into(),
            issuer: "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH".into(),
            amount: "12.75".into(),
            destination_tag: None,
            memo: Some("rent".into()),
        };
        let body = form.build().unwrap().body.unwrap();
        assert_eq!(body["amount"]["value"], "12.75");
        assert_eq!(body["amount"]["currency"], "USD");
        assert_eq!(body["memo"], "rent");
    }
}
