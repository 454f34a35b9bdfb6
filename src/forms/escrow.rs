//! Escrow forms: time-locked XRP.

use serde_json::{json, Map, Value};

use crate::backend::{endpoints, ApiRequest};
use crate::forms::check::minutes_from_now;
use crate::forms::{address, present, seed, xrp_drops, Form, FormError, Secret};

#[derive(Debug, Clone)]
pub struct CreateEscrow {
    pub seed: Secret,
    pub destination: String,
    pub amount: String,
    pub finish_after_minutes: u64,
    pub cancel_after_minutes: Option<u64>,
    pub destination_tag: Option<u32>,
}

impl Form for CreateEscrow {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let mut body = Map::new();
        body.insert("seed".into(), json!(seed(&self.seed)?));
        body.insert("destination".into(), json!(address("destination", &self.destination)?));
        body.insert("amount".into(), json!(xrp_drops("amount", &self.amount)?.to_string()));
        body.insert(
            "finish_after".into(),
            json!(minutes_from_now("finish_after", self.finish_after_minutes)?),
        );
        if let Some(cancel) = self.cancel_after_minutes {
            if cancel <= self.finish_after_minutes {
                return Err(FormError::invalid(
                    "cancel_after",
                    "must be later than finish_after",
                ));
            }
            body.insert("cancel_after".into(), json!(minutes_from_now("cancel_after", cancel)?));
        }
        if let Some(tag) = self.destination_tag {
            body.insert("destination_tag".into(), json!(tag));
        }
        Ok(ApiRequest::post(endpoints::ESCROW_CREATE, Value::Object(body)))
    }
}

/// Shared shape of finish and cancel: both reference the creating transaction.
#[derive(Debug, Clone)]
pub struct EscrowReference {
    pub seed: Secret,
    pub owner: String,
    pub offer_sequence: u32,
}

impl EscrowReference {
    fn body(&self) -> Result<Value, FormError> {
        Ok(json!({
            "seed": seed(&self.seed)?,
            "owner": address("owner", &self.owner)?,
            "offer_sequence": self.offer_sequence,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct FinishEscrow(pub EscrowReference);

impl Form for FinishEscrow {
    fn build(&self) -> Result<ApiRequest, FormError> {
        Ok(ApiRequest::post(endpoints::ESCROW_FINISH, self.0.body()?))
    }
}

#[derive(Debug, Clone)]
pub struct CancelEscrow(pub EscrowReference);

impl Form for CancelEscrow {
    fn build(&self) -> Result<ApiRequest, FormError> {
        Ok(ApiRequest::post(endpoints::ESCROW_CANCEL, self.0.body()?))
    }
}

#[derive(Debug, Clone)]
pub struct ListEscrows {
    pub address: String,
}

impl Form for ListEscrows {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let address = address("address", &self.address)?;
        Ok(ApiRequest::get(endpoints::escrow_list(&address)))
    }

    fn present(&self, result: Value) -> Value {
        present::annotate_ripple_times(present::annotate_drops(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";
    const DEST: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";

    fn escrow(finish: u64, cancel: Option<u64>) -> CreateEscrow {
        CreateEscrow {
            seed: Secret::new(SEED),
            destination: DEST.into(),
            amount: "100".into(),
            finish_after_minutes: finish,
            cancel_after_minutes: cancel,
            destination_tag: None,
        }
    }

    #[test]
    fn test_create_escrow_times() {
        let body = escrow(5, Some(60)).build().unwrap().body.unwrap();
        let finish = body["finish_after"].as_u64().unwrap();
        let cancel = body["cancel_after"].as_u64().unwrap();
        assert!(cancel > finish);
        assert_eq!(body["amount"], "100000000");
    }

    #[test]
    fn test_cancel_must_follow_finish() {
        let err = escrow(60, Some(60)).build().unwrap_err();
        assert!(err.to_string().starts_with("cancel_after:"));
        assert!(escrow(0, None).build().is_err());
    }

    #[test]
    fn test_finish_escrow_body() {
        let form = FinishEscrow(EscrowReference {
            seed: Secret::new(SEED),
            owner: DEST.into(),
            offer_sequence: 7,
        });
        let req = form.build().unwrap();
        assert_eq!(req.path.to_string(), endpoints::ESCROW_FINISH);
        assert_eq!(req.body.unwrap()["offer_sequence"], 7);
    }
}
