//! Check forms: deferred payments the destination cashes later.

use chrono::Duration;
use serde_json::{json, Map, Value};

use crate::backend::{endpoints, ApiRequest};
use crate::forms::{address, hash256, present, seed, Asset, Form, FormError, Secret};
use crate::xrpl::time::ripple_time_after;

#[derive(Debug, Clone)]
pub struct CreateCheck {
    pub seed: Secret,
    pub destination: String,
    pub send_max: Asset,
    pub expires_in_minutes: Option<u64>,
}

impl Form for CreateCheck {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let mut body = Map::new();
        body.insert("seed".into(), json!(seed(&self.seed)?));
        body.insert("destination".into(), json!(address("destination", &self.destination)?));
        body.insert("send_max".into(), self.send_max.to_amount("send_max")?);
        if let Some(minutes) = self.expires_in_minutes {
            body.insert("expiration".into(), json!(minutes_from_now("expiration", minutes)?));
        }
        Ok(ApiRequest::post(endpoints::CHECK_CREATE, Value::Object(body)))
    }
}

#[derive(Debug, Clone)]
pub struct CashCheck {
    pub seed: Secret,
    pub check_id: String,
    pub amount: Asset,
}

impl Form for CashCheck {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let body = json!({
            "seed": seed(&self.seed)?,
            "check_id": hash256("check_id", &self.check_id)?,
            "amount": self.amount.to_amount("amount")?,
        });
        Ok(ApiRequest::post(endpoints::CHECK_CASH, body))
    }
}

#[derive(Debug, Clone)]
pub struct CancelCheck {
    pub seed: Secret,
    pub check_id: String,
}

impl Form for CancelCheck {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let body = json!({
            "seed": seed(&self.seed)?,
            "check_id": hash256("check_id", &self.check_id)?,
        });
        Ok(ApiRequest::post(endpoints::CHECK_CANCEL, body))
    }
}

#[derive(Debug, Clone)]
pub struct ListChecks {
    pub address: String,
}

impl Form for ListChecks {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let address = address("address", &self.address)?;
        Ok(ApiRequest::get(endpoints::check_list(&address)))
    }

    fn present(&self, result: Value) -> Value {
        present::annotate_ripple_times(present::decode_currencies(present::annotate_drops(result)))
    }
}

/// Ripple time `minutes` from now.
pub(crate) fn minutes_from_now(field: &'static str, minutes: u64) -> Result<u32, FormError> {
    if minutes == 0 {
        return Err(FormError::invalid(field, "must be at least one minute in the future"));
    }
    let minutes = i64::try_from(minutes).map_err(|_| FormError::invalid(field, "too far in the future"))?;
    let offset = Duration::try_minutes(minutes).ok_or_else(|| FormError::invalid(field, "too far in the future"))?;
    ripple_time_after(offset).map_err(|e| e.for_field(field).into())
}
