//! DEX offer forms.

use serde_json::{json, Map, Value};

use crate::backend::{endpoints, ApiRequest};
use crate::forms::check::minutes_from_now;
use crate::forms::{address, present, seed, Asset, AssetId, Form, FormError, Secret};

#[derive(Debug, Clone)]
pub struct CreateOffer {
    pub seed: Secret,
    pub taker_gets: Asset,
    pub taker_pays: Asset,
    pub expires_in_minutes: Option<u64>,
}

impl Form for CreateOffer {
    fn build(&self) -> Result<ApiRequest, FormError> {
        if self.taker_gets.is_xrp() && self.taker_pays.is_xrp() {
            return Err(FormError::invalid("taker_pays", "cannot trade XRP for XRP"));
        }
        let mut body = Map::new();
        body.insert("seed".into(), json!(seed(&self.seed)?));
        body.insert("taker_gets".into(), self.taker_gets.to_amount("taker_gets")?);
        body.insert("taker_pays".into(), self.taker_pays.to_amount("taker_pays")?);
        if let Some(minutes) = self.expires_in_minutes {
            body.insert("expiration".into(), json!(minutes_from_now("expiration", minutes)?));
        }
        Ok(ApiRequest::post(endpoints::OFFER_CREATE, Value::Object(body)))
    }
}

#[derive(Debug, Clone)]
pub struct CancelOffer {
    pub seed: Secret,
    pub offer_sequence: u32,
}

impl Form for CancelOffer {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let body = json!({ "seed": seed(&self.seed)?, "offer_sequence": self.offer_sequence });
        Ok(ApiRequest::post(endpoints::OFFER_CANCEL, body))
    }
}

#[derive(Debug, Clone)]
pub struct ListOffers {
    pub address: String,
}

impl Form for ListOffers {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let address = address("address", &self.address)?;
        Ok(ApiRequest::get(endpoints::offer_list(&address)))
    }

    fn present(&self, result: Value) -> Value {
        present::decode_currencies(present::annotate_ripple_times(present::annotate_drops(result)))
    }
}

#[derive(Debug, Clone)]
pub struct OrderBook {
    pub taker_gets: AssetId,
    pub taker_pays: AssetId,
}

impl Form for OrderBook {
    fn build(&self) -> Result<ApiRequest, FormError> {
        if self.taker_gets == AssetId::Xrp && self.taker_pays == AssetId::Xrp {
            return Err(FormError::invalid("taker_pays", "cannot trade XRP for XRP"));
        }
        let mut request = ApiRequest::get(endpoints::OFFER_BOOK);
        for (side, asset) in [("taker_gets", &self.taker_gets), ("taker_pays", &self.taker_pays)] {
            let json = asset.to_json(side)?;
            if let Some(code) = json["currency"].as_str() {
                request = request.with_query(&format!("{}_currency", side), code);
            }
            if let Some(issuer) = json["issuer"].as_str() {
                request = request.with_query(&format!("{}_issuer", side), issuer);
            }
        }
        Ok(request)
    }

    fn present(&self, result: Value) -> Value {
        present::decode_currencies(present::annotate_drops(result))
    }
}
