//! Price oracle forms.

use std::str::FromStr;

use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::backend::{endpoints, ApiRequest};
use crate::forms::{address, currency, hex_text, present, seed, Form, FormError, Secret};
use crate::xrpl::oracle::encode_asset_price;

const MAX_PROVIDER_BYTES: usize = 256;
const MAX_ASSET_CLASS_BYTES: usize = 16;
const MAX_URI_BYTES: usize = 256;
const MAX_PRICE_ENTRIES: usize = 10;

/// One `BASE/QUOTE=price` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceEntry {
    pub base: String,
    pub quote: String,
    pub price: String,
}

impl FromStr for PriceEntry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || format!("expected BASE/QUOTE=PRICE, got '{}'", s);
        let (pair, price) = s.split_once('=').ok_or_else(malformed)?;
        let (base, quote) = pair.split_once('/').ok_or_else(malformed)?;
        Ok(PriceEntry {
            base: base.trim().to_string(),
            quote: quote.trim().to_string(),
            price: price.trim().to_string(),
        })
    }
}

impl PriceEntry {
    fn to_series(&self) -> Result<Value, FormError> {
        let (asset_price, scale) =
            encode_asset_price(&self.price).map_err(|e| e.for_field("price"))?;
        Ok(json!({
            "PriceData": {
                "BaseAsset": oracle_asset("base_asset", &self.base)?,
                "QuoteAsset": oracle_asset("quote_asset", &self.quote)?,
                "AssetPrice": asset_price,
                "Scale": scale,
            }
        }))
    }
}

/// Oracles may quote XRP, which is not a valid issued-currency code.
fn oracle_asset(field: &'static str, value: &str) -> Result<String, FormError> {
    if value.trim().eq_ignore_ascii_case("XRP") {
        return Ok("XRP".to_string());
    }
    currency(field, value)
}

#[derive(Debug, Clone)]
pub struct SetOracle {
    pub seed: Secret,
    pub document_id: u32,
    pub provider: String,
    pub asset_class: String,
    pub uri: Option<String>,
    pub prices: Vec<PriceEntry>,
}

impl Form for SetOracle {
    fn build(&self) -> Result<ApiRequest, FormError> {
        if self.prices.is_empty() {
            return Err(FormError::Missing { field: "prices" });
        }
        if self.prices.len() > MAX_PRICE_ENTRIES {
            return Err(FormError::invalid("prices", "at most 10 price entries"));
        }
        let series = self
            .prices
            .iter()
            .map(PriceEntry::to_series)
            .collect::<Result<Vec<_>, _>>()?;

        let mut body = Map::new();
        body.insert("seed".into(), json!(seed(&self.seed)?));
        body.insert("document_id".into(), json!(self.document_id));
        body.insert(
            "provider".into(),
            json!(hex_text("provider", &self.provider, MAX_PROVIDER_BYTES)?),
        );
        body.insert(
            "asset_class".into(),
            json!(hex_text("asset_class", &self.asset_class, MAX_ASSET_CLASS_BYTES)?),
        );
        if let Some(uri) = &self.uri {
            body.insert("uri".into(), json!(hex_text("uri", uri, MAX_URI_BYTES)?));
        }
        body.insert("last_update_time".into(), json!(Utc::now().timestamp()));
        body.insert("price_data_series".into(), Value::Array(series));
        Ok(ApiRequest::post(endpoints::ORACLE_SET, Value::Object(body)))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteOracle {
    pub seed: Secret,
    pub document_id: u32,
}

impl Form for DeleteOracle {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let body = json!({ "seed": seed(&self.seed)?, "document_id": self.document_id });
        Ok(ApiRequest::delete(endpoints::ORACLE_DELETE, body))
    }
}

#[derive(Debug, Clone)]
pub struct GetOracle {
    pub address: String,
    pub document_id: u32,
}

impl Form for GetOracle {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let address = address("address", &self.address)?;
        Ok(ApiRequest::get(endpoints::oracle(&address, self.document_id)))
    }

    fn present(&self, result: Value) -> Value {
        let result = present::annotate_oracle_prices(result);
        let result = present::decode_currencies(result);
        present::annotate_hex_text(result, &["Provider", "AssetClass", "URI"])
    }
}
