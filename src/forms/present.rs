//! Display-side conversions applied to backend results.
//!
//! Every helper walks the whole JSON tree, so it works regardless of how
//! deeply the backend nests ledger objects. Decoded values are added next to
//! the raw fields, except currency codes, which are replaced in place.

use serde_json::{Map, Value};

use crate::xrpl::amount::drops_str_to_xrp;
use crate::xrpl::currency::decode_currency;
use crate::xrpl::oracle::decode_asset_price;
use crate::xrpl::time::from_ripple_time;

const DROPS_FIELDS: &[&str] = &["Balance", "Amount", "SendMax", "Fee", "DeliverMax", "TakerGets", "TakerPays"];
const CURRENCY_FIELDS: &[&str] = &["currency", "Currency", "BaseAsset", "QuoteAsset"];
const RIPPLE_TIME_FIELDS: &[&str] = &["FinishAfter", "CancelAfter", "Expiration"];

/// Apply `f` to every JSON object in the tree.
pub fn walk_objects(value: &mut Value, f: &mut dyn FnMut(&mut Map<String, Value>)) {
    match value {
        Value::Object(map) => {
            f(map);
            for child in map.values_mut() {
                walk_objects(child, f);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_objects(item, f);
            }
        }
        _ => {}
    }
}

/// Add `<Field>XRP` next to string-encoded drop amounts.
pub fn annotate_drops(mut value: Value) -> Value {
    walk_objects(&mut value, &mut |map: &mut Map<String, Value>| {
        for field in DROPS_FIELDS {
            let converted = map
                .get(*field)
                .and_then(Value::as_str)
                .and_then(|drops| drops_str_to_xrp(drops).ok());
            if let Some(xrp) = converted {
                map.insert(format!("{}XRP", field), Value::String(xrp));
            }
        }
    });
    value
}

/// Replace hex currency codes with their readable form when printable.
pub fn decode_currencies(mut value: Value) -> Value {
    walk_objects(&mut value, &mut |map: &mut Map<String, Value>| {
        for field in CURRENCY_FIELDS {
            if let Some(Value::String(code)) = map.get_mut(*field) {
                *code = decode_currency(code);
            }
        }
    });
    value
}

/// Add `<Field>UTC` next to Ripple-epoch timestamps.
pub fn annotate_ripple_times(mut value: Value) -> Value {
    walk_objects(&mut value, &mut |map: &mut Map<String, Value>| {
        for field in RIPPLE_TIME_FIELDS {
            let converted = map
                .get(*field)
                .and_then(Value::as_u64)
                .and_then(|t| u32::try_from(t).ok())
                .map(|t| from_ripple_time(t).to_rfc3339());
            if let Some(utc) = converted {
                map.insert(format!("{}UTC", field), Value::String(utc));
            }
        }
    });
    value
}

/// Add `<Field>Text` next to hex blobs that decode to UTF-8 text.
pub fn annotate_hex_text(mut value: Value, fields: &[&str]) -> Value {
    walk_objects(&mut value, &mut |map: &mut Map<String, Value>| {
        for field in fields {
            let decoded = map
                .get(*field)
                .and_then(Value::as_str)
                .and_then(|h| hex::decode(h).ok())
                .and_then(|bytes| String::from_utf8(bytes).ok());
            if let Some(text) = decoded {
                map.insert(format!("{}Text", field), Value::String(text));
            }
        }
    });
    value
}

/// Add a decimal `Price` to oracle price entries.
pub fn annotate_oracle_prices(mut value: Value) -> Value {
    walk_objects(&mut value, &mut |map: &mut Map<String, Value>| {
        let Some(hex_price) = map.get("AssetPrice").and_then(Value::as_str) else {
            return;
        };
        let scale = map
            .get("Scale")
            .and_then(Value::as_u64)
            .and_then(|s| u8::try_from(s).ok())
            .unwrap_or(0);
        if let Ok(price) = decode_asset_price(hex_price, scale) {
            map.insert("Price".to_string(), Value::String(price));
        }
    });
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_drops_annotated_at_any_depth() {
        let v = annotate_drops(json!({
            "account_data": {"Balance": "25000000", "Sequence": 4},
            "offers": [{"TakerGets": "1500000", "TakerPays": {"currency": "USD", "value": "1"}}]
        }));
        assert_eq!(v["account_data"]["BalanceXRP"], "25");
        assert_eq!(v["offers"][0]["TakerGetsXRP"], "1.5");
        assert!(v["offers"][0].get("TakerPaysXRP").is_none());
    }

    #[test]
    fn test_currency_and_times() {
        let v = decode_currencies(json!([{"currency": "534F4C4F00000000000000000000000000000000"}]));
        assert_eq!(v[0]["currency"], "SOLO");

        let v = annotate_ripple_times(json!({"FinishAfter": 0}));
        assert_eq!(v["FinishAfterUTC"], "2000-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_hex_text_and_prices() {
        let v = annotate_hex_text(json!({"URI": "697066733A2F2F78", "Data": "ZZ"}), &["URI", "Data"]);
        assert_eq!(v["URIText"], "ipfs://x");
        assert!(v.get("DataText").is_none());

        let v = annotate_oracle_prices(json!({
            "PriceDataSeries": [{"PriceData": {"AssetPrice": "2E4", "Scale": 3}}]
        }));
        assert_eq!(v["PriceDataSeries"][0]["PriceData"]["Price"], "0.74");
    }
}
