//! Decentralized identifier forms.

use serde_json::{json, Map, Value};

use crate::backend::{endpoints, ApiRequest};
use crate::forms::{address, hex_text, present, seed, Form, FormError, Secret};

const MAX_FIELD_BYTES: usize = 256;

#[derive(Debug, Clone, Default)]
pub struct SetDid {
    pub seed: Secret,
    pub uri: Option<String>,
    pub data: Option<String>,
    pub document: Option<String>,
}

impl Form for SetDid {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let mut body = Map::new();
        body.insert("seed".into(), json!(seed(&self.seed)?));

        let fields = [
            ("uri", &self.uri),
            ("data", &self.data),
            ("did_document", &self.document),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                body.insert(name.into(), json!(hex_text(name, value, MAX_FIELD_BYTES)?));
            }
        }
        if body.len() == 1 {
            return Err(FormError::invalid(
                "did",
                "provide at least one of uri, data or document",
            ));
        }
        Ok(ApiRequest::post(endpoints::DID_SET, Value::Object(body)))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteDid {
    pub seed: Secret,
}

impl Form for DeleteDid {
    fn build(&self) -> Result<ApiRequest, FormError> {
        Ok(ApiRequest::delete(endpoints::DID_DELETE, json!({ "seed": seed(&self.seed)? })))
    }
}

#[derive(Debug, Clone)]
pub struct GetDid {
    pub address: String,
}

impl Form for GetDid {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let address = address("address", &self.address)?;
        Ok(ApiRequest::get(endpoints::did(&address)))
    }

    fn present(&self, result: Value) -> Value {
        present::annotate_hex_text(result, &["URI", "Data", "DIDDocument"])
    }
}
