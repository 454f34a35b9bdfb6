//! NFT forms: minting, burning and the offer workflow.

use serde_json::{json, Map, Value};

use crate::backend::{endpoints, ApiRequest};
use crate::forms::{address, hash256, hex_text, present, seed, Asset, Form, FormError, Secret};

const MAX_URI_BYTES: usize = 256;
const MAX_TRANSFER_FEE: u16 = 50_000;

const TF_BURNABLE: u32 = 0x0000_0001;
const TF_ONLY_XRP: u32 = 0x0000_0002;
const TF_TRANSFERABLE: u32 = 0x0000_0008;

#[derive(Debug, Clone, Default)]
pub struct MintNft {
    pub seed: Secret,
    pub uri: Option<String>,
    pub taxon: u32,
    /// In 1/100000 units: 50000 is 50%.
    pub transfer_fee: Option<u16>,
    pub transferable: bool,
    pub burnable: bool,
    pub only_xrp: bool,
}

impl MintNft {
    fn flags(&self) -> u32 {
        let mut flags = 0;
        if self.burnable {
            flags |= TF_BURNABLE;
        }
        if self.only_xrp {
            flags |= TF_ONLY_XRP;
        }
        if self.transferable {
            flags |= TF_TRANSFERABLE;
        }
        flags
    }
}

impl Form for MintNft {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let mut body = Map::new();
        body.insert("seed".into(), json!(seed(&self.seed)?));
        body.insert("taxon".into(), json!(self.taxon));
        body.insert("flags".into(), json!(self.flags()));
        if let Some(uri) = &self.uri {
            body.insert("uri".into(), json!(hex_text("uri", uri, MAX_URI_BYTES)?));
        }
        if let Some(fee) = self.transfer_fee {
            if fee > MAX_TRANSFER_FEE {
                return Err(FormError::invalid("transfer_fee", "must be between 0 and 50000"));
            }
            if fee > 0 && !self.transferable {
                return Err(FormError::invalid(
                    "transfer_fee",
                    "only transferable NFTs can carry a transfer fee",
                ));
            }
            body.insert("transfer_fee".into(), json!(fee));
        }
        Ok(ApiRequest::post(endpoints::NFT_MINT, Value::Object(body)))
    }
}

#[derive(Debug, Clone)]
pub struct BurnNft {
    pub seed: Secret,
    pub nft_id: String,
}

impl Form for BurnNft {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let body = json!({
            "seed": seed(&self.seed)?,
            "nft_id": hash256("nft_id", &self.nft_id)?,
        });
        Ok(ApiRequest::post(endpoints::NFT_BURN, body))
    }
}

#[derive(Debug, Clone)]
pub struct ListNfts {
    pub address: String,
}

impl Form for ListNfts {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let address = address("address", &self.address)?;
        Ok(ApiRequest::get(endpoints::nft_list(&address)))
    }

    fn present(&self, result: Value) -> Value {
        present::annotate_hex_text(result, &["URI"])
    }
}

#[derive(Debug, Clone)]
pub struct CreateNftSellOffer {
    pub seed: Secret,
    pub nft_id: String,
    pub amount: Asset,
    /// Restrict who may accept the offer.
    pub destination: Option<String>,
}

impl Form for CreateNftSellOffer {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let mut body = Map::new();
        body.insert("seed".into(), json!(seed(&self.seed)?));
        body.insert("nft_id".into(), json!(hash256("nft_id", &self.nft_id)?));
        body.insert("amount".into(), self.amount.to_amount("amount")?);
        if let Some(destination) = &self.destination {
            body.insert("destination".into(), json!(address("destination", destination)?));
        }
        Ok(ApiRequest::post(endpoints::NFT_OFFER_SELL, Value::Object(body)))
    }
}

#[derive(Debug, Clone)]
pub struct CreateNftBuyOffer {
    pub seed: Secret,
    pub nft_id: String,
    pub amount: Asset,
    pub owner: String,
}

impl Form for CreateNftBuyOffer {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let body = json!({
            "seed": seed(&self.seed)?,
            "nft_id": hash256("nft_id", &self.nft_id)?,
            "amount": self.amount.to_amount("amount")?,
            "owner": address("owner", &self.owner)?,
        });
        Ok(ApiRequest::post(endpoints::NFT_OFFER_BUY, body))
    }
}

#[derive(Debug, Clone)]
pub struct AcceptNftOffer {
    pub seed: Secret,
    pub sell_offer: Option<String>,
    pub buy_offer: Option<String>,
}

impl Form for AcceptNftOffer {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let (key, id) = match (&self.sell_offer, &self.buy_offer) {
            (Some(sell), None) => ("sell_offer", hash256("sell_offer", sell)?),
            (None, Some(buy)) => ("buy_offer", hash256("buy_offer", buy)?),
            _ => {
                return Err(FormError::invalid(
                    "offer",
                    "provide exactly one of sell_offer or buy_offer",
                ))
            }
        };
        let body = json!({ "seed": seed(&self.seed)?, key: id });
        Ok(ApiRequest::post(endpoints::NFT_OFFER_ACCEPT, body))
    }
}

#[derive(Debug, Clone)]
pub struct CancelNftOffer {
    pub seed: Secret,
    pub offer_ids: Vec<String>,
}

impl Form for CancelNftOffer {
    fn build(&self) -> Result<ApiRequest, FormError> {
        if self.offer_ids.is_empty() {
            return Err(FormError::Missing { field: "offer_ids" });
        }
        let ids = self
            .offer_ids
            .iter()
            .map(|id| hash256("offer_ids", id))
            .collect::<Result<Vec<_>, _>>()?;
        let body = json!({ "seed": seed(&self.seed)?, "offer_ids": ids });
        Ok(ApiRequest::post(endpoints::NFT_OFFER_CANCEL, body))
    }
}

#[derive(Debug, Clone)]
pub struct NftOffers {
    pub nft_id: String,
}

impl Form for NftOffers {
    fn build(&self) -> Result<ApiRequest, FormError> {
        let nft_id = hash256("nft_id", &self.nft_id)?;
        Ok(ApiRequest::get(endpoints::nft_offers(&nft_id)))
    }

    fn present(&self, result: Value) -> Value {
        present::decode_currencies(present::annotate_drops(result))
    }
}
