use serde::Deserialize;

use crate::error::ApiError;
use crate::upstream::{lenient_list, Area, LooseValue, Params, UpstreamClient};

#[derive(Debug, Default, Deserialize)]
pub struct GiftBlock {
    pub id: Option<LooseValue>,
    pub nom: Option<LooseValue>,
    pub slug: Option<LooseValue>,
    pub image: Option<LooseValue>,
    pub prix: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InventoryBlock {
    pub gift_id: Option<LooseValue>,
    pub nom: Option<LooseValue>,
    pub image: Option<LooseValue>,
    pub quantite: Option<LooseValue>,
    pub date_maj: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GiftSentBlock {
    pub id: Option<LooseValue>,
    pub gift_id: Option<LooseValue>,
    pub nom: Option<LooseValue>,
    pub image: Option<LooseValue>,
    pub destinataire_id: Option<LooseValue>,
    pub prix: Option<LooseValue>,
    pub date: Option<LooseValue>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct GiftListPayload<T> {
    pub connected: Option<LooseValue>,
    #[serde(default = "Vec::new", deserialize_with = "lenient_list")]
    pub result: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BuyGiftPayload {
    pub accepted: Option<LooseValue>,
    pub spent: Option<LooseValue>,
    pub solde: Option<LooseValue>,
    pub error: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendGiftPayload {
    pub accepted: Option<LooseValue>,
    pub restant: Option<LooseValue>,
    pub error: Option<LooseValue>,
}

pub struct GiftRepository<'a> {
    client: &'a UpstreamClient,
}

impl<'a> GiftRepository<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self { client }
    }

    fn base(&self, session_id: &str) -> Params {
        Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key())
    }

    pub async fn catalog(&self, session_id: &str) -> Result<GiftListPayload<GiftBlock>, ApiError> {
        self.client
            .post_form(Area::Gift, "/index_api/gifts/catalog", self.base(session_id))
            .await
    }

    pub async fn inventory(&self, session_id: &str) -> Result<GiftListPayload<InventoryBlock>, ApiError> {
        self.client
            .post_form(Area::Gift, "/index_api/gifts/inventory", self.base(session_id))
            .await
    }

    pub async fn history(&self, session_id: &str, limit: i64) -> Result<GiftListPayload<GiftSentBlock>, ApiError> {
        let params = self.base(session_id).set("limit", limit);
        self.client.post_form(Area::Gift, "/index_api/gifts/history", params).await
    }

    pub async fn buy(&self, session_id: &str, gift_id: i64) -> Result<BuyGiftPayload, ApiError> {
        let params = self.base(session_id).set("gift_id", gift_id);
        self.client.post_form(Area::Gift, "/index_api/gifts/buy", params).await
    }

    pub async fn send(&self, session_id: &str, gift_id: i64, recipient_id: i64) -> Result<SendGiftPayload, ApiError> {
        let params = self
            .base(session_id)
            .set("gift_id", gift_id)
            .set("dest_id", recipient_id);
        self.client.post_form(Area::Gift, "/index_api/gifts/send", params).await
    }
}
