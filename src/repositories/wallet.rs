use serde::Deserialize;

use crate::error::ApiError;
use crate::models::wallet::PurchaseRequest;
use crate::upstream::{lenient_list, Area, LooseValue, Params, UpstreamClient};

#[derive(Debug, Default, Deserialize)]
pub struct TransactionBlock {
    pub id: Option<LooseValue>,
    #[serde(rename = "type")]
    pub kind: Option<LooseValue>,
    pub motif: Option<LooseValue>,
    pub statut: Option<LooseValue>,
    pub montant: Option<LooseValue>,
    pub date: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WalletPayload {
    pub connected: Option<LooseValue>,
    pub solde: Option<LooseValue>,
    pub devise: Option<LooseValue>,
    pub total_achat: Option<LooseValue>,
    pub total_depense: Option<LooseValue>,
    pub en_attente: Option<LooseValue>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub transactions: Vec<TransactionBlock>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckoutPayload {
    pub connected: Option<LooseValue>,
    pub accepted: Option<LooseValue>,
    pub token: Option<LooseValue>,
    pub redirect_url: Option<LooseValue>,
    pub error: Option<LooseValue>,
}

pub struct WalletRepository<'a> {
    client: &'a UpstreamClient,
}

impl<'a> WalletRepository<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self { client }
    }

    pub async fn wallet(&self, session_id: &str) -> Result<WalletPayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key());

        self.client.post_form(Area::Wallet, "/index_api/credits/wallet", params).await
    }

    pub async fn checkout(&self, session_id: &str, request: &PurchaseRequest) -> Result<CheckoutPayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key())
            .set("amount", request.amount_eur)
            .set("mode", request.pricing_mode.as_api())
            .set_opt("preset", request.preset_key);

        self.client.post_form(Area::Wallet, "/index_api/credits/checkout", params).await
    }
}
