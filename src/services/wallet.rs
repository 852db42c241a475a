use crate::error::ApiError;
use crate::models::wallet::{PurchaseRequest, PurchaseResponse, WalletResponse, WalletSummary, WalletTransaction};
use crate::repositories::wallet::{TransactionBlock, WalletPayload};
use crate::repositories::WalletRepository;
use crate::upstream::{LooseField, UpstreamClient};

use super::{ensure_connected, rejection};

const DEFAULT_CURRENCY: &str = "EUR";

pub(crate) fn to_transaction(raw: &TransactionBlock) -> Option<WalletTransaction> {
    Some(WalletTransaction {
        id: raw.id.positive_integer()?,
        kind: raw.kind.text().map(|t| t.to_lowercase()).unwrap_or_else(|| "unknown".to_string()),
        reason: raw.motif.text(),
        status: raw.statut.text().map(|s| s.to_uppercase()).unwrap_or_else(|| "UNKNOWN".to_string()),
        amount: raw.montant.number().unwrap_or(0.0),
        created_at: raw.date.text(),
    })
}

pub(crate) fn to_wallet_response(payload: &WalletPayload) -> WalletResponse {
    WalletResponse {
        wallet: WalletSummary {
            balance: payload.solde.number().unwrap_or(0.0),
            currency: payload
                .devise
                .text()
                .map(|c| c.to_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            total_purchased: payload.total_achat.number().unwrap_or(0.0),
            total_spent: payload.total_depense.number().unwrap_or(0.0),
            pending_credits: payload.en_attente.number().unwrap_or(0.0),
        },
        transactions: payload.transactions.iter().filter_map(to_transaction).collect(),
    }
}

pub struct WalletService<'a> {
    repository: WalletRepository<'a>,
}

impl<'a> WalletService<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self {
            repository: WalletRepository::new(client),
        }
    }

    pub async fn wallet(&self, session_id: &str) -> Result<WalletResponse, ApiError> {
        let payload = self.repository.wallet(session_id).await?;
        ensure_connected(&payload.connected)?;

        Ok(to_wallet_response(&payload))
    }

    pub async fn purchase(&self, session_id: &str, request: &PurchaseRequest) -> Result<PurchaseResponse, ApiError> {
        let payload = self.repository.checkout(session_id, request).await?;
        ensure_connected(&payload.connected)?;

        let token = match (payload.accepted.flag(), payload.token.text()) {
            (true, Some(token)) => token,
            _ => return Err(rejection(&payload.error, "Checkout rejected")),
        };

        tracing::info!(amount_eur = request.amount_eur, mode = request.pricing_mode.as_api(), "checkout created");

        Ok(PurchaseResponse {
            checkout_token: token,
            redirect_url: payload.redirect_url.text(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wallet_defaults_and_uppercased_status() {
        let payload: WalletPayload = serde_json::from_value(json!({
            "solde": "120",
            "total_achat": 150.5,
            "transactions": [
                {"id": 1, "type": "PURCHASE", "statut": "successful", "montant": "10", "motif": "Pack 10"},
                {"type": "spend"}
            ]
        }))
        .unwrap();

        let response = to_wallet_response(&payload);
        assert_eq!(response.wallet.balance, 120.0);
        assert_eq!(response.wallet.currency, "EUR");
        assert_eq!(response.wallet.total_purchased, 150.5);
        assert_eq!(response.wallet.pending_credits, 0.0);
        assert_eq!(response.transactions.len(), 1);
        assert_eq!(response.transactions[0].status, "SUCCESSFUL");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["transactions"][0]["type"], "purchase");
        assert_eq!(json["wallet"]["totalPurchased"], 150.5);
        assert!(json["transactions"][0].get("createdAt").is_none());
    }
}
