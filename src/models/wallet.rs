use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub balance: f64,
    pub currency: String,
    pub total_purchased: f64,
    pub total_spent: f64,
    pub pending_credits: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub status: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletResponse {
    pub wallet: WalletSummary,
    pub transactions: Vec<WalletTransaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingMode {
    Preset,
    Custom,
}

impl PricingMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "preset" => Some(PricingMode::Preset),
            "custom" => Some(PricingMode::Custom),
            _ => None,
        }
    }

    pub fn as_api(&self) -> &'static str {
        match self {
            PricingMode::Preset => "preset",
            PricingMode::Custom => "custom",
        }
    }
}

/// Credit packs offered at fixed prices, keyed by their euro amount
pub const PRESET_KEYS: [i64; 3] = [1, 5, 10];

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRequest {
    pub amount_eur: f64,
    pub pricing_mode: PricingMode,
    pub preset_key: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub checkout_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}
