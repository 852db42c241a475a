// handlers/protected/wallet.rs - /api/wallet handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::wallet::{PricingMode, PurchaseRequest, PurchaseResponse, WalletResponse, PRESET_KEYS};
use crate::services::WalletService;
use crate::session::Session;
use crate::state::AppState;
use crate::validation::BodyCheck;

const INVALID_PURCHASE: &str = "Invalid purchase payload";

pub(crate) fn parse_purchase(body: &Value) -> ApiResult<PurchaseRequest> {
    let mut check = BodyCheck::new(body);

    let amount_eur = check.positive_number("amountEur", "amountEur must be greater than 0");
    let pricing_mode = check.one_of("pricingMode", &["preset", "custom"], PricingMode::parse);

    let preset_present = check.raw("presetKey").is_some();
    let preset_key = match check.raw("presetKey") {
        None => None,
        Some(value) => match value.as_i64().filter(|key| PRESET_KEYS.contains(key)) {
            Some(key) => Some(key),
            None => {
                check.reject("presetKey", "presetKey must be one of: 1, 5, 10");
                None
            }
        },
    };

    if pricing_mode == Some(PricingMode::Preset) {
        match (preset_key, amount_eur) {
            (None, _) if !preset_present => check.reject("presetKey", "presetKey is required for preset pricing"),
            (Some(key), Some(amount)) if key as f64 != amount => {
                check.reject("amountEur", "amountEur must match the selected preset")
            }
            _ => {}
        }
    }

    // A wrong type already carries its own field error
    let consent_present = check.raw("consentAccepted").is_some();
    match check.optional_bool("consentAccepted") {
        Some(true) => {}
        None if consent_present => {}
        _ => check.reject("consentAccepted", "Consent is required"),
    }

    check.finish(INVALID_PURCHASE)?;

    let (Some(amount_eur), Some(pricing_mode)) = (amount_eur, pricing_mode) else {
        return Err(ApiError::validation_error(INVALID_PURCHASE));
    };

    Ok(PurchaseRequest {
        amount_eur,
        pricing_mode,
        preset_key,
    })
}

/// GET /api/wallet - Balance, totals and transaction history
pub async fn wallet_get(State(state): State<AppState>, session: Session) -> ApiResult<Json<WalletResponse>> {
    let response = WalletService::new(&state.upstream).wallet(&session.session_id).await?;
    Ok(Json(response))
}

/// POST /api/wallet/purchase - Start a credit checkout
pub async fn purchase_post(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<PurchaseResponse>> {
    let Json(body) = body?;
    let request = parse_purchase(&body)?;

    let response = WalletService::new(&state.upstream)
        .purchase(&session.session_id, &request)
        .await?;
    Ok(Json(response))
}
