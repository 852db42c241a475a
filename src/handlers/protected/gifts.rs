// handlers/protected/gifts.rs - /api/gifts/* handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult, FieldError};
use crate::models::gift::{
    BuyGiftResult, GiftCatalogItem, GiftHistoryItem, GiftInventoryItem, GiftList, SendGiftResult,
};
use crate::services::GiftService;
use crate::session::{Session, SessionUser};
use crate::state::AppState;
use crate::validation::{BodyCheck, QueryParams};

const DEFAULT_HISTORY_LIMIT: i64 = 20;
const MAX_HISTORY_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<String>,
}

pub(crate) fn parse_history_limit(value: Option<&str>) -> ApiResult<i64> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_HISTORY_LIMIT);
    };

    match raw.parse::<i64>() {
        Ok(limit) if (1..=MAX_HISTORY_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(ApiError::validation_fields(
            "Invalid limit query parameter",
            vec![FieldError::new("limit", "limit must be an integer between 1 and 100")],
        )),
    }
}

/// GET /api/gifts/catalog - Gifts available for purchase
pub async fn catalog_get(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<GiftList<GiftCatalogItem>>> {
    let response = GiftService::new(&state.upstream).catalog(&session.session_id).await?;
    Ok(Json(response))
}

/// GET /api/gifts/inventory - Gifts owned and not yet sent
pub async fn inventory_get(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<GiftList<GiftInventoryItem>>> {
    let response = GiftService::new(&state.upstream).inventory(&session.session_id).await?;
    Ok(Json(response))
}

/// GET /api/gifts/history?limit= - Most recently sent gifts
pub async fn history_get(
    State(state): State<AppState>,
    session: Session,
    QueryParams(query): QueryParams<HistoryQuery>,
) -> ApiResult<Json<GiftList<GiftHistoryItem>>> {
    let limit = parse_history_limit(query.limit.as_deref())?;
    let response = GiftService::new(&state.upstream)
        .history(&session.session_id, limit)
        .await?;
    Ok(Json(response))
}

/// POST /api/gifts/buy - Spend coins on one gift
pub async fn buy_post(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<BuyGiftResult>> {
    let Json(body) = body?;
    let mut check = BodyCheck::new(&body);
    let gift_id = check.positive_int("giftId", "giftId must be a positive integer");
    check.finish("Invalid gift purchase payload")?;
    let gift_id = gift_id.ok_or_else(|| ApiError::validation_error("Invalid gift purchase payload"))?;

    let response = GiftService::new(&state.upstream).buy(&session.session_id, gift_id).await?;
    Ok(Json(response))
}

/// POST /api/gifts/send - Give an owned gift to another member
pub async fn send_post(
    State(state): State<AppState>,
    user: SessionUser,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SendGiftResult>> {
    let Json(body) = body?;
    let mut check = BodyCheck::new(&body);
    let recipient = check.positive_int("recipientUserId", "recipientUserId must be a positive integer");
    let gift_id = check.positive_int("giftId", "giftId must be a positive integer");
    if recipient == Some(user.user_id) {
        check.reject("recipientUserId", "You cannot send a gift to yourself");
    }
    check.finish("Invalid gift send payload")?;

    let (Some(recipient), Some(gift_id)) = (recipient, gift_id) else {
        return Err(ApiError::validation_error("Invalid gift send payload"));
    };

    let response = GiftService::new(&state.upstream)
        .send(&user.session_id, gift_id, recipient)
        .await?;
    Ok(Json(response))
}
