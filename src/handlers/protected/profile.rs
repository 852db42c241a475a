// handlers/protected/profile.rs - /api/user/profile handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::error::{ApiError, ApiResult, FieldError};
use crate::models::user::{UpdateProfileRequest, UpdateProfileResponse, UserProfileResponse};
use crate::services::UserProfileService;
use crate::session::{Session, SessionUser};
use crate::state::AppState;
use crate::upstream::normalize_text;
use crate::validation::loose_number;

fn invalid_payload(field: &str, message: &str) -> ApiError {
    ApiError::validation_fields("Invalid request payload", vec![FieldError::new(field, message)])
}

/// Lenient PATCH body: only `fullName` is mandatory, unreadable optional values are dropped
pub(crate) fn parse_update_profile(body: &Value) -> ApiResult<UpdateProfileRequest> {
    let payload = body
        .as_object()
        .ok_or_else(|| invalid_payload("body", "body must be an object"))?;

    let text = |key: &str| normalize_text(payload.get(key).and_then(Value::as_str));
    let number = |key: &str| loose_number(payload.get(key));

    let full_name = text("fullName")
        .ok_or_else(|| invalid_payload("fullName", "fullName is required and must be a non-empty string"))?;

    let body_options = payload
        .get("bodyOptions")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|item| loose_number(Some(item))).collect::<Vec<_>>())
        .filter(|items| !items.is_empty());

    Ok(UpdateProfileRequest {
        full_name,
        height: number("height"),
        weight: number("weight"),
        eye_color: number("eyeColor"),
        hair_color: number("hairColor"),
        situation: number("situation"),
        silhouette: number("silhouette"),
        personality: number("personality"),
        schedule: number("schedule"),
        orientation: number("orientation"),
        children: number("children"),
        education: number("education"),
        profession: number("profession"),
        email: text("email"),
        lang_ui: text("langUi"),
        body_options,
        description: payload.get("description").and_then(Value::as_str).map(str::to_string),
    })
}

/// GET /api/user/profile - The signed-in member's own profile
pub async fn profile_get(State(state): State<AppState>, user: SessionUser) -> ApiResult<Json<UserProfileResponse>> {
    let response = UserProfileService::new(&state.upstream)
        .get_profile(&user.session_id, user.user_id)
        .await?;
    Ok(Json(response))
}

/// PATCH /api/user/profile - Update profile attributes and, when given, the description
pub async fn profile_patch(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<UpdateProfileResponse>> {
    let Json(body) = body?;
    let request = parse_update_profile(&body)?;

    let response = UserProfileService::new(&state.upstream)
        .update_profile(&session.session_id, &request)
        .await?;
    Ok(Json(response))
}
