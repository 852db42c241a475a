// handlers/protected/matches.rs - /api/match/* handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult, FieldError};
use crate::models::matches::{DiscoverFilters, DiscoverGender, DiscoverPage, MatchAction, MatchActionResult, MatchList};
use crate::services::MatchService;
use crate::session::{Session, SessionUser};
use crate::state::AppState;
use crate::validation::{query_positive_int, BodyCheck, QueryParams};

const INVALID_QUERY: &str = "Invalid discover query";

#[derive(Debug, Default, Deserialize)]
pub struct DiscoverQuery {
    pub page: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "ageFrom")]
    pub age_from: Option<String>,
    #[serde(rename = "ageTo")]
    pub age_to: Option<String>,
}

pub(crate) fn discover_filters(query: &DiscoverQuery) -> ApiResult<DiscoverFilters> {
    let gender = match query.gender.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
        None => None,
        Some(raw) => Some(DiscoverGender::parse(raw).ok_or_else(|| {
            ApiError::validation_fields(
                INVALID_QUERY,
                vec![FieldError::new("gender", "gender must be one of: men, women, couple")],
            )
        })?),
    };

    let page = query_positive_int(query.page.as_deref(), "page", "Page must be a positive integer", INVALID_QUERY)?;
    let age_from = query_positive_int(query.age_from.as_deref(), "ageFrom", "ageFrom must be a positive integer", INVALID_QUERY)?;
    let age_to = query_positive_int(query.age_to.as_deref(), "ageTo", "ageTo must be a positive integer", INVALID_QUERY)?;

    if let (Some(from), Some(to)) = (age_from, age_to) {
        if from > to {
            return Err(ApiError::validation_fields(
                INVALID_QUERY,
                vec![FieldError::new("ageFrom", "ageFrom must be less than or equal to ageTo")],
            ));
        }
    }

    Ok(DiscoverFilters {
        page,
        gender,
        age_from,
        age_to,
    })
}

/// GET /api/match/discover - Candidate deck
pub async fn discover_get(
    State(state): State<AppState>,
    session: Session,
    QueryParams(query): QueryParams<DiscoverQuery>,
) -> ApiResult<Json<DiscoverPage>> {
    let filters = discover_filters(&query)?;
    let response = MatchService::new(&state.upstream)
        .discover(&session.session_id, &filters)
        .await?;
    Ok(Json(response))
}

/// GET /api/match/matches - Mutual likes
pub async fn matches_get(State(state): State<AppState>, session: Session) -> ApiResult<Json<MatchList>> {
    let response = MatchService::new(&state.upstream).matches(&session.session_id).await?;
    Ok(Json(response))
}

/// POST /api/match/action - Like or dislike a candidate
pub async fn action_post(
    State(state): State<AppState>,
    user: SessionUser,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MatchActionResult>> {
    let Json(body) = body?;
    let mut check = BodyCheck::new(&body);
    let target = check.positive_int("userId", "userId must be a positive integer");
    let action = check.one_of("action", &["like", "dislike"], MatchAction::parse);
    if target == Some(user.user_id) {
        check.reject("userId", "You cannot react to your own profile");
    }
    check.finish("Invalid match action payload")?;

    let (Some(target), Some(action)) = (target, action) else {
        return Err(ApiError::validation_error("Invalid match action payload"));
    };

    let response = MatchService::new(&state.upstream)
        .act(&user.session_id, target, action)
        .await?;
    Ok(Json(response))
}
