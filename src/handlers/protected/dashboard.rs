// handlers/protected/dashboard.rs - /api/dashboard/* handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult, FieldError};
use crate::models::dashboard::{CommunityActivityResponse, MemberPage, TopMembersFilters, TopMembersSex};
use crate::services::DashboardService;
use crate::session::Session;
use crate::state::AppState;
use crate::upstream::normalize_text;
use crate::validation::{query_positive_int, QueryParams};

#[derive(Debug, Default, Deserialize)]
pub struct TopMembersQuery {
    pub gender: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "ageRange")]
    pub age_range: Option<String>,
    #[serde(rename = "age_range")]
    pub age_range_legacy: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

fn parse_page(value: Option<&str>) -> ApiResult<Option<i64>> {
    query_positive_int(value, "page", "Page must be a positive integer", "Invalid page query parameter")
}

pub(crate) fn top_members_filters(query: &TopMembersQuery) -> ApiResult<TopMembersFilters> {
    let sex = match query.gender.as_deref() {
        Some("men") => TopMembersSex::Man,
        Some("women") => TopMembersSex::Woman,
        _ => {
            return Err(ApiError::validation_fields(
                "Invalid gender query parameter",
                vec![FieldError::new("gender", "gender must be one of: men, women")],
            ))
        }
    };

    Ok(TopMembersFilters {
        sex,
        page: parse_page(query.page.as_deref())?,
        age_range: normalize_text(query.age_range.as_deref())
            .or_else(|| normalize_text(query.age_range_legacy.as_deref())),
    })
}

/// GET /api/dashboard/activity - Latest community wall events
pub async fn activity_get(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<CommunityActivityResponse>> {
    let result = DashboardService::new(&state.upstream)
        .get_community_activity(&session.session_id)
        .await?;

    tracing::info!(items_count = result.items.len(), "/api/dashboard/activity success");
    Ok(Json(result))
}

/// GET /api/dashboard/top-members?gender=men|women&page=&ageRange=
pub async fn top_members_get(
    State(state): State<AppState>,
    session: Session,
    QueryParams(query): QueryParams<TopMembersQuery>,
) -> ApiResult<Json<MemberPage>> {
    let filters = top_members_filters(&query)?;
    let result = DashboardService::new(&state.upstream)
        .get_top_members(&session.session_id, &filters)
        .await?;
    Ok(Json(result))
}

/// GET /api/dashboard/recent-visitors?page=
pub async fn recent_visitors_get(
    State(state): State<AppState>,
    session: Session,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Json<MemberPage>> {
    let page = parse_page(query.page.as_deref())?;
    let result = DashboardService::new(&state.upstream)
        .get_recent_visitors(&session.session_id, page)
        .await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(gender: Option<&str>, page: Option<&str>) -> TopMembersQuery {
        TopMembersQuery {
            gender: gender.map(str::to_string),
            page: page.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn gender_is_required() {
        let err = top_members_filters(&query(None, None)).unwrap_err();
        assert_eq!(err.message, "Invalid gender query parameter");
        assert!(top_members_filters(&query(Some("couple"), None)).is_err());
    }

    #[test]
    fn age_range_falls_back_to_snake_case() {
        let mut q = query(Some("women"), Some("2"));
        q.age_range = Some("  ".to_string());
        q.age_range_legacy = Some("25-35".to_string());

        let filters = top_members_filters(&q).unwrap();
        assert_eq!(filters.sex, TopMembersSex::Woman);
        assert_eq!(filters.page, Some(2));
        assert_eq!(filters.age_range.as_deref(), Some("25-35"));
    }

    #[test]
    fn bad_page_is_rejected() {
        let err = top_members_filters(&query(Some("men"), Some("-1"))).unwrap_err();
        assert_eq!(err.message, "Invalid page query parameter");
    }
}
