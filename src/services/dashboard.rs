use serde_json::Value;

use crate::error::ApiError;
use crate::models::dashboard::{
    ActivityAction, CommunityActivityItem, CommunityActivityResponse, MemberPage, MemberSummary, TopMembersFilters,
};
use crate::models::ItemId;
use crate::repositories::dashboard::{ActivitiesPayload, MemberListPayload, MembreBlock};
use crate::repositories::DashboardRepository;
use crate::upstream::loose::gender_from_code;
use crate::upstream::{LooseField, LooseValue, UpstreamClient};

/// Only absolute http(s) URLs are usable by the browser
pub(crate) fn normalize_photo_url(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        None
    }
}

const PREFERRED_PHOTO_KEYS: [&str; 4] = ["sq_middle", "normal", "sq_small", "photo_url"];

/// Dig a usable photo URL out of whatever shape the provider sent in `photos`
pub(crate) fn extract_photo_url(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            if let Some(url) = normalize_photo_url(s) {
                return Some(url);
            }
            let trimmed = s.trim();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                return serde_json::from_str::<Value>(trimmed)
                    .ok()
                    .and_then(|parsed| extract_photo_url(&parsed));
            }
            None
        }
        Value::Array(items) => items.iter().find_map(extract_photo_url),
        Value::Object(map) => PREFERRED_PHOTO_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str).and_then(normalize_photo_url))
            .or_else(|| map.values().find_map(extract_photo_url)),
        _ => None,
    }
}

pub(crate) fn to_member_summary(member: &MembreBlock) -> Option<MemberSummary> {
    let id = member.id.positive_integer().or_else(|| member.user_id.positive_integer())?;
    let username = member.pseudo.text()?;

    Some(MemberSummary {
        id,
        username,
        gender: gender_from_code(&member.sexe1),
        age: member.age.positive_integer(),
        location: member.zone_name.text(),
        rating: member.moyenne.number(),
        photo_url: member
            .photos
            .as_ref()
            .and_then(extract_photo_url)
            .or_else(|| member.photo.text().as_deref().and_then(normalize_photo_url)),
    })
}

fn activity_id(id: Option<i64>, kind: &str, username: &str) -> ItemId {
    id.map(ItemId::Number)
        .unwrap_or_else(|| ItemId::Key(format!("{kind}-{username}")))
}

pub(crate) fn to_activity_items(payload: &ActivitiesPayload) -> Vec<CommunityActivityItem> {
    let mut items = Vec::new();

    if let Some(block) = &payload.wall_online {
        if let Some(username) = block.pseudo.text() {
            items.push(CommunityActivityItem {
                id: activity_id(block.id.integer(), "online", &username),
                gender: gender_from_code(&block.sexe1),
                action: ActivityAction::Online,
                timestamp: block.date.text(),
                username,
            });
        }
    }

    if let Some(block) = &payload.wall_change {
        if let Some(username) = block.pseudo.text() {
            items.push(CommunityActivityItem {
                id: activity_id(block.id.integer(), "change", &username),
                gender: None,
                action: ActivityAction::ProfileChange,
                timestamp: block.date_modification.text(),
                username,
            });
        }
    }

    if let Some(block) = &payload.wall_add_photo {
        if let Some(username) = block.pseudo.text() {
            items.push(CommunityActivityItem {
                id: activity_id(block.user_id.integer(), "photo", &username),
                gender: None,
                action: ActivityAction::PhotoAdded,
                timestamp: block.jour.text(),
                username,
            });
        }
    }

    if let Some(block) = &payload.wall_birthday {
        if let Some(username) = block.pseudo.text() {
            items.push(CommunityActivityItem {
                id: activity_id(block.id.integer(), "birthday", &username),
                gender: gender_from_code(&block.sexe1),
                action: ActivityAction::Birthday,
                timestamp: None,
                username,
            });
        }
    }

    if let Some(block) = &payload.wall_friends {
        if let Some(username) = block.pseudo1.text() {
            items.push(CommunityActivityItem {
                id: activity_id(block.id1.integer().or_else(|| block.id2.integer()), "friends", &username),
                gender: gender_from_code(&block.sexe1),
                action: ActivityAction::Friends,
                timestamp: block.date.text(),
                username,
            });
        }
    }

    items
}

pub(crate) fn to_member_page(payload: &MemberListPayload, page: Option<i64>) -> MemberPage {
    MemberPage {
        items: payload.result.iter().filter_map(to_member_summary).collect(),
        page,
        total_pages: total_pages(&payload.nb_pages),
    }
}

pub(crate) fn total_pages(value: &Option<LooseValue>) -> Option<i64> {
    value.positive_integer()
}

pub struct DashboardService<'a> {
    repository: DashboardRepository<'a>,
}

impl<'a> DashboardService<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self {
            repository: DashboardRepository::new(client),
        }
    }

    pub async fn get_community_activity(&self, session_id: &str) -> Result<CommunityActivityResponse, ApiError> {
        let payload = self.repository.get_activities(session_id).await?;
        let items = to_activity_items(&payload);

        tracing::info!(items_count = items.len(), "community activity normalized");
        Ok(CommunityActivityResponse { items })
    }

    pub async fn get_top_members(&self, session_id: &str, filters: &TopMembersFilters) -> Result<MemberPage, ApiError> {
        let payload = self
            .repository
            .get_top_members(session_id, filters.sex.as_api(), filters.age_range.as_deref(), filters.page)
            .await?;
        let page = to_member_page(&payload, filters.page);

        tracing::info!(
            items_count = page.items.len(),
            items_with_photo = page.items.iter().filter(|m| m.photo_url.is_some()).count(),
            "top members normalized"
        );
        Ok(page)
    }

    pub async fn get_recent_visitors(&self, session_id: &str, page: Option<i64>) -> Result<MemberPage, ApiError> {
        let payload = self.repository.get_recent_visitors(session_id, page).await?;
        let page = to_member_page(&payload, page);

        tracing::info!(
            items_count = page.items.len(),
            items_with_photo = page.items.iter().filter(|m| m.photo_url.is_some()).count(),
            "recent visitors normalized"
        );
        Ok(page)
    }
}
