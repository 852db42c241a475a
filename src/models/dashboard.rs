use serde::Serialize;

use super::{ItemId, MemberGender};

/// Wall event kinds, spelled the way the provider names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityAction {
    #[serde(rename = "con")]
    Online,
    #[serde(rename = "modif")]
    ProfileChange,
    #[serde(rename = "add_tof")]
    PhotoAdded,
    #[serde(rename = "birthday")]
    Birthday,
    #[serde(rename = "friends")]
    Friends,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityActivityItem {
    pub id: ItemId,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<MemberGender>,
    pub action: ActivityAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityActivityResponse {
    pub items: Vec<CommunityActivityItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<MemberGender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Shared shape of top-members and recent-visitors pages
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPage {
    pub items: Vec<MemberSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopMembersSex {
    Man,
    Woman,
}

impl TopMembersSex {
    pub fn as_api(&self) -> &'static str {
        match self {
            TopMembersSex::Man => "man",
            TopMembersSex::Woman => "woman",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopMembersFilters {
    pub sex: TopMembersSex,
    pub page: Option<i64>,
    pub age_range: Option<String>,
}
