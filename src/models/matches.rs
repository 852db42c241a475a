use serde::Serialize;

use super::MemberGender;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<MemberGender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverPage {
    pub items: Vec<MatchCandidate>,
    pub page: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchList {
    pub items: Vec<MatchCandidate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverGender {
    Men,
    Women,
    Couple,
}

impl DiscoverGender {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "men" => Some(DiscoverGender::Men),
            "women" => Some(DiscoverGender::Women),
            "couple" => Some(DiscoverGender::Couple),
            _ => None,
        }
    }

    pub fn as_api(&self) -> &'static str {
        match self {
            DiscoverGender::Men => "man",
            DiscoverGender::Women => "woman",
            DiscoverGender::Couple => "couple",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscoverFilters {
    pub page: Option<i64>,
    pub gender: Option<DiscoverGender>,
    pub age_from: Option<i64>,
    pub age_to: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    Like,
    Dislike,
}

impl MatchAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "like" => Some(MatchAction::Like),
            "dislike" => Some(MatchAction::Dislike),
            _ => None,
        }
    }

    /// Provider vote value: 1 like, 0 pass
    pub fn vote(&self) -> i64 {
        match self {
            MatchAction::Like => 1,
            MatchAction::Dislike => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchActionResult {
    pub is_match: bool,
}
