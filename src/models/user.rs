use serde::Serialize;

use super::MemberGender;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfilePhoto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<MemberGender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub photos: Vec<UserProfilePhoto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silhouette: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfileResponse {
    pub user: UserProfile,
}

/// Validated PATCH body; numeric attributes are provider enum codes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub eye_color: Option<f64>,
    pub hair_color: Option<f64>,
    pub situation: Option<f64>,
    pub silhouette: Option<f64>,
    pub personality: Option<f64>,
    pub schedule: Option<f64>,
    pub orientation: Option<f64>,
    pub children: Option<f64>,
    pub education: Option<f64>,
    pub profession: Option<f64>,
    pub email: Option<String>,
    pub lang_ui: Option<String>,
    pub body_options: Option<Vec<f64>>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProfileResponse {
    pub accepted: u8,
}
