use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::upstream::{lenient_list, lenient_object, Area, LooseValue, Params, UpstreamClient};

#[derive(Debug, Default, Deserialize)]
pub struct WallOnlineBlock {
    pub id: Option<LooseValue>,
    pub pseudo: Option<LooseValue>,
    pub sexe1: Option<LooseValue>,
    pub date: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WallChangeBlock {
    pub id: Option<LooseValue>,
    pub pseudo: Option<LooseValue>,
    pub date_modification: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WallAddPhotoBlock {
    pub user_id: Option<LooseValue>,
    pub pseudo: Option<LooseValue>,
    pub jour: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WallBirthdayBlock {
    pub id: Option<LooseValue>,
    pub pseudo: Option<LooseValue>,
    pub sexe1: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WallFriendsBlock {
    pub id1: Option<LooseValue>,
    pub pseudo1: Option<LooseValue>,
    pub id2: Option<LooseValue>,
    pub sexe1: Option<LooseValue>,
    pub date: Option<LooseValue>,
}

/// One sample of each wall event kind
#[derive(Debug, Default, Deserialize)]
pub struct ActivitiesPayload {
    #[serde(default, deserialize_with = "lenient_object")]
    pub wall_online: Option<WallOnlineBlock>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub wall_change: Option<WallChangeBlock>,
    #[serde(default, deserialize_with = "lenient_object", rename = "wall_addPhoto")]
    pub wall_add_photo: Option<WallAddPhotoBlock>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub wall_birthday: Option<WallBirthdayBlock>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub wall_friends: Option<WallFriendsBlock>,
}

/// Member card as the provider lists it in top members, visitors and match decks
#[derive(Debug, Default, Deserialize)]
pub struct MembreBlock {
    pub id: Option<LooseValue>,
    pub user_id: Option<LooseValue>,
    pub pseudo: Option<LooseValue>,
    pub sexe1: Option<LooseValue>,
    pub age: Option<LooseValue>,
    pub zone_name: Option<LooseValue>,
    pub moyenne: Option<LooseValue>,
    pub photo: Option<LooseValue>,
    /// Any shape: URL, JSON-encoded string, list or nested object
    pub photos: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MemberListPayload {
    pub connected: Option<LooseValue>,
    pub nb_pages: Option<LooseValue>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub result: Vec<MembreBlock>,
}

pub struct DashboardRepository<'a> {
    client: &'a UpstreamClient,
}

impl<'a> DashboardRepository<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self { client }
    }

    pub async fn get_activities(&self, session_id: &str) -> Result<ActivitiesPayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key());

        let payload: ActivitiesPayload = self
            .client
            .get(Area::Dashboard, "/ajax_api/getActivities", params)
            .await?;

        tracing::info!(
            has_wall_online = payload.wall_online.is_some(),
            has_wall_change = payload.wall_change.is_some(),
            has_wall_add_photo = payload.wall_add_photo.is_some(),
            has_wall_birthday = payload.wall_birthday.is_some(),
            has_wall_friends = payload.wall_friends.is_some(),
            "getActivities payload received"
        );

        Ok(payload)
    }

    pub async fn get_top_members(
        &self,
        session_id: &str,
        sex: &str,
        age_range: Option<&str>,
        page: Option<i64>,
    ) -> Result<MemberListPayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key())
            .set("sex", sex)
            .set_opt("age_range", age_range)
            .set_opt("page", page);

        self.client.post_form(Area::Dashboard, "/index_api/topmembers", params).await
    }

    pub async fn get_recent_visitors(&self, session_id: &str, page: Option<i64>) -> Result<MemberListPayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key())
            .set_opt("page", page);

        self.client
            .post_form(Area::Dashboard, "/index_api/guest/get/visites", params)
            .await
    }
}
