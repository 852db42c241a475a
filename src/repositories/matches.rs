use serde::Deserialize;

use super::dashboard::MembreBlock;
use crate::error::ApiError;
use crate::models::matches::{DiscoverGender, MatchAction};
use crate::upstream::{lenient_list, Area, LooseValue, Params, UpstreamClient};

#[derive(Debug, Default, Deserialize)]
pub struct DeckPayload {
    pub connected: Option<LooseValue>,
    pub nb_pages: Option<LooseValue>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub result: Vec<MembreBlock>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VotePayload {
    pub accepted: Option<LooseValue>,
    #[serde(rename = "match")]
    pub is_match: Option<LooseValue>,
    pub error: Option<LooseValue>,
}

pub struct DiscoverRequest {
    pub page: i64,
    pub gender: Option<DiscoverGender>,
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
}

pub struct MatchRepository<'a> {
    client: &'a UpstreamClient,
}

impl<'a> MatchRepository<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self { client }
    }

    pub async fn discover(&self, session_id: &str, request: &DiscoverRequest) -> Result<DeckPayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key())
            .set_opt("sex", request.gender.map(|g| g.as_api()))
            .set_opt("age_min", request.age_min)
            .set_opt("age_max", request.age_max)
            .set("page", request.page);

        self.client.post_form(Area::Match, "/index_api/match/discover", params).await
    }

    pub async fn matches(&self, session_id: &str) -> Result<DeckPayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key());

        self.client.post_form(Area::Match, "/index_api/match/list", params).await
    }

    pub async fn vote(&self, session_id: &str, user_id: i64, action: MatchAction) -> Result<VotePayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key())
            .set("user_id", user_id)
            .set("vote", action.vote());

        self.client.post_form(Area::Match, "/index_api/match/vote", params).await
    }
}
