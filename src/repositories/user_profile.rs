use serde::Deserialize;

use crate::error::ApiError;
use crate::models::user::UpdateProfileRequest;
use crate::upstream::{lenient_list, lenient_object, Area, LooseValue, Params, UpstreamClient};

#[derive(Debug, Default, Deserialize)]
pub struct ProfilePhotoV2 {
    pub normal: Option<LooseValue>,
    pub sq_430: Option<LooseValue>,
    pub sq_middle: Option<LooseValue>,
    pub sq_small: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfilePhotoLegacy {
    pub url_big: Option<LooseValue>,
    pub url_middle: Option<LooseValue>,
    pub url_small: Option<LooseValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileBlock {
    pub id: Option<LooseValue>,
    pub pseudo: Option<LooseValue>,
    pub prenom: Option<LooseValue>,
    pub nom_complet: Option<LooseValue>,
    pub age: Option<LooseValue>,
    pub sexe1: Option<LooseValue>,
    pub zone_name: Option<LooseValue>,
    pub email: Option<LooseValue>,
    pub visite: Option<LooseValue>,
    pub photo: Option<LooseValue>,
    pub description: Option<LooseValue>,
    pub taille: Option<LooseValue>,
    pub poids: Option<LooseValue>,
    pub yeux: Option<LooseValue>,
    pub cheveux: Option<LooseValue>,
    pub situation: Option<LooseValue>,
    pub silhouette: Option<LooseValue>,
    pub personnalite: Option<LooseValue>,
    pub horaires: Option<LooseValue>,
    pub sexe2: Option<LooseValue>,
    pub child: Option<LooseValue>,
    pub etudes: Option<LooseValue>,
    pub travail: Option<LooseValue>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub photos: Vec<ProfilePhotoLegacy>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub photos_v2: Vec<ProfilePhotoV2>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GetProfilePayload {
    pub connected: Option<LooseValue>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub result: Option<ProfileBlock>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfilePayload {
    pub accepted: Option<LooseValue>,
    pub error: Option<LooseValue>,
}

pub struct UserProfileRepository<'a> {
    client: &'a UpstreamClient,
}

impl<'a> UserProfileRepository<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self { client }
    }

    pub async fn get_profile(&self, session_id: &str, user_id: i64, with_photos: bool) -> Result<GetProfilePayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key())
            .set("id", user_id)
            .set_opt("get_picture_430", with_photos.then_some(1i64));

        self.client.post_form(Area::UserProfile, "/index_api/user", params).await
    }

    pub async fn update_informations(
        &self,
        session_id: &str,
        payload: &UpdateProfileRequest,
    ) -> Result<UpdateProfilePayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key())
            .set("nom_complet", &payload.full_name)
            .set_list("opts_body[]", payload.body_options.clone())
            .set_opt("taille", payload.height)
            .set_opt("poids", payload.weight)
            .set_opt("yeux", payload.eye_color)
            .set_opt("cheveux", payload.hair_color)
            .set_opt("situation", payload.situation)
            .set_opt("silhouette", payload.silhouette)
            .set_opt("personnalite", payload.personality)
            .set_opt("horaires", payload.schedule)
            .set_opt("sexe2", payload.orientation)
            .set_opt("child", payload.children)
            .set_opt("etudes", payload.education)
            .set_opt("travail", payload.profession)
            .set_opt("email", payload.email.as_ref())
            .set_opt("lang_ui", payload.lang_ui.as_ref());

        self.client
            .post_form(Area::UserProfile, "/index_api/user/modify/informations", params)
            .await
    }

    pub async fn update_description(&self, session_id: &str, description: &str) -> Result<UpdateProfilePayload, ApiError> {
        let params = Params::new()
            .set("session_id", session_id)
            .set("api_key", self.client.api_key())
            .set("description", description);

        self.client
            .post_form(Area::UserProfile, "/index_api/user/modify/description", params)
            .await
    }
}
