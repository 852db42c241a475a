use crate::error::ApiError;
use crate::models::user::{
    UpdateProfileRequest, UpdateProfileResponse, UserProfile, UserProfilePhoto, UserProfileResponse,
};
use crate::repositories::user_profile::{ProfileBlock, ProfilePhotoLegacy, ProfilePhotoV2, UpdateProfilePayload};
use crate::repositories::UserProfileRepository;
use crate::upstream::loose::gender_from_code;
use crate::upstream::{LooseField, UpstreamClient};

use super::{ensure_connected, rejection};

fn photo(large: Option<String>, medium: Option<String>, small: Option<String>) -> Option<UserProfilePhoto> {
    if large.is_none() && medium.is_none() && small.is_none() {
        return None;
    }
    Some(UserProfilePhoto { large, medium, small })
}

fn map_photo_v2(raw: &ProfilePhotoV2) -> Option<UserProfilePhoto> {
    photo(
        raw.sq_430.text().or_else(|| raw.normal.text()),
        raw.sq_middle.text().or_else(|| raw.normal.text()),
        raw.sq_small.text(),
    )
}

fn map_photo_legacy(raw: &ProfilePhotoLegacy) -> Option<UserProfilePhoto> {
    photo(raw.url_big.text(), raw.url_middle.text(), raw.url_small.text())
}

/// `photos_v2` when it yields anything, otherwise the legacy list
fn photos(profile: &ProfileBlock) -> Vec<UserProfilePhoto> {
    let v2: Vec<_> = profile.photos_v2.iter().filter_map(map_photo_v2).collect();
    if !v2.is_empty() {
        return v2;
    }
    profile.photos.iter().filter_map(map_photo_legacy).collect()
}

pub(crate) fn to_user_profile(profile: &ProfileBlock) -> UserProfile {
    let photos = photos(profile);
    let avatar_url = photos
        .first()
        .and_then(|p| p.large.clone().or_else(|| p.medium.clone()).or_else(|| p.small.clone()));

    UserProfile {
        id: profile.id.positive_integer().unwrap_or(0),
        username: profile.pseudo.text().unwrap_or_else(|| "Member".to_string()),
        full_name: profile.nom_complet.text().or_else(|| profile.prenom.text()),
        age: profile.age.positive_integer(),
        gender: gender_from_code(&profile.sexe1),
        location: profile.zone_name.text(),
        email: profile.email.text(),
        last_visit: profile.visite.text(),
        avatar_url,
        photos,
        photo_count: profile.photo.positive_integer(),
        description: profile.description.text(),
        height: profile.taille.integer(),
        weight: profile.poids.integer(),
        eye_color: profile.yeux.integer(),
        hair_color: profile.cheveux.integer(),
        situation: profile.situation.integer(),
        silhouette: profile.silhouette.integer(),
        personality: profile.personnalite.integer(),
        schedule: profile.horaires.integer(),
        orientation: profile.sexe2.integer(),
        children: profile.child.integer(),
        education: profile.etudes.integer(),
        profession: profile.travail.integer(),
    }
}

fn ensure_accepted(payload: &UpdateProfilePayload) -> Result<(), ApiError> {
    if payload.accepted.integer() == Some(0) {
        return Err(rejection(&payload.error, "Profile update rejected"));
    }
    Ok(())
}

pub struct UserProfileService<'a> {
    repository: UserProfileRepository<'a>,
}

impl<'a> UserProfileService<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self {
            repository: UserProfileRepository::new(client),
        }
    }

    pub async fn get_profile(&self, session_id: &str, user_id: i64) -> Result<UserProfileResponse, ApiError> {
        let payload = self.repository.get_profile(session_id, user_id, true).await?;

        ensure_connected(&payload.connected)?;

        let profile = payload
            .result
            .as_ref()
            .ok_or_else(|| ApiError::not_found("Profile not found"))?;

        Ok(UserProfileResponse {
            user: to_user_profile(profile),
        })
    }

    pub async fn update_profile(
        &self,
        session_id: &str,
        request: &UpdateProfileRequest,
    ) -> Result<UpdateProfileResponse, ApiError> {
        let informations = self.repository.update_informations(session_id, request).await?;
        ensure_accepted(&informations)?;

        let description = request.description.as_deref().map(str::trim).unwrap_or_default();
        if !description.is_empty() {
            let updated = self.repository.update_description(session_id, description).await?;
            ensure_accepted(&updated)?;
        }

        tracing::info!(with_description = !description.is_empty(), "profile updated");
        Ok(UpdateProfileResponse { accepted: 1 })
    }
}
