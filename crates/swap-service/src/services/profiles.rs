//! Profile service
//!
//! Handles member profiles: public reads, own-profile edits, avatar
//! uploads, and the store-computed rating aggregate.

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use swap_common::{PutOptions, Session};

use crate::dto::{
    ImageUpload, OwnProfileResponse, ProfileResponse, RatingSummaryResponse, ReviewDetailResponse,
    UpdateProfileRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::images::validate_image;
use super::reviews::ReviewService;

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    /// Create a new ProfileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public view of a member profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, profile_id: Uuid) -> ServiceResult<ProfileResponse> {
        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile", profile_id.to_string()))?;

        Ok(ProfileResponse::from(profile))
    }

    /// The signed-in member's own profile, contact fields included
    #[instrument(skip(self, session))]
    pub async fn own_profile(&self, session: &Session) -> ServiceResult<OwnProfileResponse> {
        let user_id = session.user_id();
        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile", user_id.to_string()))?;

        Ok(OwnProfileResponse::from(profile))
    }

    /// Update the signed-in member's editable fields. Absent fields are
    /// left untouched.
    #[instrument(skip(self, session, request))]
    pub async fn update_profile(
        &self,
        session: &Session,
        request: UpdateProfileRequest,
    ) -> ServiceResult<OwnProfileResponse> {
        request.validate()?;

        let user_id = session.user_id();
        let mut profile = self
            .ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile", user_id.to_string()))?;

        if let Some(name) = request.name {
            profile.set_name(name);
        }
        if let Some(bio) = request.bio {
            profile.set_bio(Some(bio));
        }
        if let Some(phone) = request.phone {
            profile.set_phone(Some(phone));
        }
        if request.city.is_some() || request.zip.is_some() {
            let city = request.city.or_else(|| profile.city.clone());
            let zip = request.zip.or_else(|| profile.zip.clone());
            profile.set_location(city, zip);
        }
        if let Some(interests) = request.interests {
            profile.set_interests(interests);
        }
        if let Some(offered) = request.skills_offered {
            profile.set_skills_offered(offered);
        }
        if let Some(needed) = request.skills_needed {
            profile.set_skills_needed(needed);
        }

        self.ctx.profile_repo().update(&profile).await?;

        info!(profile_id = %profile.id, "Profile updated");

        Ok(OwnProfileResponse::from(profile))
    }

    /// Replace the signed-in member's avatar.
    ///
    /// Stores the upload at `avatars/{user_id}/avatar-{millis}.jpg`,
    /// records the public URL, and removes the previous object
    /// best-effort; a stale leftover never blocks the new avatar.
    #[instrument(skip(self, session, upload))]
    pub async fn update_avatar(
        &self,
        session: &Session,
        upload: ImageUpload,
    ) -> ServiceResult<OwnProfileResponse> {
        let user_id = session.user_id();
        let mut profile = self
            .ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile", user_id.to_string()))?;

        validate_image(&upload, self.ctx.storage_config())?;

        if let Some(old_path) = profile
            .avatar_url
            .as_deref()
            .and_then(|url| url.rsplit('/').next())
        {
            let path = format!("avatars/{user_id}/{old_path}");
            if let Err(e) = self.ctx.blob_store().delete(&path).await {
                warn!(path = %path, error = %e, "Failed to delete previous avatar");
            }
        }

        let path = format!(
            "avatars/{user_id}/avatar-{}.jpg",
            Utc::now().timestamp_millis()
        );
        self.ctx
            .blob_store()
            .put(
                &path,
                &upload.bytes,
                PutOptions::overwriting(&upload.content_type),
            )
            .await?;

        let url = self.ctx.blob_store().public_url(&path);
        self.ctx.profile_repo().update_avatar(user_id, &url).await?;
        profile.set_avatar_url(Some(url));

        info!(profile_id = %user_id, path = %path, "Avatar updated");

        Ok(OwnProfileResponse::from(profile))
    }

    /// Store-computed rating aggregate for a member
    #[instrument(skip(self))]
    pub async fn rating(&self, profile_id: Uuid) -> ServiceResult<RatingSummaryResponse> {
        let summary = self.ctx.profile_repo().rating_summary(profile_id).await?;
        Ok(RatingSummaryResponse::from(summary))
    }

    /// Newest reviews left for a member, hydrated for the profile page
    #[instrument(skip(self))]
    pub async fn recent_reviews(
        &self,
        profile_id: Uuid,
    ) -> ServiceResult<Vec<ReviewDetailResponse>> {
        ReviewService::new(self.ctx)
            .recent_for_member(profile_id)
            .await
    }
}
