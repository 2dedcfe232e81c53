//! Offer service
//!
//! Handles listing creation (with optional image), the public browse
//! feed, the detail view, and the completion transition.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use swap_common::{PutOptions, Session};
use swap_core::entities::Offer;
use swap_core::error::DomainError;
use swap_core::traits::OfferQuery;

use crate::dto::{
    CreateOfferRequest, ImageUpload, OfferDetailResponse, OfferResponse, ProfileResponse,
    UploadedImageResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::images::{extension_for, validate_image};

/// Offer service
pub struct OfferService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OfferService<'a> {
    /// Create a new OfferService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new open listing. When an image is supplied it is
    /// stored first; an upload failure aborts the whole creation.
    #[instrument(skip(self, session, request, image))]
    pub async fn create_offer(
        &self,
        session: &Session,
        request: CreateOfferRequest,
        image: Option<ImageUpload>,
    ) -> ServiceResult<OfferResponse> {
        request.validate()?;

        let user_id = session.user_id();

        let image_url = match image {
            Some(upload) => Some(self.store_image(user_id, &upload).await?.url),
            None => None,
        };

        let mut offer = Offer::new(
            user_id,
            request.kind,
            request.skill,
            request.description,
            request.zip,
        );
        offer.city = request.city;
        offer.tags = request.tags;
        offer.set_image_url(image_url);

        self.ctx.offer_repo().create(&offer).await?;

        info!(offer_id = %offer.id, kind = %offer.kind.as_str(), "Offer created");

        Ok(OfferResponse::from(offer))
    }

    /// Open listings, newest first, optionally filtered by kind
    #[instrument(skip(self))]
    pub async fn browse(&self, query: OfferQuery) -> ServiceResult<Vec<OfferResponse>> {
        let offers = self.ctx.offer_repo().find_open(query).await?;
        Ok(offers.into_iter().map(OfferResponse::from).collect())
    }

    /// Fetch one listing
    #[instrument(skip(self))]
    pub async fn get(&self, offer_id: Uuid) -> ServiceResult<OfferResponse> {
        let offer = self.find_offer(offer_id).await?;
        Ok(OfferResponse::from(offer))
    }

    /// Listing detail joined with its owner and whether the viewer has
    /// already left a review for this listing
    #[instrument(skip(self, session))]
    pub async fn offer_detail(
        &self,
        session: &Session,
        offer_id: Uuid,
    ) -> ServiceResult<OfferDetailResponse> {
        let offer = self.find_offer(offer_id).await?;

        let (owner, existing) = tokio::try_join!(
            self.ctx.profile_repo().find_by_id(offer.user_id),
            self.ctx.review_repo().find_by_triple(
                offer.id,
                session.user_id(),
                offer.user_id,
            ),
        )?;

        let owner = owner
            .ok_or_else(|| ServiceError::not_found("Profile", offer.user_id.to_string()))?;

        Ok(OfferDetailResponse {
            offer: OfferResponse::from(offer),
            owner: ProfileResponse::from(owner),
            viewer_reviewed: existing.is_some(),
        })
    }

    /// Owner marks the work done. `completed_at` is set exactly once; a
    /// second attempt is a conflict, never a silent success.
    #[instrument(skip(self, session))]
    pub async fn complete_offer(
        &self,
        session: &Session,
        offer_id: Uuid,
    ) -> ServiceResult<OfferResponse> {
        let mut offer = self.find_offer(offer_id).await?;

        if !offer.is_owned_by(session.user_id()) {
            return Err(DomainError::NotOfferOwner.into());
        }

        let now = Utc::now();
        if !offer.complete(now) {
            return Err(DomainError::OfferAlreadyCompleted.into());
        }

        self.ctx.offer_repo().complete(offer.id, now).await?;

        info!(offer_id = %offer.id, "Offer completed");

        Ok(OfferResponse::from(offer))
    }

    /// Attach or replace the image on an existing listing. Owner only.
    #[instrument(skip(self, session, upload))]
    pub async fn upload_offer_image(
        &self,
        session: &Session,
        offer_id: Uuid,
        upload: ImageUpload,
    ) -> ServiceResult<UploadedImageResponse> {
        let mut offer = self.find_offer(offer_id).await?;

        if !offer.is_owned_by(session.user_id()) {
            return Err(DomainError::NotOfferOwner.into());
        }

        let stored = self.store_image(session.user_id(), &upload).await?;
        self.ctx
            .offer_repo()
            .update_image(offer.id, &stored.url)
            .await?;
        offer.set_image_url(Some(stored.url.clone()));

        info!(offer_id = %offer.id, path = %stored.path, "Offer image replaced");

        Ok(stored)
    }

    async fn find_offer(&self, offer_id: Uuid) -> ServiceResult<Offer> {
        self.ctx
            .offer_repo()
            .find_by_id(offer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Offer", offer_id.to_string()))
    }

    /// Validate and store one listing image, returning its path and URL
    async fn store_image(
        &self,
        user_id: Uuid,
        upload: &ImageUpload,
    ) -> ServiceResult<UploadedImageResponse> {
        validate_image(upload, self.ctx.storage_config())?;

        let path = format!(
            "offer-images/{user_id}/offer-{}.{}",
            Utc::now().timestamp_millis(),
            extension_for(&upload.content_type)
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
        Ok(UploadedImageResponse { path, url })
    }
}
