//! Review service
//!
//! Star ratings tied to completed swaps: eligibility, submission behind
//! the duplicate guard, and hydrated review lists for profile and
//! listing pages.

use std::collections::HashSet;

use tracing::{info, instrument};
use uuid::Uuid;

use swap_common::Session;
use swap_core::entities::{Offer, Review, MAX_COMMENT_LENGTH};
use swap_core::error::DomainError;

use crate::dto::{
    ReviewDetailResponse, ReviewForm, ReviewReceiptResponse, ReviewResponse, ReviewWithContext,
    ReviewableSwap, ReviewableSwapResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// How many reviews the profile and listing pages show
const RECENT_LIMIT: i64 = 3;

/// Whether a viewer may rate this swap: it must be completed and the
/// viewer must not have reviewed it already. An existing review by
/// someone else does not block the viewer. Keeping owners from rating
/// their own listing is the caller's check.
#[must_use]
pub fn can_review(offer: &Offer, viewer_id: Uuid, existing: Option<&Review>) -> bool {
    offer.completed_at.is_some() && !existing.is_some_and(|review| review.reviewer_id == viewer_id)
}

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    /// Create a new ReviewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Whether the acting user may rate the offer's owner for this swap
    #[instrument(skip(self, session))]
    pub async fn can_review(&self, session: &Session, offer_id: Uuid) -> ServiceResult<bool> {
        let viewer_id = session.user_id();
        let offer = self.find_offer(offer_id).await?;

        if offer.is_owned_by(viewer_id) {
            return Ok(false);
        }

        let existing = self
            .ctx
            .review_repo()
            .find_by_triple(offer.id, viewer_id, offer.user_id)
            .await?;

        Ok(can_review(&offer, viewer_id, existing.as_ref()))
    }

    /// Submit a review for the swap's counterpart.
    ///
    /// The rating rules are checked in order, each with its own error,
    /// before any persistence call. Duplicates are caught by the store's
    /// unique triple and surface as `AlreadyReviewed` with the first
    /// review intact. On success the form is cleared and the receipt
    /// carries the reviewee's refreshed rating aggregate.
    #[instrument(skip(self, session, form))]
    pub async fn submit(
        &self,
        session: &Session,
        form: &mut ReviewForm,
        offer_id: Uuid,
        reviewee_id: Uuid,
    ) -> ServiceResult<ReviewReceiptResponse> {
        let reviewer_id = session.user_id();

        if form.stars == 0 {
            return Err(DomainError::NoStarsSelected.into());
        }
        if !(1..=5).contains(&form.stars) {
            return Err(DomainError::StarsOutOfRange { stars: form.stars }.into());
        }
        if let Some(comment) = &form.comment {
            if comment.chars().count() > MAX_COMMENT_LENGTH {
                return Err(DomainError::CommentTooLong {
                    max: MAX_COMMENT_LENGTH,
                }
                .into());
            }
        }

        // Confirm the swap exists before writing
        let offer = self.find_offer(offer_id).await?;

        let review = Review::new(
            offer.id,
            reviewer_id,
            reviewee_id,
            form.stars,
            form.comment.clone(),
        );
        self.ctx.review_repo().create(&review).await?;

        info!(
            review_id = %review.id,
            offer_id = %offer.id,
            reviewee_id = %reviewee_id,
            stars = review.stars,
            "Review submitted"
        );

        let summary = self.ctx.profile_repo().rating_summary(reviewee_id).await?;

        form.clear();

        Ok(ReviewReceiptResponse {
            review: ReviewResponse::from(review),
            reviewee_rating: summary.into(),
        })
    }

    /// Newest reviews received by a member, with reviewer and swap context
    #[instrument(skip(self))]
    pub async fn recent_for_member(
        &self,
        profile_id: Uuid,
    ) -> ServiceResult<Vec<ReviewDetailResponse>> {
        let reviews = self
            .ctx
            .review_repo()
            .find_by_reviewee(profile_id, RECENT_LIMIT)
            .await?;
        self.hydrate(reviews).await
    }

    /// Newest reviews attached to one listing
    #[instrument(skip(self))]
    pub async fn recent_for_offer(
        &self,
        offer_id: Uuid,
    ) -> ServiceResult<Vec<ReviewDetailResponse>> {
        let reviews = self
            .ctx
            .review_repo()
            .find_by_offer(offer_id, RECENT_LIMIT)
            .await?;
        self.hydrate(reviews).await
    }

    /// Completed swaps between the acting user and one counterpart that
    /// the acting user has not reviewed yet
    #[instrument(skip(self, session))]
    pub async fn reviewable_services(
        &self,
        session: &Session,
        counterpart_id: Uuid,
    ) -> ServiceResult<Vec<ReviewableSwapResponse>> {
        let viewer_id = session.user_id();

        let counterpart = self
            .ctx
            .profile_repo()
            .find_by_id(counterpart_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile", counterpart_id.to_string()))?;

        let (conversations, reviewed) = tokio::try_join!(
            self.ctx.conversation_repo().find_between(viewer_id, counterpart_id),
            self.ctx
                .review_repo()
                .reviewed_offer_ids(viewer_id, Some(counterpart_id)),
        )?;
        let reviewed: HashSet<Uuid> = reviewed.into_iter().collect();

        let mut swaps = Vec::new();
        for conversation in conversations {
            let Some(offer) = self.ctx.offer_repo().find_by_id(conversation.offer_id).await? else {
                continue;
            };
            if offer.completed_at.is_some() && !reviewed.contains(&offer.id) {
                swaps.push(ReviewableSwapResponse::from(ReviewableSwap {
                    offer,
                    counterpart: counterpart.clone(),
                }));
            }
        }

        Ok(swaps)
    }

    /// Completed swaps across all of the acting user's conversations
    /// still waiting on their review
    #[instrument(skip(self, session))]
    pub async fn pending_reviews(
        &self,
        session: &Session,
    ) -> ServiceResult<Vec<ReviewableSwapResponse>> {
        let viewer_id = session.user_id();

        let (conversations, reviewed) = tokio::try_join!(
            self.ctx.conversation_repo().find_by_user(viewer_id),
            self.ctx.review_repo().reviewed_offer_ids(viewer_id, None),
        )?;
        let reviewed: HashSet<Uuid> = reviewed.into_iter().collect();

        let mut swaps = Vec::new();
        for conversation in conversations {
            let Some(other_id) = conversation.other_participant(viewer_id) else {
                continue;
            };
            let Some(offer) = self.ctx.offer_repo().find_by_id(conversation.offer_id).await? else {
                continue;
            };
            if offer.completed_at.is_none() || reviewed.contains(&offer.id) {
                continue;
            }
            let Some(counterpart) = self.ctx.profile_repo().find_by_id(other_id).await? else {
                continue;
            };
            swaps.push(ReviewableSwapResponse::from(ReviewableSwap { offer, counterpart }));
        }

        Ok(swaps)
    }

    async fn find_offer(&self, offer_id: Uuid) -> ServiceResult<Offer> {
        self.ctx
            .offer_repo()
            .find_by_id(offer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Offer", offer_id.to_string()))
    }

    /// Attach reviewer profile and swap context to raw reviews. Deleted
    /// reviewers or offers hydrate as `None`, never drop the review.
    async fn hydrate(&self, reviews: Vec<Review>) -> ServiceResult<Vec<ReviewDetailResponse>> {
        let mut detailed = Vec::with_capacity(reviews.len());
        for review in reviews {
            let (reviewer, offer) = tokio::try_join!(
                self.ctx.profile_repo().find_by_id(review.reviewer_id),
                self.ctx.offer_repo().find_by_id(review.offer_id),
            )?;
            detailed.push(ReviewDetailResponse::from(ReviewWithContext {
                review,
                reviewer,
                offer,
            }));
        }
        Ok(detailed)
    }
}
