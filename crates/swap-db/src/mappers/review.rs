//! Review entity <-> model mapper

use swap_core::entities::Review;

use crate::models::ReviewModel;

/// Convert ReviewModel to Review entity
impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        Review {
            id: model.id,
            offer_id: model.offer_id,
            reviewer_id: model.reviewer_id,
            reviewee_id: model.reviewee_id,
            stars: model.stars,
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}
