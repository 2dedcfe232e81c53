//! Offer entity <-> model mapper

use swap_core::entities::{Offer, OfferKind, OfferStatus};

use crate::models::OfferModel;

/// Convert OfferModel to Offer entity
impl From<OfferModel> for Offer {
    fn from(model: OfferModel) -> Self {
        Offer {
            id: model.id,
            user_id: model.user_id,
            kind: OfferKind::from(model.kind.as_str()),
            skill: model.skill,
            description: model.description,
            zip: model.zip,
            city: model.city,
            tags: model.tags,
            image_url: model.image_url,
            status: OfferStatus::from(model.status.as_str()),
            completed_at: model.completed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
