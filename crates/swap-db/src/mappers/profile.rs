//! Profile entity <-> model mapper

use swap_core::entities::Profile;

use crate::models::ProfileModel;

/// Convert ProfileModel to Profile entity
impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        Profile {
            id: model.id,
            email: model.email,
            name: model.name,
            avatar_url: model.avatar_url,
            bio: model.bio,
            phone: model.phone,
            city: model.city,
            zip: model.zip,
            interests: model.interests,
            skills_offered: model.skills_offered,
            skills_needed: model.skills_needed,
            rating: model.rating,
            reviews_count: model.reviews_count,
            completed_swaps: model.completed_swaps,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
