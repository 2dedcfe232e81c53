//! Offer database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for offers table
#[derive(Debug, Clone, FromRow)]
pub struct OfferModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub skill: String,
    pub description: String,
    pub zip: String,
    pub city: Option<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OfferModel {
    /// Check if the listing is still in the public feed
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == "open"
    }

    /// Check if the swap has been completed
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
