//! Review database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for reviews table
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub stars: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReviewModel {
    /// Check if the reviewer wrote a comment
    #[inline]
    pub fn has_comment(&self) -> bool {
        self.comment.is_some()
    }
}
