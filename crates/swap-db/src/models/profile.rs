//! Profile database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for profiles table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub interests: Vec<String>,
    pub skills_offered: Vec<String>,
    pub skills_needed: Vec<String>,
    pub rating: f64,
    pub reviews_count: i32,
    pub completed_swaps: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileModel {
    /// Check if the member uploaded an avatar
    #[inline]
    pub fn has_avatar(&self) -> bool {
        self.avatar_url.is_some()
    }
}
