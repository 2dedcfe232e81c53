//! Review entity - a star rating tied to a completed offer

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Longest accepted review comment, in characters
pub const MAX_COMMENT_LENGTH: usize = 500;

/// Review entity
///
/// At most one review exists per (offer, reviewer, reviewee) triple;
/// the database enforces this with a unique index and the duplicate
/// insert is surfaced as "already reviewed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub stars: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Create a new Review. Blank comments are stored as None.
    pub fn new(
        offer_id: Uuid,
        reviewer_id: Uuid,
        reviewee_id: Uuid,
        stars: i16,
        comment: Option<String>,
    ) -> Self {
        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Self {
            id: Uuid::new_v4(),
            offer_id,
            reviewer_id,
            reviewee_id,
            stars,
            comment,
            created_at: Utc::now(),
        }
    }

    /// Check if the reviewer wrote a comment
    #[inline]
    pub fn has_comment(&self) -> bool {
        self.comment.is_some()
    }
}
