//! Offer entity - a posted skill-swap listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether the post offers a skill or requests one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferKind {
    /// The author offers a skill to others
    #[default]
    Offer,
    /// The author is looking for someone with a skill
    Request,
}

impl OfferKind {
    /// Get the database string value
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Request => "request",
        }
    }
}

impl From<&str> for OfferKind {
    fn from(value: &str) -> Self {
        match value {
            "request" => Self::Request,
            _ => Self::Offer, // Default for "offer" and unknown values
        }
    }
}

/// Listing lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    /// Visible in the public feed
    #[default]
    Open,
    /// Both conversation parties agreed; delisted from the feed
    Matched,
    /// Owner marked the work done
    Completed,
}

impl OfferStatus {
    /// Get the database string value
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Matched => "matched",
            Self::Completed => "completed",
        }
    }
}

impl From<&str> for OfferStatus {
    fn from(value: &str) -> Self {
        match value {
            "matched" => Self::Matched,
            "completed" => Self::Completed,
            _ => Self::Open, // Default for "open" and unknown values
        }
    }
}

/// Offer entity
///
/// Status only moves forward: `open` -> `matched`, and `open`/`matched`
/// -> `completed`. `completed_at` is set exactly once, at the completion
/// transition, and never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: OfferKind,
    pub skill: String,
    pub description: String,
    pub zip: String,
    pub city: Option<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub status: OfferStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Offer {
    /// Create a new open listing
    #[must_use]
    pub fn new(user_id: Uuid, kind: OfferKind, skill: String, description: String, zip: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            skill,
            description,
            zip,
            city: None,
            tags: Vec::new(),
            image_url: None,
            status: OfferStatus::Open,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the listing is still in the public feed
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.status, OfferStatus::Open)
    }

    /// Check if the work was marked done
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Check if a user owns this listing
    #[inline]
    #[must_use]
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Delist after both conversation parties matched.
    /// No-op unless the offer is still open.
    pub fn mark_matched(&mut self) {
        if self.is_open() {
            self.status = OfferStatus::Matched;
            self.updated_at = Utc::now();
        }
    }

    /// Record completion. Returns false if already completed;
    /// `completed_at` is never overwritten.
    pub fn complete(&mut self, at: DateTime<Utc>) -> bool {
        if self.completed_at.is_some() {
            return false;
        }
        self.completed_at = Some(at);
        self.status = OfferStatus::Completed;
        self.updated_at = at;
        true
    }

    /// Attach an uploaded image
    pub fn set_image_url(&mut self, image_url: Option<String>) {
        self.image_url = image_url;
        self.updated_at = Utc::now();
    }
}
