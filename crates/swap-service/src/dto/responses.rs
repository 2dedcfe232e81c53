//! Response DTOs for service results
//!
//! All response DTOs implement `Serialize` for JSON output. Uuid fields
//! serialize as their hyphenated string form.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use swap_core::entities::{OfferKind, OfferStatus};

// ============================================================================
// Profile Responses
// ============================================================================

/// Public view of a member profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub interests: Vec<String>,
    pub skills_offered: Vec<String>,
    pub skills_needed: Vec<String>,
    pub rating: f64,
    pub reviews_count: i32,
    pub completed_swaps: i32,
    pub created_at: DateTime<Utc>,
}

/// The signed-in member's own profile, including contact fields
#[derive(Debug, Clone, Serialize)]
pub struct OwnProfileResponse {
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
}

/// Store-computed rating aggregate
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RatingSummaryResponse {
    pub avg_rating: f64,
    pub total_reviews: i64,
}

// ============================================================================
// Offer Responses
// ============================================================================

/// A skill-swap listing
#[derive(Debug, Clone, Serialize)]
pub struct OfferResponse {
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
}

/// Listing detail joined with its owner and the viewer's review state
#[derive(Debug, Clone, Serialize)]
pub struct OfferDetailResponse {
    pub offer: OfferResponse,
    pub owner: ProfileResponse,
    /// True when the viewer already reviewed the owner for this offer
    pub viewer_reviewed: bool,
}

/// Receipt for a stored image
#[derive(Debug, Clone, Serialize)]
pub struct UploadedImageResponse {
    pub path: String,
    pub url: String,
}

// ============================================================================
// Conversation Responses
// ============================================================================

/// A 1:1 conversation row
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub creator_id: Uuid,
    pub participant_id: Uuid,
    pub matched_by: Vec<Uuid>,
    pub matched: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One inbox row: conversation plus everything the list view shows
#[derive(Debug, Clone, Serialize)]
pub struct InboxEntryResponse {
    pub conversation: ConversationResponse,
    pub offer: OfferResponse,
    pub other_user: ProfileResponse,
    pub last_message: Option<MessageResponse>,
    pub unread_count: i64,
}

// ============================================================================
// Message Responses
// ============================================================================

/// A chat message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Review Responses
// ============================================================================

/// A stored review
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub stars: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Review hydrated for the profile page
#[derive(Debug, Clone, Serialize)]
pub struct ReviewDetailResponse {
    pub review: ReviewResponse,
    pub reviewer_name: Option<String>,
    pub reviewer_avatar_url: Option<String>,
    pub offer_skill: Option<String>,
}

/// Receipt for a submitted review, carrying the re-fetched aggregate
#[derive(Debug, Clone, Serialize)]
pub struct ReviewReceiptResponse {
    pub review: ReviewResponse,
    pub reviewee_rating: RatingSummaryResponse,
}

/// A completed swap the viewer may still review
#[derive(Debug, Clone, Serialize)]
pub struct ReviewableSwapResponse {
    pub offer: OfferResponse,
    pub counterpart: ProfileResponse,
}
