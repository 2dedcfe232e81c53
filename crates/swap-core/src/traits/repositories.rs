//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. All aggregate values (unread counts,
//! profile ratings) are computed by the store, never in Rust; the traits
//! only expose reads of them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{Conversation, Message, Offer, OfferKind, OfferStatus, Profile, Review};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Profile Repository
// ============================================================================

/// Store-computed rating aggregate for one profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub avg_rating: f64,
    pub total_reviews: i64,
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Profile>>;

    /// Create a new profile
    async fn create(&self, profile: &Profile) -> RepoResult<()>;

    /// Update an existing profile's editable fields
    async fn update(&self, profile: &Profile) -> RepoResult<()>;

    /// Update only the avatar URL
    async fn update_avatar(&self, id: Uuid, avatar_url: &str) -> RepoResult<()>;

    /// Read the store-computed rating aggregate
    async fn rating_summary(&self, id: Uuid) -> RepoResult<RatingSummary>;
}

// ============================================================================
// Offer Repository
// ============================================================================

/// Filter options for the public offer feed
#[derive(Debug, Clone, Copy, Default)]
pub struct OfferQuery {
    pub kind: Option<OfferKind>,
}

#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Find offer by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Offer>>;

    /// List open offers, newest first, optionally filtered by kind
    async fn find_open(&self, query: OfferQuery) -> RepoResult<Vec<Offer>>;

    /// Create a new offer
    async fn create(&self, offer: &Offer) -> RepoResult<()>;

    /// Update only the listing image URL
    async fn update_image(&self, id: Uuid, image_url: &str) -> RepoResult<()>;

    /// Set the listing status (idempotent; used to delist on match)
    async fn set_status(&self, id: Uuid, status: OfferStatus) -> RepoResult<()>;

    /// Record completion. Sets `completed_at` exactly once; a second
    /// call fails with `OfferAlreadyCompleted`.
    async fn complete(&self, id: Uuid, completed_at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find conversation by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Conversation>>;

    /// List all conversations a user takes part in, newest first
    async fn find_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Conversation>>;

    /// Find the conversation for an offer that a user takes part in
    /// (the natural key used by create-or-recover)
    async fn find_for_offer(&self, offer_id: Uuid, user_id: Uuid)
        -> RepoResult<Option<Conversation>>;

    /// List conversations where two users are mutual participants,
    /// in either role order
    async fn find_between(&self, user_a: Uuid, user_b: Uuid) -> RepoResult<Vec<Conversation>>;

    /// Create a new conversation. A unique-index violation surfaces as
    /// `ConversationAlreadyExists`; callers recover by re-reading.
    async fn create(&self, conversation: &Conversation) -> RepoResult<()>;

    /// Persist the match state (`matched_by` and derived `matched`)
    async fn update_match(&self, conversation: &Conversation) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Offset pagination for the message history
#[derive(Debug, Clone, Copy)]
pub struct MessagePage {
    pub offset: i64,
    pub limit: i64,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Count all messages in a conversation
    async fn count_by_conversation(&self, conversation_id: Uuid) -> RepoResult<i64>;

    /// Fetch one history page, newest first
    async fn find_page(&self, conversation_id: Uuid, page: MessagePage) -> RepoResult<Vec<Message>>;

    /// Create a new message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Flip `is_read` to true for a batch of messages. Returns the
    /// number of rows actually changed.
    async fn mark_read(&self, ids: &[Uuid]) -> RepoResult<u64>;

    /// The most recent message of a conversation, if any
    async fn latest_by_conversation(&self, conversation_id: Uuid) -> RepoResult<Option<Message>>;

    /// Unread messages addressed to the viewer within one conversation
    async fn unread_in_conversation(&self, conversation_id: Uuid, viewer_id: Uuid)
        -> RepoResult<i64>;

    /// Viewer-wide unread total (reads the store's aggregate function)
    async fn unread_total(&self, user_id: Uuid) -> RepoResult<i64>;
}

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Create a new review. A unique-index violation surfaces as
    /// `AlreadyReviewed`.
    async fn create(&self, review: &Review) -> RepoResult<()>;

    /// Find the review for one (offer, reviewer, reviewee) triple
    async fn find_by_triple(
        &self,
        offer_id: Uuid,
        reviewer_id: Uuid,
        reviewee_id: Uuid,
    ) -> RepoResult<Option<Review>>;

    /// Newest reviews left for a member
    async fn find_by_reviewee(&self, reviewee_id: Uuid, limit: i64) -> RepoResult<Vec<Review>>;

    /// Newest reviews attached to one listing
    async fn find_by_offer(&self, offer_id: Uuid, limit: i64) -> RepoResult<Vec<Review>>;

    /// Offer ids the reviewer has already reviewed, optionally narrowed
    /// to one reviewee
    async fn reviewed_offer_ids(
        &self,
        reviewer_id: Uuid,
        reviewee_id: Option<Uuid>,
    ) -> RepoResult<Vec<Uuid>>;
}
