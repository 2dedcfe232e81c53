//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use swap_core::entities::{Conversation, Message, Offer, Profile, Review};
use swap_core::traits::RatingSummary;

use super::responses::{
    ConversationResponse, InboxEntryResponse, MessageResponse, OfferResponse, OwnProfileResponse,
    ProfileResponse, RatingSummaryResponse, ReviewDetailResponse, ReviewResponse,
    ReviewableSwapResponse,
};

// ============================================================================
// Profile Mappers
// ============================================================================

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            name: profile.name.clone(),
            avatar_url: profile.avatar_url.clone(),
            bio: profile.bio.clone(),
            city: profile.city.clone(),
            zip: profile.zip.clone(),
            interests: profile.interests.clone(),
            skills_offered: profile.skills_offered.clone(),
            skills_needed: profile.skills_needed.clone(),
            rating: profile.rating,
            reviews_count: profile.reviews_count,
            completed_swaps: profile.completed_swaps,
            created_at: profile.created_at,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self::from(&profile)
    }
}

impl From<&Profile> for OwnProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            name: profile.name.clone(),
            avatar_url: profile.avatar_url.clone(),
            bio: profile.bio.clone(),
            phone: profile.phone.clone(),
            city: profile.city.clone(),
            zip: profile.zip.clone(),
            interests: profile.interests.clone(),
            skills_offered: profile.skills_offered.clone(),
            skills_needed: profile.skills_needed.clone(),
            rating: profile.rating,
            reviews_count: profile.reviews_count,
            completed_swaps: profile.completed_swaps,
            created_at: profile.created_at,
        }
    }
}

impl From<Profile> for OwnProfileResponse {
    fn from(profile: Profile) -> Self {
        Self::from(&profile)
    }
}

impl From<RatingSummary> for RatingSummaryResponse {
    fn from(summary: RatingSummary) -> Self {
        Self {
            avg_rating: summary.avg_rating,
            total_reviews: summary.total_reviews,
        }
    }
}

// ============================================================================
// Offer Mappers
// ============================================================================

impl From<&Offer> for OfferResponse {
    fn from(offer: &Offer) -> Self {
        Self {
            id: offer.id,
            user_id: offer.user_id,
            kind: offer.kind,
            skill: offer.skill.clone(),
            description: offer.description.clone(),
            zip: offer.zip.clone(),
            city: offer.city.clone(),
            tags: offer.tags.clone(),
            image_url: offer.image_url.clone(),
            status: offer.status,
            completed_at: offer.completed_at,
            created_at: offer.created_at,
        }
    }
}

impl From<Offer> for OfferResponse {
    fn from(offer: Offer) -> Self {
        Self::from(&offer)
    }
}

// ============================================================================
// Conversation Mappers
// ============================================================================

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id,
            offer_id: conversation.offer_id,
            creator_id: conversation.creator_id,
            participant_id: conversation.participant_id,
            matched_by: conversation.matched_by.clone(),
            matched: conversation.matched,
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        }
    }
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self::from(&conversation)
    }
}

/// One hydrated inbox row before mapping
#[derive(Debug, Clone)]
pub struct InboxEntry {
    pub conversation: Conversation,
    pub offer: Offer,
    pub other_user: Profile,
    pub last_message: Option<Message>,
    pub unread_count: i64,
}

impl InboxEntry {
    /// Instant used for last-activity ordering
    pub fn last_activity(&self) -> chrono::DateTime<chrono::Utc> {
        self.last_message
            .as_ref()
            .map_or(self.conversation.created_at, |m| m.created_at)
    }
}

impl From<InboxEntry> for InboxEntryResponse {
    fn from(entry: InboxEntry) -> Self {
        Self {
            conversation: ConversationResponse::from(&entry.conversation),
            offer: OfferResponse::from(&entry.offer),
            other_user: ProfileResponse::from(&entry.other_user),
            last_message: entry.last_message.as_ref().map(MessageResponse::from),
            unread_count: entry.unread_count,
        }
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            conversation_id: message.conversation_id,
            sender_id: message.sender_id,
            content: message.content.clone(),
            is_read: message.is_read,
            created_at: message.created_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self::from(&message)
    }
}

// ============================================================================
// Review Mappers
// ============================================================================

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            offer_id: review.offer_id,
            reviewer_id: review.reviewer_id,
            reviewee_id: review.reviewee_id,
            stars: review.stars,
            comment: review.comment.clone(),
            created_at: review.created_at,
        }
    }
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self::from(&review)
    }
}

/// Review plus the context the profile page renders it with
#[derive(Debug, Clone)]
pub struct ReviewWithContext {
    pub review: Review,
    pub reviewer: Option<Profile>,
    pub offer: Option<Offer>,
}

impl From<ReviewWithContext> for ReviewDetailResponse {
    fn from(ctx: ReviewWithContext) -> Self {
        Self {
            review: ReviewResponse::from(&ctx.review),
            reviewer_name: ctx.reviewer.as_ref().map(|p| p.name.clone()),
            reviewer_avatar_url: ctx.reviewer.as_ref().and_then(|p| p.avatar_url.clone()),
            offer_skill: ctx.offer.as_ref().map(|o| o.skill.clone()),
        }
    }
}

/// A completed swap still open for a review by the viewer
#[derive(Debug, Clone)]
pub struct ReviewableSwap {
    pub offer: Offer,
    pub counterpart: Profile,
}

impl From<ReviewableSwap> for ReviewableSwapResponse {
    fn from(swap: ReviewableSwap) -> Self {
        Self {
            offer: OfferResponse::from(&swap.offer),
            counterpart: ProfileResponse::from(&swap.counterpart),
        }
    }
}
