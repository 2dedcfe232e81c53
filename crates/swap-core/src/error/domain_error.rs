//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Profile not found: {0}")]
    ProfileNotFound(Uuid),

    #[error("Offer not found: {0}")]
    OfferNotFound(Uuid),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(Uuid),

    #[error("Message not found: {0}")]
    MessageNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No rating selected")]
    NoStarsSelected,

    #[error("Rating out of range: {stars} (must be 1-5)")]
    StarsOutOfRange { stars: i16 },

    #[error("Comment too long: max {max} characters")]
    CommentTooLong { max: usize },

    #[error("Message content is empty")]
    EmptyMessage,

    #[error("Image too large: max {max_bytes} bytes")]
    ImageTooLarge { max_bytes: usize },

    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a participant of this conversation")]
    NotConversationParticipant,

    #[error("Not the offer owner")]
    NotOfferOwner,

    #[error("Not the profile owner")]
    NotProfileOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("A conversation for this offer and user already exists")]
    ConversationAlreadyExists,

    #[error("You have already reviewed this user for this service")]
    AlreadyReviewed,

    #[error("Offer is already completed")]
    OfferAlreadyCompleted,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot start a conversation on your own offer")]
    CannotConverseWithSelf,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Change feed error: {0}")]
    FeedError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl DomainError {
    /// Get an error code string for logs and client-facing responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::OfferNotFound(_) => "UNKNOWN_OFFER",
            Self::ConversationNotFound(_) => "UNKNOWN_CONVERSATION",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::NoStarsSelected => "NO_STARS_SELECTED",
            Self::StarsOutOfRange { .. } => "STARS_OUT_OF_RANGE",
            Self::CommentTooLong { .. } => "COMMENT_TOO_LONG",
            Self::EmptyMessage => "EMPTY_MESSAGE",
            Self::ImageTooLarge { .. } => "IMAGE_TOO_LARGE",
            Self::UnsupportedImageType(_) => "UNSUPPORTED_IMAGE_TYPE",

            // Authorization
            Self::NotConversationParticipant => "NOT_CONVERSATION_PARTICIPANT",
            Self::NotOfferOwner => "NOT_OFFER_OWNER",
            Self::NotProfileOwner => "NOT_PROFILE_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_EXISTS",
            Self::ConversationAlreadyExists => "CONVERSATION_ALREADY_EXISTS",
            Self::AlreadyReviewed => "ALREADY_REVIEWED",
            Self::OfferAlreadyCompleted => "OFFER_ALREADY_COMPLETED",

            // Business Rules
            Self::CannotConverseWithSelf => "CANNOT_CONVERSE_WITH_SELF",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::FeedError(_) => "FEED_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound(_)
                | Self::OfferNotFound(_)
                | Self::ConversationNotFound(_)
                | Self::MessageNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::NoStarsSelected
                | Self::StarsOutOfRange { .. }
                | Self::CommentTooLong { .. }
                | Self::EmptyMessage
                | Self::ImageTooLarge { .. }
                | Self::UnsupportedImageType(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotConversationParticipant | Self::NotOfferOwner | Self::NotProfileOwner
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::ConversationAlreadyExists
                | Self::AlreadyReviewed
                | Self::OfferAlreadyCompleted
        )
    }
}
