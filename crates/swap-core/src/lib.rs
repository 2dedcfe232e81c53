//! # swap-core
//!
//! Domain layer containing entities, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, realtime, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    Conversation, MatchState, Message, Offer, OfferKind, OfferStatus, Profile, Review,
    MAX_COMMENT_LENGTH,
};
pub use error::DomainError;
pub use traits::{
    ConversationRepository, MessagePage, MessageRepository, OfferQuery, OfferRepository,
    ProfileRepository, RatingSummary, RepoResult, ReviewRepository,
};
