//! # swap-service
//!
//! Application layer containing the marketplace services, the chat and
//! unread view models, and DTOs.

pub mod dto;
pub mod services;

// Re-export the service surface at crate root
pub use services::{
    ChatService, ChatView, ConversationService, LiveAppend, MatchOutcome, MessageFeed,
    OfferService, ProfileService, ReviewService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UnreadCounter, UnreadService,
};
