//! Repository traits (ports) for data access

mod repositories;

pub use repositories::{
    ConversationRepository, MessagePage, MessageRepository, OfferQuery, OfferRepository,
    ProfileRepository, RatingSummary, RepoResult, ReviewRepository,
};
