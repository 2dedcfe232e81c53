//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod chat;
pub mod context;
pub mod conversations;
pub mod error;
pub mod feed;
pub mod offers;
pub mod profiles;
pub mod reviews;
pub mod unread;

mod images;

// Re-export all services for convenience
pub use chat::{ChatService, ChatView, MatchOutcome};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use conversations::ConversationService;
pub use error::{ServiceError, ServiceResult};
pub use feed::{LiveAppend, MessageFeed};
pub use offers::OfferService;
pub use profiles::ProfileService;
pub use reviews::ReviewService;
pub use unread::{UnreadCounter, UnreadService};
