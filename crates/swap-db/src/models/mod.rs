//! Database models - SQLx-compatible structs for PostgreSQL tables

mod conversation;
mod message;
mod offer;
mod profile;
mod review;

pub use conversation::ConversationModel;
pub use message::MessageModel;
pub use offer::OfferModel;
pub use profile::ProfileModel;
pub use review::ReviewModel;
