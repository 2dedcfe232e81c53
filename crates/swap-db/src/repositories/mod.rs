//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in swap-core.
//! Each repository handles database operations for a specific domain entity.

mod conversation;
mod error;
mod message;
mod offer;
mod profile;
mod review;

pub use conversation::PgConversationRepository;
pub use message::PgMessageRepository;
pub use offer::PgOfferRepository;
pub use profile::PgProfileRepository;
pub use review::PgReviewRepository;
