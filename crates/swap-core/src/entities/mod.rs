//! Domain entities - core business objects

mod conversation;
mod message;
mod offer;
mod profile;
mod review;

pub use conversation::{Conversation, MatchState};
pub use message::Message;
pub use offer::{Offer, OfferKind, OfferStatus};
pub use profile::Profile;
pub use review::{Review, MAX_COMMENT_LENGTH};
