//! Change feed module.
//!
//! Publishes row-change events over Redis pub/sub and fans received
//! events out to in-process listeners.

mod channels;
mod events;
mod publisher;
mod subscriber;

pub use channels::{
    FeedChannel, CONVERSATION_MESSAGES_PREFIX, CONVERSATION_PREFIX, MESSAGES_CHANNEL,
};
pub use events::{ChangeEvent, ChangeOp};
pub use publisher::FeedPublisher;
pub use subscriber::{
    FeedSubscriber, FeedSubscriberBuilder, ReceivedMessage, SubscriberConfig, SubscriberError,
    SubscriberResult,
};
