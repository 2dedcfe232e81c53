//! # swap-realtime
//!
//! Redis pub/sub change feed for live delivery of marketplace events.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Change Feed**: Row-change events published on well-known channels
//!   and fanned out to any number of in-process listeners
//!
//! Three channel families exist: `messages` carries every new message
//! (feeds the unread badge), `messages:conversation:{id}` carries the
//! inserts of one thread, and `conversation:{id}` carries match-state
//! updates of one conversation row.
//!
//! ## Example
//!
//! ```ignore
//! use swap_realtime::{FeedChannel, FeedPublisher, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let publisher = FeedPublisher::new(pool.clone());
//!
//! // Announce a freshly persisted message
//! publisher.publish_message_created(&message).await?;
//! ```

pub mod feed;
pub mod pool;

// Re-export pool types
pub use pool::{create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};

// Re-export feed types
pub use feed::{
    ChangeEvent, ChangeOp, FeedChannel, FeedPublisher, FeedSubscriber, FeedSubscriberBuilder,
    ReceivedMessage, SubscriberConfig, SubscriberError, SubscriberResult, CONVERSATION_MESSAGES_PREFIX,
    CONVERSATION_PREFIX, MESSAGES_CHANNEL,
};
