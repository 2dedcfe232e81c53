//! Change feed publisher.
//!
//! Publishes row-change events to Redis channels after the row has been
//! persisted. Delivery is fire-and-forget; a missed event costs a
//! listener one refetch, never data.

use redis::AsyncCommands;

use swap_core::entities::{Conversation, Message};

use crate::feed::{ChangeEvent, FeedChannel};
use crate::pool::{RedisPool, RedisResult};

/// Change feed publisher
#[derive(Clone)]
pub struct FeedPublisher {
    pool: RedisPool,
}

impl FeedPublisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel
    pub async fn publish(&self, channel: &FeedChannel, event: &ChangeEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            op = ?event.op,
            table = %event.table,
            receivers = receivers,
            "Published change event"
        );

        Ok(receivers)
    }

    /// Publish to multiple channels
    pub async fn publish_many(
        &self,
        channels: &[FeedChannel],
        event: &ChangeEvent,
    ) -> RedisResult<u32> {
        let payload = event.to_json()?;
        let mut total_receivers = 0;
        let mut conn = self.pool.get().await?;

        for channel in channels {
            let channel_name = channel.name();
            let receivers: u32 = conn.publish(&channel_name, &payload).await?;
            total_receivers += receivers;
        }

        tracing::debug!(
            channels = channels.len(),
            table = %event.table,
            total_receivers = total_receivers,
            "Published change event to multiple channels"
        );

        Ok(total_receivers)
    }
}

/// Convenience methods for the events the marketplace emits
impl FeedPublisher {
    /// Announce a freshly persisted message.
    ///
    /// Goes out on both the all-messages channel (unread badges) and the
    /// conversation's own channel (open chat views).
    pub async fn publish_message_created(&self, message: &Message) -> RedisResult<u32> {
        let event = ChangeEvent::insert("messages", serde_json::to_value(message)?);

        let channels = [
            FeedChannel::messages(),
            FeedChannel::conversation_messages(message.conversation_id),
        ];
        self.publish_many(&channels, &event).await
    }

    /// Announce a match-state change on a conversation row
    pub async fn publish_conversation_updated(
        &self,
        conversation: &Conversation,
    ) -> RedisResult<u32> {
        let event = ChangeEvent::update("conversations", serde_json::to_value(conversation)?);

        let channel = FeedChannel::conversation(conversation.id);
        self.publish(&channel, &event).await
    }

    /// Announce a batch of read-state flips.
    ///
    /// Unread badges listen to the all-messages channel and refetch their
    /// aggregate on any event; the payload is a partial row on purpose.
    pub async fn publish_messages_read(
        &self,
        conversation_id: uuid::Uuid,
        count: u64,
    ) -> RedisResult<u32> {
        let event = ChangeEvent::update(
            "messages",
            serde_json::json!({
                "conversation_id": conversation_id,
                "is_read": true,
                "count": count,
            }),
        );

        self.publish(&FeedChannel::messages(), &event).await
    }
}
