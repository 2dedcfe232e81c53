//! Change feed channel definitions.
//!
//! Defines the channel naming conventions for Redis pub/sub.

use uuid::Uuid;

/// Channel carrying every new message, regardless of conversation
pub const MESSAGES_CHANNEL: &str = "messages";
/// Channel prefix for the inserts of one conversation
pub const CONVERSATION_MESSAGES_PREFIX: &str = "messages:conversation:";
/// Channel prefix for updates to one conversation row
pub const CONVERSATION_PREFIX: &str = "conversation:";

/// Change feed channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedChannel {
    /// Every message insert; drives the viewer-wide unread badge
    Messages,
    /// Message inserts within a single conversation
    ConversationMessages(Uuid),
    /// Updates to a single conversation row (match state)
    Conversation(Uuid),
    /// Custom channel name
    Custom(String),
}

impl FeedChannel {
    /// Create the all-messages channel
    #[must_use]
    pub fn messages() -> Self {
        Self::Messages
    }

    /// Create a per-conversation message channel
    #[must_use]
    pub fn conversation_messages(conversation_id: Uuid) -> Self {
        Self::ConversationMessages(conversation_id)
    }

    /// Create a conversation update channel
    #[must_use]
    pub fn conversation(conversation_id: Uuid) -> Self {
        Self::Conversation(conversation_id)
    }

    /// Create a custom channel
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Messages => MESSAGES_CHANNEL.to_string(),
            Self::ConversationMessages(id) => format!("{CONVERSATION_MESSAGES_PREFIX}{id}"),
            Self::Conversation(id) => format!("{CONVERSATION_PREFIX}{id}"),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name back to a `FeedChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == MESSAGES_CHANNEL {
            return Self::Messages;
        }

        if let Some(id_str) = name.strip_prefix(CONVERSATION_MESSAGES_PREFIX) {
            if let Ok(id) = id_str.parse::<Uuid>() {
                return Self::ConversationMessages(id);
            }
        }

        if let Some(id_str) = name.strip_prefix(CONVERSATION_PREFIX) {
            if let Ok(id) = id_str.parse::<Uuid>() {
                return Self::Conversation(id);
            }
        }

        Self::Custom(name.to_string())
    }
}

impl std::fmt::Display for FeedChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
