//! Message entity - one line of a conversation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message entity
///
/// `is_read` only ever moves false -> true, flipped by the recipient's
/// side when the message is fetched into view; the sender never touches
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread Message
    pub fn new(conversation_id: Uuid, sender_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            sender_id,
            content,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Check if a given viewer authored this message
    #[inline]
    pub fn is_from(&self, user_id: Uuid) -> bool {
        self.sender_id == user_id
    }

    /// Check if this message was sent to the viewer (not by them)
    #[inline]
    pub fn is_inbound_for(&self, viewer_id: Uuid) -> bool {
        self.sender_id != viewer_id
    }

    /// Check if the viewer still has to read this message
    #[inline]
    pub fn is_unread_for(&self, viewer_id: Uuid) -> bool {
        !self.is_read && self.is_inbound_for(viewer_id)
    }

    /// Flip the read flag (false -> true only)
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }

    /// Check if message content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Get a truncated preview of the message (for the inbox list)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }
}
