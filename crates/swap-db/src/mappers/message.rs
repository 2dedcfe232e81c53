//! Message entity <-> model mapper

use swap_core::entities::Message;

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: model.id,
            conversation_id: model.conversation_id,
            sender_id: model.sender_id,
            content: model.content,
            is_read: model.is_read,
            created_at: model.created_at,
        }
    }
}
