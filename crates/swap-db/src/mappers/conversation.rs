//! Conversation entity <-> model mapper

use swap_core::entities::Conversation;

use crate::models::ConversationModel;

/// Convert ConversationModel to Conversation entity
impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            id: model.id,
            offer_id: model.offer_id,
            creator_id: model.creator_id,
            participant_id: model.participant_id,
            matched_by: model.matched_by,
            matched: model.matched,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
