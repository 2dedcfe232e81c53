//! Conversation database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for conversations table
#[derive(Debug, Clone, FromRow)]
pub struct ConversationModel {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub creator_id: Uuid,
    pub participant_id: Uuid,
    pub matched_by: Vec<Uuid>,
    pub matched: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
