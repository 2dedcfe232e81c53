//! PostgreSQL implementation of ConversationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use swap_core::entities::Conversation;
use swap_core::error::DomainError;
use swap_core::traits::{ConversationRepository, RepoResult};

use crate::models::ConversationModel;

use super::error::{conversation_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of ConversationRepository
#[derive(Clone)]
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    /// Create a new PgConversationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, offer_id, creator_id, participant_id, matched_by, matched,
                   created_at, updated_at
            FROM conversations
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Conversation>> {
        let results = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, offer_id, creator_id, participant_id, matched_by, matched,
                   created_at, updated_at
            FROM conversations
            WHERE creator_id = $1 OR participant_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Conversation::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_for_offer(
        &self,
        offer_id: Uuid,
        user_id: Uuid,
    ) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, offer_id, creator_id, participant_id, matched_by, matched,
                   created_at, updated_at
            FROM conversations
            WHERE offer_id = $1 AND (creator_id = $2 OR participant_id = $2)
            ",
        )
        .bind(offer_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self))]
    async fn find_between(&self, user_a: Uuid, user_b: Uuid) -> RepoResult<Vec<Conversation>> {
        let results = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, offer_id, creator_id, participant_id, matched_by, matched,
                   created_at, updated_at
            FROM conversations
            WHERE (creator_id = $1 AND participant_id = $2)
               OR (creator_id = $2 AND participant_id = $1)
            ORDER BY created_at DESC
            ",
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Conversation::from).collect())
    }

    #[instrument(skip(self, conversation))]
    async fn create(&self, conversation: &Conversation) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO conversations (id, offer_id, creator_id, participant_id,
                                       matched_by, matched, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(conversation.id)
        .bind(conversation.offer_id)
        .bind(conversation.creator_id)
        .bind(conversation.participant_id)
        .bind(&conversation.matched_by)
        .bind(conversation.matched)
        .bind(conversation.created_at)
        .bind(conversation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ConversationAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, conversation))]
    async fn update_match(&self, conversation: &Conversation) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE conversations
            SET matched_by = $2, matched = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(conversation.id)
        .bind(&conversation.matched_by)
        .bind(conversation.matched)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(conversation_not_found(conversation.id));
        }

        Ok(())
    }
}
