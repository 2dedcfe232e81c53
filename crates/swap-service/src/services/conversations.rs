//! Conversation service
//!
//! Starts per-offer 1:1 conversations and builds the inbox list.

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use swap_common::Session;
use swap_core::entities::Conversation;
use swap_core::error::DomainError;

use crate::dto::{ConversationResponse, InboxEntry, InboxEntryResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    /// Create a new ConversationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Return the viewer's conversation for an offer, creating it when
    /// absent. Losing the insert race to another client is recovered by
    /// re-reading the natural key; both paths are equivalent success.
    #[instrument(skip(self, session))]
    pub async fn start_conversation(
        &self,
        session: &Session,
        offer_id: Uuid,
    ) -> ServiceResult<ConversationResponse> {
        let user_id = session.user_id();

        let offer = self
            .ctx
            .offer_repo()
            .find_by_id(offer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Offer", offer_id.to_string()))?;

        if offer.is_owned_by(user_id) {
            return Err(DomainError::CannotConverseWithSelf.into());
        }

        if let Some(existing) = self
            .ctx
            .conversation_repo()
            .find_for_offer(offer_id, user_id)
            .await?
        {
            return Ok(ConversationResponse::from(existing));
        }

        let conversation = Conversation::new(offer_id, user_id, offer.user_id);
        match self.ctx.conversation_repo().create(&conversation).await {
            Ok(()) => {
                info!(conversation_id = %conversation.id, offer_id = %offer_id, "Conversation started");
                Ok(ConversationResponse::from(conversation))
            }
            Err(DomainError::ConversationAlreadyExists) => {
                debug!(offer_id = %offer_id, "Lost conversation insert race, re-reading");
                let recovered = self
                    .ctx
                    .conversation_repo()
                    .find_for_offer(offer_id, user_id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::internal("Conversation missing after unique conflict")
                    })?;
                Ok(ConversationResponse::from(recovered))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All conversations the viewer takes part in, hydrated for the
    /// inbox and sorted by last activity, newest first.
    ///
    /// Rows whose offer or counterpart profile no longer resolves are
    /// dropped from the list.
    #[instrument(skip(self, session))]
    pub async fn list_conversations(
        &self,
        session: &Session,
    ) -> ServiceResult<Vec<InboxEntryResponse>> {
        let user_id = session.user_id();
        let conversations = self.ctx.conversation_repo().find_by_user(user_id).await?;

        let mut entries = Vec::with_capacity(conversations.len());

        for conversation in conversations {
            let Some(other_id) = conversation.other_participant(user_id) else {
                warn!(conversation_id = %conversation.id, "Conversation without counterpart");
                continue;
            };

            let (offer, other_user, last_message, unread_count) = tokio::try_join!(
                self.ctx.offer_repo().find_by_id(conversation.offer_id),
                self.ctx.profile_repo().find_by_id(other_id),
                self.ctx
                    .message_repo()
                    .latest_by_conversation(conversation.id),
                self.ctx
                    .message_repo()
                    .unread_in_conversation(conversation.id, user_id),
            )?;

            let Some(offer) = offer else {
                warn!(conversation_id = %conversation.id, "Inbox row without offer, skipping");
                continue;
            };
            let Some(other_user) = other_user else {
                warn!(conversation_id = %conversation.id, "Inbox row without counterpart profile, skipping");
                continue;
            };

            entries.push(InboxEntry {
                conversation,
                offer,
                other_user,
                last_message,
                unread_count,
            });
        }

        entries.sort_by(|a, b| b.last_activity().cmp(&a.last_activity()));

        Ok(entries.into_iter().map(InboxEntryResponse::from).collect())
    }
}
