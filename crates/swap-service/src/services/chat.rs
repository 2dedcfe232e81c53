//! Chat service
//!
//! Opens conversation views, pages through history, sends messages, and
//! runs the mutual-match agreement with its offer delisting side effect.

use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use swap_common::Session;
use swap_core::entities::{Conversation, MatchState, Message, Offer, OfferStatus, Profile};
use swap_core::error::DomainError;
use swap_core::traits::MessagePage;
use swap_realtime::{FeedChannel, FeedSubscriber};

use crate::dto::{MessageResponse, SendMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::feed::{LiveAppend, MessageFeed, PAGE_SIZE};

/// What a toggle changed, from the acting user's side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub state: MatchState,
    /// True when reaching `Mutual` also delisted the offer. `Mutual`
    /// with false means the delist step failed or the listing had
    /// already left the feed; the match itself still stands.
    pub offer_delisted: bool,
}

/// Everything one open chat renders: the conversation row, its offer,
/// the counterpart profile, and the message feed.
///
/// The mutual-match notice is edge-triggered on the `matched` flag: it
/// fires exactly once per observed false-to-true transition, including
/// the case of opening a conversation that is already matched, and never
/// on repeat observation or on true-to-false.
#[derive(Debug, Clone)]
pub struct ChatView {
    conversation: Conversation,
    offer: Offer,
    other_user: Profile,
    feed: MessageFeed,
    prev_matched: bool,
    notice_pending: bool,
}

impl ChatView {
    fn assemble(conversation: Conversation, offer: Offer, other_user: Profile, feed: MessageFeed) -> Self {
        let mut view = Self {
            conversation,
            offer,
            other_user,
            feed,
            prev_matched: false,
            notice_pending: false,
        };
        view.observe_match();
        view
    }

    /// Re-evaluate the edge trigger against the current conversation
    fn observe_match(&mut self) {
        if self.conversation.matched && !self.prev_matched {
            self.notice_pending = true;
        }
        self.prev_matched = self.conversation.matched;
    }

    fn replace_conversation(&mut self, conversation: Conversation) {
        self.conversation = conversation;
        self.observe_match();
    }

    /// Take the pending mutual-match notice, if one fired
    pub fn take_match_notice(&mut self) -> bool {
        std::mem::take(&mut self.notice_pending)
    }

    /// Fold a pushed message insert into the feed. Events for other
    /// conversations and duplicate ids are dropped.
    pub fn apply_live_message(&mut self, message: Message) -> LiveAppend {
        if message.conversation_id != self.conversation.id {
            return LiveAppend {
                appended: false,
                should_scroll: false,
            };
        }
        self.feed.push_live(message)
    }

    /// Replace the conversation row wholesale with a pushed update and
    /// re-evaluate the match edge trigger. Mismatched ids are dropped.
    pub fn apply_conversation_update(&mut self, conversation: Conversation) {
        if conversation.id != self.conversation.id {
            return;
        }
        self.replace_conversation(conversation);
    }

    /// Record the latest scroll position as distance from the bottom
    pub fn record_scroll(&mut self, distance_to_bottom: f64) {
        self.feed.record_scroll(distance_to_bottom);
    }

    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    #[must_use]
    pub fn offer(&self) -> &Offer {
        &self.offer
    }

    #[must_use]
    pub fn other_user(&self) -> &Profile {
        &self.other_user
    }

    #[must_use]
    pub fn feed(&self) -> &MessageFeed {
        &self.feed
    }

    /// Held messages, oldest first
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        self.feed.messages()
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.conversation.matched
    }

    /// Whether a participant has signaled agreement
    #[must_use]
    pub fn has_agreed(&self, user_id: Uuid) -> bool {
        self.conversation.has_agreed(user_id)
    }
}

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new ChatService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open a conversation as the acting user.
    ///
    /// Joins the offer, the counterpart profile, the message total, and
    /// the newest history page concurrently, then marks the fetched
    /// inbound messages read.
    #[instrument(skip(self, session))]
    pub async fn open_chat(
        &self,
        session: &Session,
        conversation_id: Uuid,
    ) -> ServiceResult<ChatView> {
        let user_id = session.user_id();

        let conversation = self
            .ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Conversation", conversation_id.to_string()))?;

        let Some(other_id) = conversation.other_participant(user_id) else {
            return Err(DomainError::NotConversationParticipant.into());
        };

        let (offer, other_user, total, page) = tokio::try_join!(
            self.ctx.offer_repo().find_by_id(conversation.offer_id),
            self.ctx.profile_repo().find_by_id(other_id),
            self.ctx.message_repo().count_by_conversation(conversation_id),
            self.ctx.message_repo().find_page(
                conversation_id,
                MessagePage {
                    offset: 0,
                    limit: PAGE_SIZE,
                },
            ),
        )?;

        let offer = offer
            .ok_or_else(|| ServiceError::not_found("Offer", conversation.offer_id.to_string()))?;
        let other_user =
            other_user.ok_or_else(|| ServiceError::not_found("Profile", other_id.to_string()))?;

        let mut feed = MessageFeed::new(user_id);
        let unread = feed.apply_initial(page, total);
        self.mark_page_read(conversation_id, &unread).await;

        Ok(ChatView::assemble(conversation, offer, other_user, feed))
    }

    /// Fetch the next older history page into the view. Returns how many
    /// messages were prepended; zero when no older page remains.
    #[instrument(skip(self, view))]
    pub async fn load_older(&self, view: &mut ChatView) -> ServiceResult<usize> {
        if !view.feed.has_more() {
            return Ok(0);
        }

        let conversation_id = view.conversation.id;
        let page = MessagePage {
            offset: view.feed.next_offset(),
            limit: PAGE_SIZE,
        };

        let (total, older) = tokio::try_join!(
            self.ctx.message_repo().count_by_conversation(conversation_id),
            self.ctx.message_repo().find_page(conversation_id, page),
        )?;

        let fetched = older.len();
        let unread = view.feed.apply_older(older, total);
        self.mark_page_read(conversation_id, &unread).await;

        Ok(fetched)
    }

    /// Persist a message and announce it on the change feed. Content is
    /// trimmed; whitespace-only submissions are rejected before any
    /// persistence call.
    #[instrument(skip(self, session, request))]
    pub async fn send_message(
        &self,
        session: &Session,
        conversation_id: Uuid,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        request.validate()?;

        let content = request.content.trim();
        if content.is_empty() {
            return Err(DomainError::EmptyMessage.into());
        }

        let conversation = self
            .ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Conversation", conversation_id.to_string()))?;

        if !conversation.is_participant(session.user_id()) {
            return Err(DomainError::NotConversationParticipant.into());
        }

        let message = Message::new(conversation_id, session.user_id(), content.to_string());
        self.ctx.message_repo().create(&message).await?;

        info!(message_id = %message.id, conversation_id = %conversation_id, "Message sent");

        self.ctx
            .publisher()
            .publish_message_created(&message)
            .await
            .ok();

        Ok(MessageResponse::from(message))
    }

    /// Toggle the acting user's match agreement.
    ///
    /// The conversation update is persisted first; reaching `Mutual`
    /// then delists the offer as a separate best-effort step whose
    /// result is reported in the outcome, never simulated as atomic.
    /// On a persistence error the view is left unchanged.
    #[instrument(skip(self, session, view))]
    pub async fn toggle_match(
        &self,
        session: &Session,
        view: &mut ChatView,
    ) -> ServiceResult<MatchOutcome> {
        let user_id = session.user_id();

        if !view.conversation.is_participant(user_id) {
            return Err(DomainError::NotConversationParticipant.into());
        }

        let mut conversation = view.conversation.clone();
        let state = conversation.toggle_match(user_id);

        self.ctx
            .conversation_repo()
            .update_match(&conversation)
            .await?;

        self.ctx
            .publisher()
            .publish_conversation_updated(&conversation)
            .await
            .ok();

        let mut offer_delisted = false;
        if state == MatchState::Mutual && view.offer.is_open() {
            match self
                .ctx
                .offer_repo()
                .set_status(view.offer.id, OfferStatus::Matched)
                .await
            {
                Ok(()) => {
                    view.offer.mark_matched();
                    offer_delisted = true;
                }
                Err(e) => {
                    warn!(offer_id = %view.offer.id, error = %e, "Failed to delist offer after mutual match");
                }
            }
        }

        info!(
            conversation_id = %conversation.id,
            state = ?state,
            offer_delisted,
            "Match toggled"
        );

        view.replace_conversation(conversation);

        Ok(MatchOutcome {
            state,
            offer_delisted,
        })
    }

    /// Subscribe an open view's channels: the conversation's message
    /// inserts and its row updates
    pub async fn watch_chat(
        &self,
        subscriber: &FeedSubscriber,
        conversation_id: Uuid,
    ) -> ServiceResult<()> {
        subscriber
            .subscribe(&[
                FeedChannel::conversation_messages(conversation_id),
                FeedChannel::conversation(conversation_id),
            ])
            .await?;
        Ok(())
    }

    /// Release a view's channels on teardown
    pub async fn release_chat(
        &self,
        subscriber: &FeedSubscriber,
        conversation_id: Uuid,
    ) -> ServiceResult<()> {
        subscriber
            .unsubscribe(&[
                FeedChannel::conversation_messages(conversation_id),
                FeedChannel::conversation(conversation_id),
            ])
            .await?;
        Ok(())
    }

    /// Flip a fetched page's inbound messages to read and announce the
    /// batch. Best-effort: a failure here never blocks the view.
    async fn mark_page_read(&self, conversation_id: Uuid, ids: &[Uuid]) {
        if ids.is_empty() {
            return;
        }

        match self.ctx.message_repo().mark_read(ids).await {
            Ok(0) => {}
            Ok(changed) => {
                self.ctx
                    .publisher()
                    .publish_messages_read(conversation_id, changed)
                    .await
                    .ok();
            }
            Err(e) => {
                warn!(
                    conversation_id = %conversation_id,
                    error = %e,
                    "Failed to mark fetched page read"
                );
            }
        }
    }
}
