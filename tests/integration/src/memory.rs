//! In-memory adapters for the repository and storage ports
//!
//! One shared store stands in for the whole database. The adapters keep
//! the semantics the services rely on: unique indexes, newest-first
//! ordering, store-side aggregates, and the rating and completed-swap
//! bookkeeping the real schema maintains with triggers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use swap_common::{BlobStore, PutOptions, StorageError};
use swap_core::entities::{Conversation, Message, Offer, OfferStatus, Profile, Review};
use swap_core::error::DomainError;
use swap_core::traits::{
    ConversationRepository, MessagePage, MessageRepository, OfferQuery, OfferRepository,
    ProfileRepository, RatingSummary, RepoResult, ReviewRepository,
};

/// All tables behind one lock, standing in for one database
#[derive(Default)]
struct Tables {
    profiles: HashMap<Uuid, Profile>,
    offers: HashMap<Uuid, Offer>,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
    reviews: Vec<Review>,
}

/// Shared in-memory store backing all five repository adapters
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("store lock poisoned")
    }

    /// Direct read of a stored profile, for assertions
    #[must_use]
    pub fn profile(&self, id: Uuid) -> Option<Profile> {
        self.lock().profiles.get(&id).cloned()
    }

    /// Direct read of a stored offer, for assertions
    #[must_use]
    pub fn offer(&self, id: Uuid) -> Option<Offer> {
        self.lock().offers.get(&id).cloned()
    }

    /// Number of stored reviews, for assertions on rejected writes
    #[must_use]
    pub fn review_count(&self) -> usize {
        self.lock().reviews.len()
    }

    /// Number of stored messages
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.lock().messages.len()
    }

    /// Shift a stored message's creation time, to build out history
    /// that did not all happen in the same instant
    pub fn backdate_message(&self, id: Uuid, created_at: DateTime<Utc>) {
        let mut tables = self.lock();
        if let Some(message) = tables.messages.iter_mut().find(|m| m.id == id) {
            message.created_at = created_at;
        }
    }
}

// ============================================================================
// Profiles
// ============================================================================

#[derive(Clone)]
pub struct MemoryProfileRepository {
    store: MemoryStore,
}

impl MemoryProfileRepository {
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Profile>> {
        Ok(self.store.lock().profiles.get(&id).cloned())
    }

    async fn create(&self, profile: &Profile) -> RepoResult<()> {
        let mut tables = self.store.lock();
        if tables.profiles.values().any(|p| p.email == profile.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        tables.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> RepoResult<()> {
        let mut tables = self.store.lock();
        let Some(existing) = tables.profiles.get_mut(&profile.id) else {
            return Err(DomainError::ProfileNotFound(profile.id));
        };
        *existing = profile.clone();
        Ok(())
    }

    async fn update_avatar(&self, id: Uuid, avatar_url: &str) -> RepoResult<()> {
        let mut tables = self.store.lock();
        let Some(existing) = tables.profiles.get_mut(&id) else {
            return Err(DomainError::ProfileNotFound(id));
        };
        existing.avatar_url = Some(avatar_url.to_string());
        existing.updated_at = Utc::now();
        Ok(())
    }

    async fn rating_summary(&self, id: Uuid) -> RepoResult<RatingSummary> {
        let tables = self.store.lock();
        let stars: Vec<f64> = tables
            .reviews
            .iter()
            .filter(|r| r.reviewee_id == id)
            .map(|r| f64::from(r.stars))
            .collect();

        let total_reviews = stars.len() as i64;
        let avg_rating = if stars.is_empty() {
            0.0
        } else {
            stars.iter().sum::<f64>() / stars.len() as f64
        };

        Ok(RatingSummary {
            avg_rating,
            total_reviews,
        })
    }
}

// ============================================================================
// Offers
// ============================================================================

#[derive(Clone)]
pub struct MemoryOfferRepository {
    store: MemoryStore,
}

impl MemoryOfferRepository {
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OfferRepository for MemoryOfferRepository {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Offer>> {
        Ok(self.store.lock().offers.get(&id).cloned())
    }

    async fn find_open(&self, query: OfferQuery) -> RepoResult<Vec<Offer>> {
        let tables = self.store.lock();
        let mut open: Vec<Offer> = tables
            .offers
            .values()
            .filter(|o| o.status == OfferStatus::Open)
            .filter(|o| query.kind.is_none_or(|kind| o.kind == kind))
            .cloned()
            .collect();
        open.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(open)
    }

    async fn create(&self, offer: &Offer) -> RepoResult<()> {
        self.store.lock().offers.insert(offer.id, offer.clone());
        Ok(())
    }

    async fn update_image(&self, id: Uuid, image_url: &str) -> RepoResult<()> {
        let mut tables = self.store.lock();
        let Some(offer) = tables.offers.get_mut(&id) else {
            return Err(DomainError::OfferNotFound(id));
        };
        offer.image_url = Some(image_url.to_string());
        offer.updated_at = Utc::now();
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: OfferStatus) -> RepoResult<()> {
        let mut tables = self.store.lock();
        let Some(offer) = tables.offers.get_mut(&id) else {
            return Err(DomainError::OfferNotFound(id));
        };
        offer.status = status;
        offer.updated_at = Utc::now();
        Ok(())
    }

    async fn complete(&self, id: Uuid, completed_at: DateTime<Utc>) -> RepoResult<()> {
        let mut guard = self.store.lock();
        let tables = &mut *guard;

        let Some(offer) = tables.offers.get_mut(&id) else {
            return Err(DomainError::OfferAlreadyCompleted);
        };
        if offer.completed_at.is_some() {
            return Err(DomainError::OfferAlreadyCompleted);
        }

        offer.status = OfferStatus::Completed;
        offer.completed_at = Some(completed_at);
        offer.updated_at = Utc::now();

        // Trigger equivalent: credit the owner with a finished swap
        if let Some(owner) = tables.profiles.get_mut(&offer.user_id) {
            owner.completed_swaps += 1;
        }

        Ok(())
    }
}

// ============================================================================
// Conversations
// ============================================================================

#[derive(Clone)]
pub struct MemoryConversationRepository {
    store: MemoryStore,
}

impl MemoryConversationRepository {
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn same_pair(conversation: &Conversation, a: Uuid, b: Uuid) -> bool {
    (conversation.creator_id == a && conversation.participant_id == b)
        || (conversation.creator_id == b && conversation.participant_id == a)
}

#[async_trait]
impl ConversationRepository for MemoryConversationRepository {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Conversation>> {
        Ok(self
            .store
            .lock()
            .conversations
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Conversation>> {
        let tables = self.store.lock();
        let mut found: Vec<Conversation> = tables
            .conversations
            .iter()
            .filter(|c| c.is_participant(user_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_for_offer(
        &self,
        offer_id: Uuid,
        user_id: Uuid,
    ) -> RepoResult<Option<Conversation>> {
        Ok(self
            .store
            .lock()
            .conversations
            .iter()
            .find(|c| c.offer_id == offer_id && c.is_participant(user_id))
            .cloned())
    }

    async fn find_between(&self, user_a: Uuid, user_b: Uuid) -> RepoResult<Vec<Conversation>> {
        let tables = self.store.lock();
        let mut found: Vec<Conversation> = tables
            .conversations
            .iter()
            .filter(|c| same_pair(c, user_a, user_b))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn create(&self, conversation: &Conversation) -> RepoResult<()> {
        let mut tables = self.store.lock();

        // Unique index: one thread per offer and unordered pair
        let exists = tables.conversations.iter().any(|c| {
            c.offer_id == conversation.offer_id
                && same_pair(c, conversation.creator_id, conversation.participant_id)
        });
        if exists {
            return Err(DomainError::ConversationAlreadyExists);
        }

        tables.conversations.push(conversation.clone());
        Ok(())
    }

    async fn update_match(&self, conversation: &Conversation) -> RepoResult<()> {
        let mut tables = self.store.lock();
        let Some(existing) = tables
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation.id)
        else {
            return Err(DomainError::ConversationNotFound(conversation.id));
        };
        existing.matched_by = conversation.matched_by.clone();
        existing.matched = conversation.matched;
        existing.updated_at = Utc::now();
        Ok(())
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Clone)]
pub struct MemoryMessageRepository {
    store: MemoryStore,
}

impl MemoryMessageRepository {
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageRepository for MemoryMessageRepository {
    async fn count_by_conversation(&self, conversation_id: Uuid) -> RepoResult<i64> {
        let tables = self.store.lock();
        Ok(tables
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .count() as i64)
    }

    async fn find_page(
        &self,
        conversation_id: Uuid,
        page: MessagePage,
    ) -> RepoResult<Vec<Message>> {
        let limit = page.limit.clamp(1, 100) as usize;
        let offset = page.offset.max(0) as usize;

        let tables = self.store.lock();
        let mut in_thread: Vec<Message> = tables
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        // Newest first, insertion order as the tiebreak
        in_thread.reverse();
        in_thread.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(in_thread.into_iter().skip(offset).take(limit).collect())
    }

    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.store.lock().messages.push(message.clone());
        Ok(())
    }

    async fn mark_read(&self, ids: &[Uuid]) -> RepoResult<u64> {
        let mut tables = self.store.lock();
        let mut changed = 0;
        for message in &mut tables.messages {
            if ids.contains(&message.id) && !message.is_read {
                message.is_read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn latest_by_conversation(&self, conversation_id: Uuid) -> RepoResult<Option<Message>> {
        let tables = self.store.lock();
        let mut latest: Option<&Message> = None;
        for message in tables
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
        {
            if latest.is_none_or(|current| message.created_at >= current.created_at) {
                latest = Some(message);
            }
        }
        Ok(latest.cloned())
    }

    async fn unread_in_conversation(
        &self,
        conversation_id: Uuid,
        viewer_id: Uuid,
    ) -> RepoResult<i64> {
        let tables = self.store.lock();
        Ok(tables
            .messages
            .iter()
            .filter(|m| {
                m.conversation_id == conversation_id && m.sender_id != viewer_id && !m.is_read
            })
            .count() as i64)
    }

    async fn unread_total(&self, user_id: Uuid) -> RepoResult<i64> {
        let tables = self.store.lock();
        let count = tables
            .messages
            .iter()
            .filter(|m| m.sender_id != user_id && !m.is_read)
            .filter(|m| {
                tables
                    .conversations
                    .iter()
                    .any(|c| c.id == m.conversation_id && c.is_participant(user_id))
            })
            .count();
        Ok(count as i64)
    }
}

// ============================================================================
// Reviews
// ============================================================================

#[derive(Clone)]
pub struct MemoryReviewRepository {
    store: MemoryStore,
}

impl MemoryReviewRepository {
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviewRepository {
    async fn create(&self, review: &Review) -> RepoResult<()> {
        let mut guard = self.store.lock();
        let tables = &mut *guard;

        // Unique index on the (offer, reviewer, reviewee) triple
        let duplicate = tables.reviews.iter().any(|r| {
            r.offer_id == review.offer_id
                && r.reviewer_id == review.reviewer_id
                && r.reviewee_id == review.reviewee_id
        });
        if duplicate {
            return Err(DomainError::AlreadyReviewed);
        }

        tables.reviews.push(review.clone());

        // Trigger equivalent: keep the reviewee's stored aggregate in step
        let stars: Vec<f64> = tables
            .reviews
            .iter()
            .filter(|r| r.reviewee_id == review.reviewee_id)
            .map(|r| f64::from(r.stars))
            .collect();
        if let Some(reviewee) = tables.profiles.get_mut(&review.reviewee_id) {
            reviewee.reviews_count = stars.len() as i32;
            reviewee.rating = stars.iter().sum::<f64>() / stars.len() as f64;
        }

        Ok(())
    }

    async fn find_by_triple(
        &self,
        offer_id: Uuid,
        reviewer_id: Uuid,
        reviewee_id: Uuid,
    ) -> RepoResult<Option<Review>> {
        Ok(self
            .store
            .lock()
            .reviews
            .iter()
            .find(|r| {
                r.offer_id == offer_id
                    && r.reviewer_id == reviewer_id
                    && r.reviewee_id == reviewee_id
            })
            .cloned())
    }

    async fn find_by_reviewee(&self, reviewee_id: Uuid, limit: i64) -> RepoResult<Vec<Review>> {
        let tables = self.store.lock();
        Ok(tables
            .reviews
            .iter()
            .rev()
            .filter(|r| r.reviewee_id == reviewee_id)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn find_by_offer(&self, offer_id: Uuid, limit: i64) -> RepoResult<Vec<Review>> {
        let tables = self.store.lock();
        Ok(tables
            .reviews
            .iter()
            .rev()
            .filter(|r| r.offer_id == offer_id)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn reviewed_offer_ids(
        &self,
        reviewer_id: Uuid,
        reviewee_id: Option<Uuid>,
    ) -> RepoResult<Vec<Uuid>> {
        let tables = self.store.lock();
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.reviewer_id == reviewer_id)
            .filter(|r| reviewee_id.is_none_or(|id| r.reviewee_id == id))
            .map(|r| r.offer_id)
            .collect())
    }
}

// ============================================================================
// Blob store
// ============================================================================

/// One stored object with its advisory content type
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-memory blob store recording every upload and delete
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.objects
            .lock()
            .expect("blob lock poisoned")
            .contains_key(path)
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.lock().expect("blob lock poisoned").len()
    }

    /// Stored paths, in no particular order
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.objects
            .lock()
            .expect("blob lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn object(&self, path: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .expect("blob lock poisoned")
            .get(path)
            .cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        options: PutOptions<'_>,
    ) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().expect("blob lock poisoned");
        if !options.overwrite && objects.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        objects.insert(
            path.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: options.content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.objects.lock().expect("blob lock poisoned").remove(path);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://blobs/{path}")
    }
}
