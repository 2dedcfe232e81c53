//! Service context - dependency container for services
//!
//! Holds the repositories, blob store, change-feed publisher, and pools
//! that every service needs.

use std::sync::Arc;

use swap_common::{BlobStore, StorageConfig};
use swap_core::traits::{
    ConversationRepository, MessageRepository, OfferRepository, ProfileRepository,
    ReviewRepository,
};
use swap_db::PgPool;
use swap_realtime::{FeedPublisher, SharedRedisPool};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The blob store for avatar and offer images
/// - The Redis change-feed publisher
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    profile_repo: Arc<dyn ProfileRepository>,
    offer_repo: Arc<dyn OfferRepository>,
    conversation_repo: Arc<dyn ConversationRepository>,
    message_repo: Arc<dyn MessageRepository>,
    review_repo: Arc<dyn ReviewRepository>,

    // Blob storage
    blob_store: Arc<dyn BlobStore>,
    storage_config: StorageConfig,

    // Change feed
    publisher: FeedPublisher,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        profile_repo: Arc<dyn ProfileRepository>,
        offer_repo: Arc<dyn OfferRepository>,
        conversation_repo: Arc<dyn ConversationRepository>,
        message_repo: Arc<dyn MessageRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        blob_store: Arc<dyn BlobStore>,
        storage_config: StorageConfig,
    ) -> Self {
        // Clone the inner RedisPool from the Arc
        let publisher = FeedPublisher::new((*redis_pool).clone());

        Self {
            pool,
            redis_pool,
            profile_repo,
            offer_repo,
            conversation_repo,
            message_repo,
            review_repo,
            blob_store,
            storage_config,
            publisher,
        }
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the profile repository
    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Get the offer repository
    pub fn offer_repo(&self) -> &dyn OfferRepository {
        self.offer_repo.as_ref()
    }

    /// Get the conversation repository
    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.conversation_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the review repository
    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    /// Owning handle on the message repository, for background tasks
    pub fn shared_message_repo(&self) -> Arc<dyn MessageRepository> {
        Arc::clone(&self.message_repo)
    }

    // === Blob storage ===

    /// Get the blob store
    pub fn blob_store(&self) -> &dyn BlobStore {
        self.blob_store.as_ref()
    }

    /// Get the storage configuration (upload limits, public base URL)
    pub fn storage_config(&self) -> &StorageConfig {
        &self.storage_config
    }

    // === Change feed ===

    /// Get the change-feed publisher
    pub fn publisher(&self) -> &FeedPublisher {
        &self.publisher
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("blob_store", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    offer_repo: Option<Arc<dyn OfferRepository>>,
    conversation_repo: Option<Arc<dyn ConversationRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    blob_store: Option<Arc<dyn BlobStore>>,
    storage_config: Option<StorageConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            redis_pool: None,
            profile_repo: None,
            offer_repo: None,
            conversation_repo: None,
            message_repo: None,
            review_repo: None,
            blob_store: None,
            storage_config: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn offer_repo(mut self, repo: Arc<dyn OfferRepository>) -> Self {
        self.offer_repo = Some(repo);
        self
    }

    pub fn conversation_repo(mut self, repo: Arc<dyn ConversationRepository>) -> Self {
        self.conversation_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn blob_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.blob_store = Some(store);
        self
    }

    pub fn storage_config(mut self, config: StorageConfig) -> Self {
        self.storage_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.redis_pool
                .ok_or_else(|| super::error::ServiceError::validation("redis_pool is required"))?,
            self.profile_repo
                .ok_or_else(|| super::error::ServiceError::validation("profile_repo is required"))?,
            self.offer_repo
                .ok_or_else(|| super::error::ServiceError::validation("offer_repo is required"))?,
            self.conversation_repo.ok_or_else(|| {
                super::error::ServiceError::validation("conversation_repo is required")
            })?,
            self.message_repo
                .ok_or_else(|| super::error::ServiceError::validation("message_repo is required"))?,
            self.review_repo
                .ok_or_else(|| super::error::ServiceError::validation("review_repo is required"))?,
            self.blob_store
                .ok_or_else(|| super::error::ServiceError::validation("blob_store is required"))?,
            self.storage_config.ok_or_else(|| {
                super::error::ServiceError::validation("storage_config is required")
            })?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
