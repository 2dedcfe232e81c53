//! Unread badge service
//!
//! Keeps a live viewer-wide unread total in a watch channel, refreshed
//! from the store whenever the all-messages feed announces a change.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use swap_common::Session;
use swap_core::traits::MessageRepository;
use swap_realtime::{FeedChannel, FeedSubscriber};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Live unread badge for one signed-in user.
///
/// The held count only moves on store refetches: feed events are a
/// refresh trigger, never arithmetic, so the badge cannot drift from
/// the store under races or dropped events.
pub struct UnreadCounter {
    user_id: Uuid,
    repo: Arc<dyn MessageRepository>,
    tx: Arc<watch::Sender<i64>>,
    rx: watch::Receiver<i64>,
    task: JoinHandle<()>,
}

impl UnreadCounter {
    /// The last known unread total
    #[must_use]
    pub fn count(&self) -> i64 {
        *self.rx.borrow()
    }

    /// A receiver that yields every change of the total
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<i64> {
        self.rx.clone()
    }

    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Refetch the total from the store immediately
    pub async fn refresh(&self) -> ServiceResult<i64> {
        let total = self.repo.unread_total(self.user_id).await?;
        self.tx.send_replace(total);
        Ok(total)
    }

    /// Tear the badge down on sign-out: zero the count, stop the
    /// refresh loop, release the feed channel.
    pub async fn sign_out(self, subscriber: &FeedSubscriber) {
        self.tx.send_replace(0);
        self.task.abort();
        subscriber
            .unsubscribe(&[FeedChannel::messages()])
            .await
            .ok();
    }
}

impl Drop for UnreadCounter {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for UnreadCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnreadCounter")
            .field("user_id", &self.user_id)
            .field("count", &self.count())
            .finish_non_exhaustive()
    }
}

/// Unread badge service
pub struct UnreadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UnreadService<'a> {
    /// Create a new UnreadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Read the viewer-wide unread total once
    #[instrument(skip(self, session))]
    pub async fn unread_total(&self, session: &Session) -> ServiceResult<i64> {
        let total = self
            .ctx
            .message_repo()
            .unread_total(session.user_id())
            .await?;
        Ok(total)
    }

    /// Start a live badge for the signed-in user.
    ///
    /// Subscribes the all-messages channel, seeds the count from the
    /// store, and spawns the refresh loop. The loop refetches on every
    /// message event; a failed refetch keeps the last value until the
    /// next event.
    #[instrument(skip(self, session, subscriber))]
    pub async fn start(
        &self,
        session: &Session,
        subscriber: &FeedSubscriber,
    ) -> ServiceResult<UnreadCounter> {
        let user_id = session.user_id();
        let repo = self.ctx.shared_message_repo();

        subscriber.subscribe(&[FeedChannel::messages()]).await?;

        let initial = repo.unread_total(user_id).await?;
        let (tx, rx) = watch::channel(initial);
        let tx = Arc::new(tx);

        let mut events = subscriber.receiver();
        let task_repo = Arc::clone(&repo);
        let task_tx = Arc::clone(&tx);
        let task = tokio::spawn(async move {
            loop {
                let refetch = match events.recv().await {
                    Ok(event) => event.channel == FeedChannel::Messages,
                    // Dropped events still imply change
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "Unread refresh loop lagged behind the feed");
                        true
                    }
                    Err(RecvError::Closed) => break,
                };
                if !refetch {
                    continue;
                }

                match task_repo.unread_total(user_id).await {
                    Ok(total) => {
                        task_tx.send_replace(total);
                    }
                    Err(e) => {
                        warn!(
                            user_id = %user_id,
                            error = %e,
                            "Unread refresh failed, keeping last count"
                        );
                    }
                }
            }
        });

        Ok(UnreadCounter {
            user_id,
            repo,
            tx,
            rx,
            task,
        })
    }
}
