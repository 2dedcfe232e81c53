//! Message feed state for one open conversation
//!
//! `MessageFeed` is a pure state machine: the service fetches pages and
//! live events, the feed folds them into the ordered sequence the chat
//! view renders. Keeping it synchronous makes the ordering, offset, and
//! auto-scroll rules unit-testable without a store.

use chrono::{DateTime, Utc};
use swap_core::entities::Message;
use uuid::Uuid;

/// Messages fetched per history page
pub const PAGE_SIZE: i64 = 50;

/// Distance from the bottom (in scroll units) under which a live append
/// still auto-scrolls the view
pub const NEAR_BOTTOM_THRESHOLD: f64 = 100.0;

/// Outcome of folding one live insert into the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveAppend {
    /// False when the event was a duplicate of a message already held
    pub appended: bool,
    /// True when the view should follow the append to the bottom
    pub should_scroll: bool,
}

/// Ordered message sequence for one conversation, oldest first.
///
/// History pages arrive newest-first from the store and are reversed on
/// entry; live inserts are appended in arrival order and never re-sorted.
/// The feed records which fetched messages were inbound and unread so the
/// caller can flip them in one batched update; the local copies keep
/// their flag, the store stays authoritative.
#[derive(Debug, Clone)]
pub struct MessageFeed {
    viewer_id: Uuid,
    messages: Vec<Message>,
    /// Offset at which the next older page starts
    offset: i64,
    has_more: bool,
    near_bottom: bool,
}

impl MessageFeed {
    /// Empty feed for a viewer. The view starts pinned to the bottom.
    #[must_use]
    pub fn new(viewer_id: Uuid) -> Self {
        Self {
            viewer_id,
            messages: Vec::new(),
            offset: 0,
            has_more: false,
            near_bottom: true,
        }
    }

    /// Viewer this feed marks messages as read for
    #[inline]
    #[must_use]
    pub fn viewer_id(&self) -> Uuid {
        self.viewer_id
    }

    /// All held messages, oldest first
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether an older page remains beyond the held history
    #[inline]
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Offset to fetch the next older page at
    #[inline]
    #[must_use]
    pub fn next_offset(&self) -> i64 {
        self.offset
    }

    /// Whether the last reported scroll position was near the bottom
    #[inline]
    #[must_use]
    pub fn is_near_bottom(&self) -> bool {
        self.near_bottom
    }

    /// Fold in the first page (newest `PAGE_SIZE`, descending) and the
    /// total count. Replaces any held history. Returns the ids of
    /// fetched messages that are inbound and unread for the viewer.
    pub fn apply_initial(&mut self, newest_first: Vec<Message>, total: i64) -> Vec<Uuid> {
        let mut page = newest_first;
        page.reverse();

        let unread = Self::unread_ids(&page, self.viewer_id);

        self.messages = page;
        self.offset = PAGE_SIZE;
        self.has_more = total > self.offset;

        unread
    }

    /// Fold in the next older page (descending), prepending it before the
    /// held history. Advances the offset by the page size regardless of
    /// how many rows the page actually carried.
    pub fn apply_older(&mut self, newest_first: Vec<Message>, total: i64) -> Vec<Uuid> {
        let mut page = newest_first;
        page.reverse();

        let unread = Self::unread_ids(&page, self.viewer_id);

        page.append(&mut self.messages);
        self.messages = page;
        self.offset += PAGE_SIZE;
        self.has_more = total > self.offset;

        unread
    }

    /// Fold in one live insert. Duplicate ids are dropped; everything
    /// else is appended in arrival order without re-sorting. Live
    /// arrivals are not marked read; only page fetches do that.
    pub fn push_live(&mut self, message: Message) -> LiveAppend {
        if self.messages.iter().any(|m| m.id == message.id) {
            return LiveAppend {
                appended: false,
                should_scroll: false,
            };
        }

        let should_scroll = self.near_bottom;
        self.messages.push(message);

        LiveAppend {
            appended: true,
            should_scroll,
        }
    }

    /// Record the latest scroll position as distance from the bottom.
    /// Updates the auto-scroll flag on every call, independent of appends.
    pub fn record_scroll(&mut self, distance_to_bottom: f64) {
        self.near_bottom = distance_to_bottom < NEAR_BOTTOM_THRESHOLD;
    }

    /// Timestamp of the newest held message
    #[must_use]
    pub fn latest_created_at(&self) -> Option<DateTime<Utc>> {
        self.messages.last().map(|m| m.created_at)
    }

    fn unread_ids(page: &[Message], viewer_id: Uuid) -> Vec<Uuid> {
        page.iter()
            .filter(|m| m.is_unread_for(viewer_id))
            .map(|m| m.id)
            .collect()
    }
}
