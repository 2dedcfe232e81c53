//! Conversation entity - a 1:1 thread scoped to one offer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a match toggle, from the acting user's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// The acting user withdrew their agreement
    Removed,
    /// The acting user agreed; the other party has not yet
    Pending,
    /// Both parties have agreed
    Mutual,
}

/// Conversation entity
///
/// Exactly one Conversation exists per (offer, unordered participant
/// pair); the database enforces this with a unique index and creators
/// recover the existing row on conflict.
///
/// `matched_by` holds the ids of participants who signaled agreement
/// (set semantics, at most 2). `matched` is derived: true iff both the
/// creator and the participant are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub creator_id: Uuid,
    pub participant_id: Uuid,
    pub matched_by: Vec<Uuid>,
    pub matched: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new conversation between the interested user (creator)
    /// and the offer's owner (participant)
    #[must_use]
    pub fn new(offer_id: Uuid, creator_id: Uuid, participant_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            offer_id,
            creator_id,
            participant_id,
            matched_by: Vec::new(),
            matched: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Both participant ids
    #[inline]
    #[must_use]
    pub fn participants(&self) -> [Uuid; 2] {
        [self.creator_id, self.participant_id]
    }

    /// Check if a user takes part in this conversation
    #[inline]
    #[must_use]
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.creator_id == user_id || self.participant_id == user_id
    }

    /// The counterpart of a participant, or None for outsiders
    #[must_use]
    pub fn other_participant(&self, user_id: Uuid) -> Option<Uuid> {
        if user_id == self.creator_id {
            Some(self.participant_id)
        } else if user_id == self.participant_id {
            Some(self.creator_id)
        } else {
            None
        }
    }

    /// Check if a user has signaled agreement
    #[inline]
    #[must_use]
    pub fn has_agreed(&self, user_id: Uuid) -> bool {
        self.matched_by.contains(&user_id)
    }

    /// True iff both the creator and the participant have agreed
    #[must_use]
    pub fn both_matched(&self) -> bool {
        self.has_agreed(self.creator_id) && self.has_agreed(self.participant_id)
    }

    /// Toggle the acting user's agreement and re-derive `matched`.
    ///
    /// Callers must have verified that `user_id` is a participant;
    /// authorization is not re-checked here.
    pub fn toggle_match(&mut self, user_id: Uuid) -> MatchState {
        let state = if self.has_agreed(user_id) {
            self.matched_by.retain(|id| *id != user_id);
            MatchState::Removed
        } else {
            self.matched_by.push(user_id);
            if self.both_matched() {
                MatchState::Mutual
            } else {
                MatchState::Pending
            }
        };
        self.matched = self.both_matched();
        self.updated_at = Utc::now();
        state
    }
}
