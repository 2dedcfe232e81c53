//! Acting-user session handle
//!
//! Every service entry point receives a `Session` naming the signed-in
//! member it acts for. There is no ambient "current user" state; who is
//! acting is always explicit in the call.

use uuid::Uuid;

/// The signed-in member a service call runs on behalf of.
///
/// Credential handling lives outside this crate; a `Session` is only
/// constructed after authentication has already happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    user_id: Uuid,
}

impl Session {
    /// Create a session for an authenticated member
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// The acting member's profile id
    #[inline]
    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}
