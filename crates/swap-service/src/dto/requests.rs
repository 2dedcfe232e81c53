//! Request DTOs for service entry points
//!
//! All request DTOs implement `Deserialize`, and the ones carrying free
//! text implement `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

use swap_core::entities::OfferKind;

// ============================================================================
// Offer Requests
// ============================================================================

/// Create offer request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOfferRequest {
    /// Whether the author offers a skill or is looking for one
    pub kind: OfferKind,

    #[validate(length(min = 1, max = 100, message = "Skill must be 1-100 characters"))]
    pub skill: String,

    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    pub description: String,

    #[validate(length(min = 3, max = 10, message = "ZIP code must be 3-10 characters"))]
    pub zip: String,

    #[validate(length(max = 100, message = "City must be at most 100 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 10, message = "At most 10 tags"))]
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Raw image payload for an upload
///
/// Not deserialized from the wire; outer surfaces hand the decoded bytes
/// straight to the service.
#[derive(Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("bytes", &format!("{} bytes", self.bytes.len()))
            .field("content_type", &self.content_type)
            .finish()
    }
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Update own profile request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 80, message = "Name must be 1-80 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 100, message = "City must be at most 100 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 10, message = "ZIP code must be at most 10 characters"))]
    pub zip: Option<String>,

    pub interests: Option<Vec<String>>,
    pub skills_offered: Option<Vec<String>>,
    pub skills_needed: Option<Vec<String>>,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Send message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: String,
}

// ============================================================================
// Review Requests
// ============================================================================

/// Mutable review form, held by the caller across attempts.
///
/// The service enforces the same rules the derive declares, but as
/// specific domain conditions (no stars selected, out of range, comment
/// too long) so each failure surfaces with its own message. A successful
/// submit clears the form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewForm {
    /// 1-5; zero means the reviewer never picked a rating
    #[validate(range(min = 1, max = 5, message = "Rating must be 1-5 stars"))]
    pub stars: i16,

    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: Option<String>,
}

impl ReviewForm {
    /// Reset to the untouched state
    pub fn clear(&mut self) {
        self.stars = 0;
        self.comment = None;
    }
}
