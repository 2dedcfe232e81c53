//! Profile entity - a marketplace member's public identity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Profile entity representing a marketplace member.
///
/// The `rating`, `reviews_count`, and `completed_swaps` aggregates are
/// maintained by database triggers; Rust code only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub interests: Vec<String>,
    pub skills_offered: Vec<String>,
    pub skills_needed: Vec<String>,
    pub rating: f64,
    pub reviews_count: i32,
    pub completed_swaps: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new Profile with required fields
    pub fn new(id: Uuid, email: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            name,
            avatar_url: None,
            bio: None,
            phone: None,
            city: None,
            zip: None,
            interests: Vec::new(),
            skills_offered: Vec::new(),
            skills_needed: Vec::new(),
            rating: 0.0,
            reviews_count: 0,
            completed_swaps: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Fallback initial shown when no avatar is set
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }

    /// Check if any reviews have been left for this member
    #[inline]
    pub fn has_reviews(&self) -> bool {
        self.reviews_count > 0
    }

    /// Update the display name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the bio
    pub fn set_bio(&mut self, bio: Option<String>) {
        self.bio = bio;
        self.updated_at = Utc::now();
    }

    /// Update the phone number
    pub fn set_phone(&mut self, phone: Option<String>) {
        self.phone = phone;
        self.updated_at = Utc::now();
    }

    /// Update city and zip together
    pub fn set_location(&mut self, city: Option<String>, zip: Option<String>) {
        self.city = city;
        self.zip = zip;
        self.updated_at = Utc::now();
    }

    /// Replace the interest tags
    pub fn set_interests(&mut self, interests: Vec<String>) {
        self.interests = interests;
        self.updated_at = Utc::now();
    }

    /// Replace the offered-skills list
    pub fn set_skills_offered(&mut self, skills: Vec<String>) {
        self.skills_offered = skills;
        self.updated_at = Utc::now();
    }

    /// Replace the needed-skills list
    pub fn set_skills_needed(&mut self, skills: Vec<String>) {
        self.skills_needed = skills;
        self.updated_at = Utc::now();
    }

    /// Update the avatar URL
    pub fn set_avatar_url(&mut self, avatar_url: Option<String>) {
        self.avatar_url = avatar_url;
        self.updated_at = Utc::now();
    }
}
