//! User entity - an account in the user directory

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A registered account. The password hash is kept out of the entity and
/// only ever read through `UserRepository::get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, email: String, username: String, full_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            username,
            full_name,
            avatar: None,
            bio: None,
            website: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.touch();
    }

    pub fn set_full_name(&mut self, full_name: String) {
        self.full_name = full_name;
        self.touch();
    }

    /// Empty strings clear the field.
    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar.filter(|s| !s.is_empty());
        self.touch();
    }

    pub fn set_bio(&mut self, bio: Option<String>) {
        self.bio = bio.filter(|s| !s.is_empty());
        self.touch();
    }

    pub fn set_website(&mut self, website: Option<String>) {
        self.website = website.filter(|s| !s.is_empty());
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
