//! Post entity - user-authored content

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A post. Like and comment counts are not stored here; they are computed
/// from the relation tables at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(id: Snowflake, author_id: Snowflake, description: String, image: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            description,
            image: image.filter(|s| !s.is_empty()),
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Apply a partial edit. `None` leaves a field unchanged.
    pub fn edit(&mut self, description: Option<String>, image: Option<String>) {
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(image) = image {
            self.image = Some(image).filter(|s| !s.is_empty());
        }
        self.updated_at = Utc::now();
    }
}

/// A post joined with its read-time aggregates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostStats {
    pub post: Post,
    pub likes_count: i64,
    pub comments_count: i64,
    /// `None` when there is no viewer to personalize for
    pub liked: Option<bool>,
}

/// Sort orders accepted by the explore listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExploreSort {
    /// Most liked first, newest first among ties
    #[default]
    Trending,
    New,
    Random,
}

impl std::str::FromStr for ExploreSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trending" => Ok(Self::Trending),
            "new" => Ok(Self::New),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown sort: {other}")),
        }
    }
}
