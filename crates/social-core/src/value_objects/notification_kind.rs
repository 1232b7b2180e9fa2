//! Notification kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the originating user did to trigger a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Comment,
    Like,
    Follow,
    LikeComment,
}

impl NotificationKind {
    /// Stable string form, shared by the database column and the JSON payloads
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Like => "like",
            Self::Follow => "follow",
            Self::LikeComment => "like_comment",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comment" => Ok(Self::Comment),
            "like" => Ok(Self::Like),
            "follow" => Ok(Self::Follow),
            "like_comment" => Ok(Self::LikeComment),
            other => Err(format!("unknown notification kind: {other}")),
        }
    }
}
