use serde::{Deserialize, Serialize};

use super::user::Profile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub login: String,
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn from_profile(profile: &Profile, timestamp: i64) -> Self {
        Self {
            login: profile.login.clone(),
            name: profile.name.clone(),
            avatar_url: profile.avatar_url.clone(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkEntry {
    pub login: String,
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    pub bookmarked_at: i64,
}

impl BookmarkEntry {
    pub fn from_profile(profile: &Profile, bookmarked_at: i64) -> Self {
        Self {
            login: profile.login.clone(),
            name: profile.name.clone(),
            avatar_url: profile.avatar_url.clone(),
            bookmarked_at,
        }
    }
}
