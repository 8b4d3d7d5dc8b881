use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::kv::KeyValueStore;
use crate::chart::ThemeMode;
use crate::error::Result;
use crate::models::{BookmarkEntry, HistoryEntry};
use crate::state::selection::{ChartKind, SortKey, TimeWindow};

pub const HISTORY_KEY: &str = "github-search-history";
pub const BOOKMARKS_KEY: &str = "github-bookmarks";
pub const PREFERENCES_KEY: &str = "github-preferences";

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Option<ThemeMode>,
    pub chart_kind: ChartKind,
    pub time_window: TimeWindow,
    pub sort: SortKey,
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: None,
            chart_kind: ChartKind::default(),
            time_window: TimeWindow::default(),
            sort: SortKey::default(),
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkOutcome {
    Added,
    AlreadyPresent,
}

impl BookmarkOutcome {
    pub fn notice(&self) -> &'static str {
        match self {
            BookmarkOutcome::Added => "Profile bookmarked!",
            BookmarkOutcome::AlreadyPresent => "Profile already bookmarked",
        }
    }
}

pub struct PreferenceStore<S: KeyValueStore> {
    backend: S,
    history_limit: usize,
    history: Vec<HistoryEntry>,
    bookmarks: Vec<BookmarkEntry>,
    preferences: Preferences,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn load(backend: S, history_limit: usize) -> Result<Self> {
        let history = read_value(&backend, HISTORY_KEY)?.unwrap_or_default();
        let bookmarks = read_value(&backend, BOOKMARKS_KEY)?.unwrap_or_default();
        let preferences = read_value(&backend, PREFERENCES_KEY)?.unwrap_or_default();

        Ok(Self {
            backend,
            history_limit: history_limit.max(1),
            history,
            bookmarks,
            preferences,
        })
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn bookmarks(&self) -> &[BookmarkEntry] {
        &self.bookmarks
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    pub fn record_search(&mut self, entry: HistoryEntry) -> Result<()> {
        self.history.retain(|e| e.login != entry.login);
        self.history.insert(0, entry);
        self.history.truncate(self.history_limit);
        self.flush_history()
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear();
        self.flush_history()
    }

    pub fn add_bookmark(&mut self, entry: BookmarkEntry) -> Result<BookmarkOutcome> {
        if self.is_bookmarked(&entry.login) {
            return Ok(BookmarkOutcome::AlreadyPresent);
        }
        self.bookmarks.push(entry);
        self.flush_bookmarks()?;
        Ok(BookmarkOutcome::Added)
    }

    pub fn remove_bookmark(&mut self, login: &str) -> Result<bool> {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.login != login);
        if self.bookmarks.len() == before {
            return Ok(false);
        }
        self.flush_bookmarks()?;
        Ok(true)
    }

    pub fn is_bookmarked(&self, login: &str) -> bool {
        self.bookmarks.iter().any(|b| b.login == login)
    }

    pub fn update_preferences(&mut self, update: impl FnOnce(&mut Preferences)) -> Result<()> {
        let mut next = self.preferences.clone();
        update(&mut next);
        write_value(&mut self.backend, PREFERENCES_KEY, &next)?;
        self.preferences = next;
        Ok(())
    }

    fn flush_history(&mut self) -> Result<()> {
        write_value(&mut self.backend, HISTORY_KEY, &self.history)
    }

    fn flush_bookmarks(&mut self) -> Result<()> {
        write_value(&mut self.backend, BOOKMARKS_KEY, &self.bookmarks)
    }
}

fn read_value<S: KeyValueStore, T: DeserializeOwned>(backend: &S, key: &str) -> Result<Option<T>> {
    let Some(raw) = backend.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Ignoring malformed stored value for {}: {}", key, e);
            Ok(None)
        }
    }
}

fn write_value<S: KeyValueStore, T: Serialize>(backend: &mut S, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    debug!("Persisting {} ({} bytes)", key, raw.len());
    backend.set(key, &raw)
}
