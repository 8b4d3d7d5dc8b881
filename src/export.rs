use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::{aggregator, ProfileSnapshot};
use crate::error::Result;
use crate::models::analysis::LanguageStat;
use crate::models::{BookmarkEntry, Event, HistoryEntry, Profile, Repository};
use crate::storage::{KeyValueStore, PreferenceStore, Preferences};

const EXPORTED_BY: &str = "GitHub Analytics Dashboard";
const TOP_REPOSITORIES: usize = 10;

#[derive(Debug, Serialize)]
pub struct ExportInsights<'a> {
    pub total_stars: u64,
    pub total_forks: u64,
    pub languages: Vec<LanguageStat>,
    pub top_repositories: &'a [Repository],
}

#[derive(Debug, Serialize)]
pub struct ProfileExport<'a> {
    pub user: &'a Profile,
    pub repositories: &'a [Repository],
    pub activities: &'a [Event],
    pub insights: ExportInsights<'a>,
    pub exported_at: DateTime<Utc>,
    pub exported_by: &'static str,
}

pub fn profile_export(snapshot: &ProfileSnapshot, now: DateTime<Utc>) -> ProfileExport<'_> {
    let totals = aggregator::repo_totals(&snapshot.repositories);
    let top = snapshot.repositories.len().min(TOP_REPOSITORIES);

    ProfileExport {
        user: &snapshot.profile,
        repositories: &snapshot.repositories,
        activities: &snapshot.events,
        insights: ExportInsights {
            total_stars: totals.stars,
            total_forks: totals.forks,
            languages: aggregator::language_totals(&snapshot.repositories),
            top_repositories: &snapshot.repositories[..top],
        },
        exported_at: now,
        exported_by: EXPORTED_BY,
    }
}

pub fn profile_export_filename(login: &str) -> String {
    format!("{}-github-analysis.json", login)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupKind {
    History,
    Bookmarks,
    Settings,
    All,
}

impl BackupKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "history" => Some(BackupKind::History),
            "bookmarks" => Some(BackupKind::Bookmarks),
            "settings" => Some(BackupKind::Settings),
            "all" => Some(BackupKind::All),
            _ => None,
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            BackupKind::History => "github-search-history.json",
            BackupKind::Bookmarks => "github-bookmarks.json",
            BackupKind::Settings => "github-dashboard-settings.json",
            BackupKind::All => "github-dashboard-backup.json",
        }
    }

    fn type_tag(&self) -> &'static str {
        match self {
            BackupKind::History => "search_history",
            BackupKind::Bookmarks => "bookmarks",
            BackupKind::Settings => "settings",
            BackupKind::All => "complete_backup",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Backup<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_history: Option<&'a [HistoryEntry]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmarked_profiles: Option<&'a [BookmarkEntry]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<&'a Preferences>,
    pub exported_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

pub fn backup<S: KeyValueStore>(
    store: &PreferenceStore<S>,
    kind: BackupKind,
    now: DateTime<Utc>,
) -> Backup<'_> {
    let all = kind == BackupKind::All;

    Backup {
        search_history: (all || kind == BackupKind::History).then(|| store.history()),
        bookmarked_profiles: (all || kind == BackupKind::Bookmarks).then(|| store.bookmarks()),
        preferences: (all || kind == BackupKind::Settings).then(|| store.preferences()),
        exported_at: now,
        kind: kind.type_tag(),
    }
}

pub fn to_json<T: Serialize>(document: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}
