use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::analysis::{self, aggregator, ProfileSnapshot, ScoringEngine, HEATMAP_DAYS};
use crate::chart::{self, Drawing, LegendEntry, Theme, ThemeMode};
use crate::collection::{
    ActivityFeed, ComparedProfile, ComparisonOutcome, Page, ProfileComparison, RepoTable, TimelineEntry,
};
use crate::error::Result;
use crate::export::{self, ProfileExport};
use crate::models::analysis::{
    Achievement, CodeQuality, DeveloperScore, Insights, LanguageStat, Recommendation, RepoTotals,
};
use crate::models::{BookmarkEntry, HistoryEntry, Profile, Repository};
use crate::state::{step, Action, AppState, Effect, Selection};
use crate::storage::{BookmarkOutcome, KeyValueStore, PreferenceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    #[serde(flatten)]
    pub totals: RepoTotals,
}

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub profile: &'a Profile,
    pub metrics: Metrics,
    pub insights: Insights,
    pub code_quality: CodeQuality,
    pub recommendations: Vec<Recommendation>,
    pub score: DeveloperScore,
    pub achievements: Vec<Achievement>,
    pub languages: Vec<LegendEntry>,
    pub repositories: Page<&'a Repository>,
    pub timeline: Vec<TimelineEntry>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub comparison: &'a [ComparedProfile],
}

pub struct Dashboard<S: KeyValueStore> {
    state: AppState,
    snapshot: Option<ProfileSnapshot>,
    repos: RepoTable,
    activity: ActivityFeed,
    store: PreferenceStore<S>,
    scoring: ScoringEngine,
    comparison: ProfileComparison,
}

impl<S: KeyValueStore> Dashboard<S> {
    pub fn new(store: PreferenceStore<S>, system_prefers_dark: bool) -> Self {
        let prefs = store.preferences();
        let selection = Selection {
            sort: prefs.sort,
            chart_kind: prefs.chart_kind,
            time_window: prefs.time_window,
            ..Selection::default()
        };
        let dark_mode = chart::resolve_dark_mode(prefs.theme, system_prefers_dark);

        let mut repos = RepoTable::new(Vec::new());
        repos.set_sort(selection.sort);

        Self {
            state: AppState::new(selection, dark_mode),
            snapshot: None,
            repos,
            activity: ActivityFeed::default(),
            store,
            scoring: ScoringEngine::new(),
            comparison: ProfileComparison::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&ProfileSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn store(&self) -> &PreferenceStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PreferenceStore<S> {
        &mut self.store
    }

    pub fn theme(&self) -> Theme {
        Theme::resolve(self.state.dark_mode)
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Effect>> {
        let (next, effects) = step(&self.state, action);

        // Persist first so a failed write leaves everything unchanged.
        if effects.contains(&Effect::PersistPreferences) {
            let mode = if next.dark_mode { ThemeMode::Dark } else { ThemeMode::Light };
            self.store.update_preferences(|p| p.theme = Some(mode))?;
        }

        self.repos.set_sort(next.selection.sort);
        self.activity.set_filter(next.selection.activity_filter);
        self.state = next;
        Ok(effects)
    }

    pub fn load_snapshot(&mut self, snapshot: ProfileSnapshot, now_ms: i64) -> Result<Vec<Effect>> {
        self.store
            .record_search(HistoryEntry::from_profile(&snapshot.profile, now_ms))?;

        self.repos.replace(snapshot.repositories.clone());
        self.repos.set_filter("");
        self.activity.replace(snapshot.events.clone());
        tracing::debug!("Dashboard now showing {}", snapshot.profile.login);
        self.snapshot = Some(snapshot);

        self.dispatch(Action::ProfileLoaded)
    }

    pub fn clear_profile(&mut self) -> Result<Vec<Effect>> {
        self.snapshot = None;
        self.repos.replace(Vec::new());
        self.activity.replace(Vec::new());
        self.dispatch(Action::ProfileCleared)
    }

    pub fn save_selection_as_default(&mut self) -> Result<()> {
        let selection = self.state.selection;
        self.store.update_preferences(|p| {
            p.chart_kind = selection.chart_kind;
            p.time_window = selection.time_window;
            p.sort = selection.sort;
        })
    }

    pub fn filter_repositories(&mut self, query: &str) -> Vec<Effect> {
        self.repos.set_filter(query);
        vec![Effect::RenderRepositories]
    }

    pub fn change_page(&mut self, delta: i64) -> Vec<Effect> {
        if self.repos.change_page(delta) {
            vec![Effect::RenderRepositories]
        } else {
            Vec::new()
        }
    }

    pub fn go_to_page(&mut self, page: usize) -> Vec<Effect> {
        if self.repos.go_to_page(page) {
            vec![Effect::RenderRepositories]
        } else {
            Vec::new()
        }
    }

    pub fn repository_page(&self) -> Page<&Repository> {
        self.repos.current()
    }

    pub fn timeline(&self, now: DateTime<Utc>) -> Vec<TimelineEntry> {
        self.activity.timeline(now)
    }

    fn repositories(&self) -> &[Repository] {
        self.repos.source()
    }

    pub fn language_stats(&self) -> Vec<LanguageStat> {
        aggregator::language_size_stats(self.repositories())
    }

    pub fn language_chart(&self) -> Drawing {
        chart::render_language_chart(&self.language_stats(), self.state.selection.chart_kind, &self.theme())
    }

    pub fn language_legend(&self) -> Vec<LegendEntry> {
        chart::legend(&self.language_stats())
    }

    pub fn language_trend(&self) -> Drawing {
        chart::render_language_trend(&self.language_stats(), &self.theme())
    }

    pub fn activity_chart<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> Drawing {
        let events = self.activity.events();
        if events.is_empty() {
            return chart::render_no_activity(&self.theme());
        }

        let window = self.state.selection.time_window.days();
        let buckets = aggregator::activity_by_day(events, window, today, tz);
        chart::render_activity(&buckets, &self.theme())
    }

    pub fn heatmap<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> Drawing {
        let buckets = aggregator::activity_by_day(self.activity.events(), HEATMAP_DAYS, today, tz);
        chart::render_heatmap(&chart::heatmap_cells(&buckets), &self.theme())
    }

    pub fn metrics(&self) -> Option<Metrics> {
        let profile = &self.snapshot.as_ref()?.profile;
        Some(Metrics {
            followers: profile.followers,
            following: profile.following,
            public_repos: profile.public_repos,
            totals: aggregator::repo_totals(self.repositories()),
        })
    }

    pub fn insights(&self, now: DateTime<Utc>) -> Option<Insights> {
        self.snapshot.as_ref()?;
        Some(analysis::insights(self.repositories(), now))
    }

    pub fn code_quality(&self, now: DateTime<Utc>) -> Option<CodeQuality> {
        self.snapshot.as_ref()?;
        Some(analysis::code_quality(self.repositories(), now))
    }

    pub fn recommendations(&self, now: DateTime<Utc>) -> Vec<Recommendation> {
        match &self.snapshot {
            Some(s) => analysis::recommendations(&s.profile, self.repositories(), now),
            None => Vec::new(),
        }
    }

    pub fn developer_score(&self, now: DateTime<Utc>) -> Option<DeveloperScore> {
        let profile = &self.snapshot.as_ref()?.profile;
        Some(self.scoring.developer_score(profile, self.repositories(), now))
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        match &self.snapshot {
            Some(s) => self.scoring.achievements(&s.profile, self.repositories()),
            None => Vec::new(),
        }
    }

    pub fn bookmark_current(&mut self, now_ms: i64) -> Result<Option<BookmarkOutcome>> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(None);
        };
        let entry = BookmarkEntry::from_profile(&snapshot.profile, now_ms);
        self.store.add_bookmark(entry).map(Some)
    }

    pub fn compare(&mut self, profile: &Profile, repos: &[Repository]) -> ComparisonOutcome {
        self.comparison.add(ComparedProfile::new(profile, repos))
    }

    pub fn compare_current(&mut self) -> Option<ComparisonOutcome> {
        let snapshot = self.snapshot.as_ref()?;
        Some(self.comparison.add(ComparedProfile::new(&snapshot.profile, self.repos.source())))
    }

    pub fn comparison(&self) -> &[ComparedProfile] {
        self.comparison.profiles()
    }

    pub fn export(&self, now: DateTime<Utc>) -> Option<ProfileExport<'_>> {
        self.snapshot.as_ref().map(|s| export::profile_export(s, now))
    }

    pub fn report(&self, now: DateTime<Utc>) -> Option<Report<'_>> {
        let snapshot = self.snapshot.as_ref()?;
        Some(Report {
            profile: &snapshot.profile,
            metrics: self.metrics()?,
            insights: self.insights(now)?,
            code_quality: self.code_quality(now)?,
            recommendations: self.recommendations(now),
            score: self.developer_score(now)?,
            achievements: self.achievements(),
            languages: self.language_legend(),
            repositories: self.repository_page(),
            timeline: self.timeline(now),
            comparison: self.comparison(),
        })
    }
}
