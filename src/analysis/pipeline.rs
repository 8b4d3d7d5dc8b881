use std::sync::Arc;

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::{ProfileSource, UserSearchFilters};
use crate::models::{Event, Profile, Repository, UserSuggestion};
use crate::state::RequestTracker;

pub const MIN_SUGGESTION_QUERY: usize = 2;

const ADVANCED_SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub profile: Profile,
    pub repositories: Vec<Repository>,
    pub events: Vec<Event>,
    pub fetched_at: DateTime<Utc>,
}

const STAGES: [(&str, u64); 4] = [
    ("Fetching user data...", 25),
    ("Loading repositories...", 50),
    ("Analyzing activity...", 75),
    ("Generating insights...", 100),
];

pub struct AnalysisPipeline {
    source: Arc<dyn ProfileSource>,
    config: PipelineConfig,
    loads: RequestTracker,
    lookups: RequestTracker,
}

impl AnalysisPipeline {
    pub fn new(source: impl ProfileSource + 'static, config: PipelineConfig) -> Self {
        Self::with_source(Arc::new(source), config)
    }

    pub fn with_source(source: Arc<dyn ProfileSource>, config: PipelineConfig) -> Self {
        Self {
            source,
            config,
            loads: RequestTracker::new(),
            lookups: RequestTracker::new(),
        }
    }

    /// Fetches profile, repositories and events for `login`.
    ///
    /// Returns `Ok(None)` when the login is blank or when another load was
    /// started before this one settled, whether it succeeded or failed.
    pub async fn load(&self, login: &str) -> Result<Option<ProfileSnapshot>> {
        let login = login.trim();
        if login.is_empty() {
            tracing::debug!("Ignoring blank login");
            return Ok(None);
        }

        let generation = self.loads.issue();
        let progress = self.progress_bar();
        let fetched = self.fetch(login, &progress).await;
        progress.finish_and_clear();

        if !self.loads.is_current(generation) {
            tracing::debug!("Discarding superseded load of {} (generation {})", login, generation);
            return Ok(None);
        }

        let snapshot = fetched?;
        tracing::info!(
            "Loaded {}: {} repositories, {} events",
            login,
            snapshot.repositories.len(),
            snapshot.events.len()
        );
        Ok(Some(snapshot))
    }

    // Event failures degrade to an empty feed; profile or repository
    // failures fail the load.
    async fn fetch(&self, login: &str, progress: &ProgressBar) -> Result<ProfileSnapshot> {
        advance(progress, 0);
        tracing::info!("Loading profile for: {}", login);
        let profile = self.source.profile(login).await?;

        advance(progress, 1);
        let (repositories, events) = futures::join!(
            self.source.repositories(login, self.config.repos_per_page),
            self.source.events(login, self.config.events_per_page),
        );
        let repositories = repositories?;

        advance(progress, 2);
        let events = events.unwrap_or_else(|e| {
            tracing::warn!("Could not load events for {}: {}", login, e);
            Vec::new()
        });

        advance(progress, 3);
        Ok(ProfileSnapshot {
            profile,
            repositories,
            events,
            fetched_at: Utc::now(),
        })
    }

    pub async fn suggestions(&self, query: &str) -> Result<Option<Vec<UserSuggestion>>> {
        // Issued before the length check so a short query still makes older
        // lookups stale.
        let generation = self.lookups.issue();
        let query = query.trim();
        if query.chars().count() <= MIN_SUGGESTION_QUERY {
            return Ok(Some(Vec::new()));
        }

        let found = self
            .source
            .suggestions(query, self.config.suggestion_limit)
            .await;

        if !self.lookups.is_current(generation) {
            tracing::debug!("Discarding stale suggestions for {:?}", query);
            return Ok(None);
        }

        found.map(Some)
    }

    pub async fn search(&self, filters: &UserSearchFilters) -> Result<Vec<UserSuggestion>> {
        let query = filters.to_query();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        tracing::info!("Searching users: {}", query);
        self.source.suggestions(&query, ADVANCED_SEARCH_LIMIT).await
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(100);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}% {msg}")
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

fn advance(progress: &ProgressBar, stage: usize) {
    let (message, position) = STAGES[stage];
    progress.set_message(message);
    progress.set_position(position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fixtures::{event, lang_repo, profile};
    use crate::models::EventType;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeSource {
        gate: Option<Arc<Notify>>,
        fail_events: bool,
        lookups: AtomicUsize,
        last_query: std::sync::Mutex<String>,
    }

    impl FakeSource {
        fn gated(gate: &Arc<Notify>) -> Self {
            Self {
                gate: Some(gate.clone()),
                ..Self::default()
            }
        }

        // Anything starting with "slow" waits for the gate.
        async fn wait(&self, subject: &str) {
            if let (Some(gate), true) = (&self.gate, subject.starts_with("slow")) {
                gate.notified().await;
            }
        }
    }

    #[async_trait]
    impl ProfileSource for FakeSource {
        async fn profile(&self, login: &str) -> Result<Profile> {
            self.wait(login).await;
            if login.ends_with("ghost") {
                return Err(Error::UserNotFound(login.to_string()));
            }
            Ok(profile(login))
        }

        async fn repositories(&self, _login: &str, _per_page: u32) -> Result<Vec<Repository>> {
            Ok(vec![lang_repo("a", "Rust", 10), lang_repo("b", "Go", 5)])
        }

        async fn events(&self, _login: &str, _per_page: u32) -> Result<Vec<Event>> {
            if self.fail_events {
                return Err(Error::GitHubApi("events unavailable".into()));
            }
            Ok(vec![event(EventType::Push, "2024-06-01T10:00:00Z")])
        }

        async fn suggestions(&self, query: &str, limit: u32) -> Result<Vec<UserSuggestion>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut last) = self.last_query.lock() {
                *last = query.to_string();
            }
            self.wait(query).await;
            if query.contains("boom") {
                return Err(Error::GitHubApi("search unavailable".into()));
            }
            Ok((0..limit.min(5))
                .map(|i| UserSuggestion {
                    login: format!("{query}{i}"),
                    avatar_url: String::new(),
                    account_type: "User".into(),
                })
                .collect())
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    #[tokio::test]
    async fn test_load_collects_snapshot() {
        let pipeline = AnalysisPipeline::new(FakeSource::default(), PipelineConfig::default());
        let snapshot = pipeline.load(" octocat ").await.unwrap().unwrap();

        assert_eq!(snapshot.profile.login, "octocat");
        assert_eq!(snapshot.repositories.len(), 2);
        assert_eq!(snapshot.events.len(), 1);
    }

    #[tokio::test]
    async fn test_event_failure_degrades_to_empty_feed() {
        let source = FakeSource {
            fail_events: true,
            ..FakeSource::default()
        };
        let pipeline = AnalysisPipeline::new(source, PipelineConfig::default());
        let snapshot = pipeline.load("octocat").await.unwrap().unwrap();
        assert!(snapshot.events.is_empty());
        assert_eq!(snapshot.repositories.len(), 2);
    }

    #[tokio::test]
    async fn test_not_found_is_surfaced() {
        let pipeline = AnalysisPipeline::new(FakeSource::default(), PipelineConfig::default());
        let err = pipeline.load("ghost").await.unwrap_err();
        assert!(matches!(err, Error::UserNotFound(ref login) if login == "ghost"));
        assert_eq!(err.user_message(), "User not found. Please check the username.");
    }

    #[tokio::test]
    async fn test_blank_login_is_ignored() {
        let pipeline = AnalysisPipeline::new(FakeSource::default(), PipelineConfig::default());
        assert!(pipeline.load("   ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_superseded_load_is_discarded() {
        let gate = Arc::new(Notify::new());
        let pipeline = AnalysisPipeline::new(FakeSource::gated(&gate), PipelineConfig::default());

        let slow = pipeline.load("slow");
        let fast = async {
            let result = pipeline.load("fast").await;
            gate.notify_one();
            result
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert!(slow.unwrap().is_none());
        assert_eq!(fast.unwrap().map(|s| s.profile.login), Some("fast".to_string()));
    }

    #[tokio::test]
    async fn test_superseded_failed_load_is_discarded() {
        let gate = Arc::new(Notify::new());
        let pipeline = AnalysisPipeline::new(FakeSource::gated(&gate), PipelineConfig::default());

        let slow = pipeline.load("slow-ghost");
        let fast = async {
            let result = pipeline.load("octocat").await;
            gate.notify_one();
            result
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert!(matches!(slow, Ok(None)));
        assert_eq!(fast.unwrap().map(|s| s.profile.login), Some("octocat".to_string()));
    }

    #[tokio::test]
    async fn test_stale_suggestions_are_discarded() {
        let gate = Arc::new(Notify::new());
        let pipeline = AnalysisPipeline::new(FakeSource::gated(&gate), PipelineConfig::default());

        let slow = pipeline.suggestions("slowcat");
        let fast = async {
            let result = pipeline.suggestions("octo").await;
            gate.notify_one();
            result
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow.unwrap(), None);
        assert_eq!(fast.unwrap().map(|found| found.len()), Some(5));
    }

    #[tokio::test]
    async fn test_stale_failed_suggestions_are_discarded() {
        let gate = Arc::new(Notify::new());
        let pipeline = AnalysisPipeline::new(FakeSource::gated(&gate), PipelineConfig::default());

        let slow = pipeline.suggestions("slow-boom");
        let fast = async {
            let result = pipeline.suggestions("oc").await;
            gate.notify_one();
            result
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert!(matches!(slow, Ok(None)));
        assert_eq!(fast.unwrap(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_current_failed_suggestions_surface() {
        let pipeline = AnalysisPipeline::new(FakeSource::default(), PipelineConfig::default());
        assert!(pipeline.suggestions("boom").await.is_err());
    }

    #[tokio::test]
    async fn test_search_builds_qualifier_query() {
        let source = Arc::new(FakeSource::default());
        let pipeline = AnalysisPipeline::with_source(source.clone(), PipelineConfig::default());

        assert!(pipeline.search(&UserSearchFilters::default()).await.unwrap().is_empty());
        assert_eq!(source.lookups.load(Ordering::SeqCst), 0);

        let filters = UserSearchFilters {
            location: Some("berlin".into()),
            min_followers: Some(100),
            ..UserSearchFilters::default()
        };
        let found = pipeline.search(&filters).await.unwrap();
        assert_eq!(found.len(), 5);
        assert_eq!(*source.last_query.lock().unwrap(), "location:berlin followers:>100");
    }

    #[tokio::test]
    async fn test_short_queries_skip_lookup() {
        let source = Arc::new(FakeSource::default());
        let pipeline = AnalysisPipeline::with_source(source.clone(), PipelineConfig::default());

        assert_eq!(pipeline.suggestions("oc").await.unwrap(), Some(Vec::new()));
        assert_eq!(source.lookups.load(Ordering::SeqCst), 0);

        let found = pipeline.suggestions("octo").await.unwrap().unwrap();
        assert_eq!(found.len(), 5);
        assert_eq!(found[0].login, "octo0");
        assert_eq!(source.lookups.load(Ordering::SeqCst), 1);
    }
}
