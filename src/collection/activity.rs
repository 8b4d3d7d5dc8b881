use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::format::time_ago;
use crate::models::{Event, EventType};
use crate::state::selection::ActivityFilter;

pub const TIMELINE_LIMIT: usize = 15;

impl ActivityFilter {
    pub fn matches(&self, kind: &EventType) -> bool {
        match self {
            ActivityFilter::All => true,
            ActivityFilter::Push => *kind == EventType::Push,
            ActivityFilter::Pr => *kind == EventType::PullRequest,
            ActivityFilter::Issues => *kind == EventType::Issues,
        }
    }
}

pub fn filter_events<'a>(events: &'a [Event], filter: ActivityFilter) -> Vec<&'a Event> {
    events.iter().filter(|e| filter.matches(&e.kind)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub kind: EventType,
    pub description: String,
    pub repo: String,
    pub time_ago: String,
}

pub fn timeline(events: &[Event], filter: ActivityFilter, now: DateTime<Utc>) -> Vec<TimelineEntry> {
    events
        .iter()
        .filter(|e| filter.matches(&e.kind))
        .take(TIMELINE_LIMIT)
        .map(|e| TimelineEntry {
            kind: e.kind.clone(),
            description: e.kind.description(),
            repo: e.repo_name().to_string(),
            time_ago: time_ago(e.created_at, now),
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct ActivityFeed {
    events: Vec<Event>,
    filter: ActivityFilter,
}

impl ActivityFeed {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            filter: ActivityFilter::All,
        }
    }

    pub fn replace(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn filter(&self) -> ActivityFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ActivityFilter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&Event> {
        filter_events(&self.events, self.filter)
    }

    pub fn timeline(&self, now: DateTime<Utc>) -> Vec<TimelineEntry> {
        timeline(&self.events, self.filter, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{event, ts};
    use pretty_assertions::assert_eq;

    fn feed() -> Vec<Event> {
        vec![
            event(EventType::Push, "2024-06-01T10:00:00Z"),
            event(EventType::PullRequest, "2024-06-01T09:00:00Z"),
            event(EventType::Issues, "2024-05-31T12:00:00Z"),
            event(EventType::Watch, "2024-05-30T12:00:00Z"),
            event(EventType::Push, "2024-05-29T12:00:00Z"),
        ]
    }

    #[test]
    fn test_category_mapping() {
        let events = feed();
        assert_eq!(filter_events(&events, ActivityFilter::All).len(), 5);
        assert_eq!(filter_events(&events, ActivityFilter::Push).len(), 2);
        assert_eq!(filter_events(&events, ActivityFilter::Pr).len(), 1);
        assert_eq!(filter_events(&events, ActivityFilter::Issues).len(), 1);
    }

    #[test]
    fn test_timeline_entries() {
        let now = ts("2024-06-01T12:00:00Z");
        let entries = timeline(&feed(), ActivityFilter::Push, now);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "Pushed code to");
        assert_eq!(entries[0].repo, "octocat/hello-world");
        assert_eq!(entries[0].time_ago, "2h ago");
        assert_eq!(entries[1].time_ago, "3d ago");
    }

    #[test]
    fn test_timeline_is_capped() {
        let events: Vec<Event> = (0..40)
            .map(|_| event(EventType::Push, "2024-06-01T10:00:00Z"))
            .collect();
        let mut feed = ActivityFeed::new(events);
        assert_eq!(feed.timeline(ts("2024-06-01T12:00:00Z")).len(), TIMELINE_LIMIT);

        feed.set_filter(ActivityFilter::Issues);
        assert!(feed.visible().is_empty());
        assert!(feed.timeline(ts("2024-06-01T12:00:00Z")).is_empty());
    }
}
