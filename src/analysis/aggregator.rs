use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::models::analysis::{ActivityBucket, LanguageStat, RepoTotals};
use crate::models::{Event, Repository};

pub const MAX_CHART_LANGUAGES: usize = 8;

pub const HEATMAP_DAYS: u32 = 365;

pub fn language_size_stats(repos: &[Repository]) -> Vec<LanguageStat> {
    let mut stats = language_totals(repos);
    stats.truncate(MAX_CHART_LANGUAGES);
    stats
}

pub fn language_totals(repos: &[Repository]) -> Vec<LanguageStat> {
    let mut stats = group_by_language(repos, |r| r.size);
    sort_descending(&mut stats);
    stats
}

pub fn language_count_stats(repos: &[Repository]) -> Vec<LanguageStat> {
    let mut stats = group_by_language(repos, |_| 1);
    sort_descending(&mut stats);
    stats
}

pub fn distinct_languages(repos: &[Repository]) -> usize {
    repos
        .iter()
        .filter_map(Repository::language)
        .collect::<HashSet<_>>()
        .len()
}

fn group_by_language<F>(repos: &[Repository], weight: F) -> Vec<LanguageStat>
where
    F: Fn(&Repository) -> u64,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<LanguageStat> = Vec::new();

    for repo in repos {
        let Some(language) = repo.language() else {
            continue;
        };
        let slot = *index.entry(language).or_insert_with(|| {
            stats.push(LanguageStat::new(language, 0));
            stats.len() - 1
        });
        stats[slot].value += weight(repo);
    }

    stats
}

// Stable, so ties keep first-seen order.
fn sort_descending(stats: &mut [LanguageStat]) {
    stats.sort_by(|a, b| b.value.cmp(&a.value));
}

/// Zero-filled per-day event counts for the trailing `window_days` days
/// ending at `today`, oldest first.
///
/// An event lands in the bucket of its creation date as seen in `tz`; events
/// outside the window are ignored.
pub fn activity_by_day<Tz: TimeZone>(
    events: &[Event],
    window_days: u32,
    today: NaiveDate,
    tz: &Tz,
) -> Vec<ActivityBucket> {
    if window_days == 0 {
        return Vec::new();
    }

    let start = today - Duration::days(i64::from(window_days) - 1);
    let mut buckets: Vec<ActivityBucket> = (0..window_days)
        .map(|offset| ActivityBucket {
            date: start + Duration::days(i64::from(offset)),
            count: 0,
        })
        .collect();

    for event in events {
        let date = event.created_at.with_timezone(tz).date_naive();
        if date < start || date > today {
            continue;
        }
        let slot = (date - start).num_days() as usize;
        buckets[slot].count += 1;
    }

    buckets
}

pub fn repo_totals(repos: &[Repository]) -> RepoTotals {
    RepoTotals {
        repositories: repos.len(),
        stars: total_stars(repos),
        forks: repos.iter().map(|r| u64::from(r.forks_count)).sum(),
    }
}

pub fn total_stars(repos: &[Repository]) -> u64 {
    repos.iter().map(|r| u64::from(r.stargazers_count)).sum()
}

pub fn updated_since(repos: &[Repository], cutoff: DateTime<Utc>) -> usize {
    repos.iter().filter(|r| r.updated_at > cutoff).count()
}
