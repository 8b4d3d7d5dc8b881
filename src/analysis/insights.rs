use chrono::{DateTime, Duration, Utc};

use crate::analysis::aggregator::{language_count_stats, total_stars, updated_since};
use crate::models::analysis::{Insights, Level, Recommendation};
use crate::models::{Profile, Repository};

pub const RECENT_DAYS: i64 = 30;

fn recent_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(RECENT_DAYS)
}

pub fn coding_frequency_label(repos: &[Repository], now: DateTime<Utc>) -> Level {
    Level::from_thresholds(updated_since(repos, recent_cutoff(now)) as u64, 2, 5)
}

pub fn collaboration_level_label(repos: &[Repository]) -> Level {
    Level::from_thresholds(total_stars(repos), 20, 100)
}

pub fn project_diversity_label(repos: &[Repository]) -> Level {
    Level::from_thresholds(language_count_stats(repos).len() as u64, 2, 5)
}

pub fn insights(repos: &[Repository], now: DateTime<Utc>) -> Insights {
    let by_count = language_count_stats(repos);

    Insights {
        primary_language: by_count.first().map(|s| s.language.clone()),
        coding_frequency: coding_frequency_label(repos, now),
        collaboration_level: collaboration_level_label(repos),
        project_diversity: Level::from_thresholds(by_count.len() as u64, 2, 5),
    }
}

pub fn recommendations(
    profile: &Profile,
    repos: &[Repository],
    now: DateTime<Utc>,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if total_stars(repos) < 50 {
        recommendations.push(Recommendation::new(
            "Improve Repository Visibility",
            "Add detailed README files, descriptions, and topics to attract more stars and contributors.",
        ));
    }

    if !profile.has_bio() {
        recommendations.push(Recommendation::new(
            "Complete Your Profile",
            "Add a bio, location, and website to make your GitHub profile more professional and discoverable.",
        ));
    }

    let login = profile.login.to_lowercase();
    if !repos.iter().any(|r| r.name.to_lowercase() == login) {
        recommendations.push(Recommendation::new(
            "Create a Profile README",
            "Create a special repository with your username to showcase your skills and projects on your profile.",
        ));
    }

    if repos.len() < 5 {
        recommendations.push(Recommendation::new(
            "Build More Projects",
            "Create more repositories to showcase your skills and expertise in different programming areas.",
        ));
    }

    if updated_since(repos, recent_cutoff(now)) == 0 {
        recommendations.push(Recommendation::new(
            "Stay Active",
            "Regular commits and updates show that you're an active developer. Try to contribute code regularly.",
        ));
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation::new(
            "Excellent Profile",
            "Excellent profile! Keep up the great work!",
        ));
    }

    recommendations
}
