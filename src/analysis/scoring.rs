use chrono::{DateTime, Months, Utc};

use crate::analysis::aggregator::{distinct_languages, total_stars, updated_since};
use crate::models::analysis::{Achievement, DeveloperScore, Rarity};
use crate::models::{Profile, Repository};

pub struct ScoringEngine {
    caps: ScoreCaps,
}

#[derive(Debug, Clone)]
struct ScoreCaps {
    followers: f64,
    quality: f64,
    activity: f64,
    diversity: f64,
    openness: f64,
}

impl Default for ScoreCaps {
    fn default() -> Self {
        Self {
            followers: 25.0,
            quality: 30.0,
            activity: 20.0,
            diversity: 15.0,
            openness: 10.0,
        }
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            caps: ScoreCaps::default(),
        }
    }

    pub fn developer_score(
        &self,
        profile: &Profile,
        repos: &[Repository],
        now: DateTime<Utc>,
    ) -> DeveloperScore {
        // 1. Follower influence
        let followers = (f64::from(profile.followers) / 100.0).min(self.caps.followers);

        // 2. Repository quality: average stars per repository
        let avg_stars = if repos.is_empty() {
            0.0
        } else {
            total_stars(repos) as f64 / repos.len() as f64
        };
        let quality = (avg_stars / 10.0).min(self.caps.quality);

        // 3. Activity: repositories touched in the last six months
        let six_months_ago = now.checked_sub_months(Months::new(6)).unwrap_or(now);
        let recent = updated_since(repos, six_months_ago) as f64;
        let activity = (recent * 2.0).min(self.caps.activity);

        // 4. Language diversity
        let diversity = (distinct_languages(repos) as f64 * 2.0).min(self.caps.diversity);

        // 5. Open source participation via forks
        let forked = repos.iter().filter(|r| r.fork).count() as f64;
        let openness = forked.min(self.caps.openness);

        let total = (followers + quality + activity + diversity + openness).round() as u32;

        DeveloperScore {
            followers,
            quality,
            activity,
            diversity,
            openness,
            total,
        }
    }

    pub fn achievements(&self, profile: &Profile, repos: &[Repository]) -> Vec<Achievement> {
        let mut earned = Vec::new();

        if profile.followers > 1000 {
            earned.push(Achievement {
                id: "influencer",
                title: "Influencer",
                description: "Has over 1000 followers",
                rarity: Rarity::Gold,
            });
        }

        if repos.len() > 50 {
            earned.push(Achievement {
                id: "prolific",
                title: "Prolific Developer",
                description: "Created over 50 repositories",
                rarity: Rarity::Silver,
            });
        }

        if total_stars(repos) > 10_000 {
            earned.push(Achievement {
                id: "rockstar",
                title: "Open Source Rockstar",
                description: "Earned over 10,000 stars",
                rarity: Rarity::Platinum,
            });
        }

        if distinct_languages(repos) > 10 {
            earned.push(Achievement {
                id: "polyglot",
                title: "Programming Polyglot",
                description: "Uses over 10 programming languages",
                rarity: Rarity::Gold,
            });
        }

        earned
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{lang_repo, profile, repo, ts};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_developer_score_example() {
        let now = ts("2024-06-01T00:00:00Z");
        let mut user = profile("octocat");
        user.followers = 2500;

        let mut repos = vec![
            lang_repo("a", "Go", 10),
            lang_repo("b", "Rust", 10),
            lang_repo("c", "C", 10),
            repo("d"),
        ];
        for r in repos.iter_mut() {
            r.stargazers_count = 50;
        }
        repos[0].updated_at = ts("2024-05-01T00:00:00Z");
        repos[1].updated_at = ts("2024-01-15T00:00:00Z");
        repos[3].fork = true;

        let score = ScoringEngine::new().developer_score(&user, &repos, now);
        assert_eq!(score.followers, 25.0);
        assert_eq!(score.quality, 5.0);
        assert_eq!(score.activity, 4.0);
        assert_eq!(score.diversity, 6.0);
        assert_eq!(score.openness, 1.0);
        assert_eq!(score.total, 41);
    }

    #[test]
    fn test_developer_score_without_repositories() {
        let score = ScoringEngine::new().developer_score(
            &profile("ghost"),
            &[],
            ts("2024-06-01T00:00:00Z"),
        );
        assert_eq!(score.total, 0);
        assert_eq!(score.quality, 0.0);
    }

    #[test]
    fn test_score_never_exceeds_cap_sum() {
        let mut user = profile("torvalds");
        user.followers = 200_000;
        let repos: Vec<_> = (0..40)
            .map(|i| {
                let mut r = lang_repo(&format!("r{}", i), &format!("L{}", i), 1);
                r.stargazers_count = 100_000;
                r.fork = true;
                r.updated_at = ts("2024-05-30T00:00:00Z");
                r
            })
            .collect();

        let score = ScoringEngine::new().developer_score(&user, &repos, ts("2024-06-01T00:00:00Z"));
        assert_eq!(score.total, 100);
    }

    #[test]
    fn test_achievements_in_declaration_order() {
        let mut user = profile("octocat");
        user.followers = 1001;
        let repos: Vec<_> = (0..51)
            .map(|i| {
                let mut r = lang_repo(&format!("r{}", i), &format!("L{}", i % 11), 1);
                r.stargazers_count = 200;
                r
            })
            .collect();

        let ids: Vec<_> = ScoringEngine::new()
            .achievements(&user, &repos)
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["influencer", "prolific", "rockstar", "polyglot"]);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let mut user = profile("octocat");
        user.followers = 1000;
        let repos: Vec<_> = (0..50).map(|i| repo(&format!("r{}", i))).collect();
        assert!(ScoringEngine::new().achievements(&user, &repos).is_empty());
    }
}
