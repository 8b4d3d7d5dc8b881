use serde::Serialize;

use crate::analysis::aggregator;
use crate::models::analysis::RepoTotals;
use crate::models::{Profile, Repository};

pub const MAX_COMPARED: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedProfile {
    pub login: String,
    pub name: Option<String>,
    pub followers: u32,
    pub public_repos: u32,
    #[serde(flatten)]
    pub totals: RepoTotals,
    pub primary_language: Option<String>,
}

impl ComparedProfile {
    pub fn new(profile: &Profile, repos: &[Repository]) -> Self {
        Self {
            login: profile.login.clone(),
            name: profile.name.clone(),
            followers: profile.followers,
            public_repos: profile.public_repos,
            totals: aggregator::repo_totals(repos),
            primary_language: aggregator::language_count_stats(repos)
                .into_iter()
                .next()
                .map(|s| s.language),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOutcome {
    Added,
    AlreadyPresent,
    Full,
}

impl ComparisonOutcome {
    pub fn notice(&self) -> &'static str {
        match self {
            ComparisonOutcome::Added => "Profile added to comparison",
            ComparisonOutcome::AlreadyPresent => "Profile already in comparison",
            ComparisonOutcome::Full => "Maximum 3 profiles can be compared",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileComparison {
    profiles: Vec<ComparedProfile>,
}

impl ProfileComparison {
    pub fn profiles(&self) -> &[ComparedProfile] {
        &self.profiles
    }

    // Duplicates are reported before the cap.
    pub fn add(&mut self, profile: ComparedProfile) -> ComparisonOutcome {
        if self.profiles.iter().any(|p| p.login == profile.login) {
            return ComparisonOutcome::AlreadyPresent;
        }
        if self.profiles.len() >= MAX_COMPARED {
            return ComparisonOutcome::Full;
        }
        self.profiles.push(profile);
        ComparisonOutcome::Added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{lang_repo, profile};
    use pretty_assertions::assert_eq;

    fn compared(login: &str) -> ComparedProfile {
        ComparedProfile::new(&profile(login), &[lang_repo("a", "Rust", 1)])
    }

    #[test]
    fn test_comparison_holds_at_most_three() {
        let mut comparison = ProfileComparison::default();
        for login in ["a", "b", "c"] {
            assert_eq!(comparison.add(compared(login)), ComparisonOutcome::Added);
        }

        let outcome = comparison.add(compared("d"));
        assert_eq!(outcome, ComparisonOutcome::Full);
        assert_eq!(outcome.notice(), "Maximum 3 profiles can be compared");
        assert_eq!(comparison.profiles().len(), MAX_COMPARED);
    }

    #[test]
    fn test_comparison_rejects_duplicates() {
        let mut comparison = ProfileComparison::default();
        comparison.add(compared("octocat"));
        assert_eq!(comparison.add(compared("octocat")), ComparisonOutcome::AlreadyPresent);
        assert_eq!(comparison.profiles()[0].primary_language.as_deref(), Some("Rust"));
    }
}
