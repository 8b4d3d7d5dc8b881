use chrono::{DateTime, Months, Utc};

use crate::analysis::aggregator::{total_stars, updated_since};
use crate::models::analysis::CodeQuality;
use crate::models::Repository;

pub fn code_quality(repos: &[Repository], now: DateTime<Utc>) -> CodeQuality {
    if repos.is_empty() {
        return CodeQuality::default();
    }
    let count = repos.len() as f64;

    // 1. Average size in KB
    let avg_repo_size = repos.iter().map(|r| r.size).sum::<u64>() as f64 / count;

    // 2. Documentation: share of repositories with a description
    let documented = repos
        .iter()
        .filter(|r| r.description.as_deref().is_some_and(|d| !d.is_empty()))
        .count() as f64;
    let documentation_score = documented / count * 100.0;

    // 3. Maintenance: share touched in the last three months
    let three_months_ago = now.checked_sub_months(Months::new(3)).unwrap_or(now);
    let maintenance_score = updated_since(repos, three_months_ago) as f64 / count * 100.0;

    // 4. Popularity: average stars
    let popularity_score = total_stars(repos) as f64 / count;

    CodeQuality {
        avg_repo_size,
        documentation_score,
        maintenance_score,
        popularity_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{lang_repo, ts};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_quality_metrics() {
        let now = ts("2024-06-01T00:00:00Z");
        let mut repos = vec![
            lang_repo("a", "Rust", 100),
            lang_repo("b", "Go", 300),
            lang_repo("c", "C", 200),
            lang_repo("d", "C", 400),
        ];
        repos[0].description = Some("A tool".into());
        repos[1].description = Some(String::new());
        repos[2].description = Some("Library".into());
        repos[0].stargazers_count = 10;
        repos[3].stargazers_count = 30;
        repos[0].updated_at = ts("2024-05-01T00:00:00Z");
        repos[1].updated_at = ts("2024-01-01T00:00:00Z");
        repos[2].updated_at = ts("2024-03-02T00:00:00Z");
        repos[3].updated_at = ts("2023-06-01T00:00:00Z");

        let quality = code_quality(&repos, now);
        assert_eq!(quality.avg_repo_size, 250.0);
        assert_eq!(quality.documentation_score, 50.0);
        assert_eq!(quality.maintenance_score, 50.0);
        assert_eq!(quality.popularity_score, 10.0);
    }

    #[test]
    fn test_code_quality_without_repositories() {
        assert_eq!(code_quality(&[], ts("2024-06-01T00:00:00Z")), CodeQuality::default());
    }
}
