pub mod aggregator;
pub mod insights;
pub mod scoring;
pub mod quality;
pub mod pipeline;

pub use aggregator::{
    activity_by_day, distinct_languages, language_count_stats, language_size_stats, language_totals,
    repo_totals, HEATMAP_DAYS, MAX_CHART_LANGUAGES,
};
pub use insights::{insights, recommendations};
pub use scoring::ScoringEngine;
pub use quality::code_quality;
pub use pipeline::{AnalysisPipeline, ProfileSnapshot};
