pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod taxonomy;
pub mod analysis;
pub mod chart;
pub mod collection;
pub mod storage;
pub mod state;
pub mod format;
pub mod export;
pub mod dashboard;

#[cfg(test)]
mod fixtures;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::{GitHubClient, ProfileSource, UserSearchFilters};
pub use analysis::{AnalysisPipeline, ProfileSnapshot};
pub use dashboard::Dashboard;
pub use storage::{PreferenceStore, SqliteStore};
