pub mod repos;
pub mod activity;
pub mod comparison;

pub use repos::{apply, filter_repositories, paginate, sort_repositories, Page, RepoQuery, RepoTable};
pub use activity::{filter_events, timeline, ActivityFeed, TimelineEntry};
pub use comparison::{ComparedProfile, ComparisonOutcome, ProfileComparison, MAX_COMPARED};
