pub mod client;
pub mod rate_limiter;
pub mod paginator;
pub mod search;
pub mod source;

pub use client::GitHubClient;
pub use rate_limiter::{RateLimitSnapshot, RateLimiter};
pub use paginator::Paginator;
pub use search::UserSearchFilters;
pub use source::ProfileSource;
