use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Event, Profile, Repository, UserSuggestion};

#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn profile(&self, login: &str) -> Result<Profile>;
    async fn repositories(&self, login: &str, per_page: u32) -> Result<Vec<Repository>>;
    async fn events(&self, login: &str, per_page: u32) -> Result<Vec<Event>>;
    async fn suggestions(&self, query: &str, limit: u32) -> Result<Vec<UserSuggestion>>;
    fn name(&self) -> &str;
}
