use crate::error::{Error, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub database_path: String,
    pub history_limit: usize,
    pub events_per_page: u32,
    pub repos_per_page: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Public endpoints work without a token, just with a lower rate limit.
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.trim().is_empty());

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "ghdash.db".to_string());

        let history_limit = parse_var("HISTORY_LIMIT", 10)?;
        if history_limit == 0 {
            return Err(Error::Config("HISTORY_LIMIT must be at least 1".to_string()));
        }

        let events_per_page = parse_var("EVENTS_PER_PAGE", 30)?;
        let repos_per_page = parse_var("REPOS_PER_PAGE", 100)?;

        Ok(Self {
            github_token,
            database_path,
            history_limit,
            events_per_page,
            repos_per_page,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            database_path: "ghdash.db".to_string(),
            history_limit: 10,
            events_per_page: 30,
            repos_per_page: 100,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} is not a valid number: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub events_per_page: u32,
    pub repos_per_page: u32,
    pub suggestion_limit: u32,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            events_per_page: config.events_per_page,
            repos_per_page: config.repos_per_page,
            suggestion_limit: 5,
            show_progress: false,
        }
    }
}
