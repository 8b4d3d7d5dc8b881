use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};

use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::rate_limiter::RateLimiter;
use crate::github::source::ProfileSource;
use crate::models::{Event, Profile, Repository, SearchResponse, UserSuggestion};

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("ghdash/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: "https://api.github.com".to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub async fn get_user(&self, username: &str) -> Result<Profile> {
        self.rate_limiter.acquire().await?;
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.update_from_headers(response.headers()).await;
        let response = ensure_success(response, username, &self.rate_limiter).await?;

        Ok(response.json().await?)
    }

    pub async fn get_user_repos(&self, username: &str, per_page: u32) -> Result<Vec<Repository>> {
        let url = format!("{}/users/{}/repos?sort=stars", self.base_url, username);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching repositories for: {}", username);
        paginator.fetch_limited(&url, username, per_page, per_page).await
    }

    pub async fn get_user_events(&self, username: &str, per_page: u32) -> Result<Vec<Event>> {
        let url = format!("{}/users/{}/events/public", self.base_url, username);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::debug!("Fetching public events for: {}", username);
        paginator.fetch_limited(&url, username, per_page, per_page).await
    }

    pub async fn search_users(&self, query: &str, limit: u32) -> Result<Vec<UserSuggestion>> {
        self.rate_limiter.acquire().await?;
        let url = format!("{}/search/users", self.base_url);
        tracing::debug!("Searching users: {}", query);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.to_string()), ("per_page", limit.to_string())])
            .send()
            .await?;
        self.rate_limiter.update_from_headers(response.headers()).await;
        let response = ensure_success(response, query, &self.rate_limiter).await?;

        let body: SearchResponse = response.json().await?;
        Ok(body.items)
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn profile(&self, login: &str) -> Result<Profile> {
        self.get_user(login).await
    }

    async fn repositories(&self, login: &str, per_page: u32) -> Result<Vec<Repository>> {
        self.get_user_repos(login, per_page).await
    }

    async fn events(&self, login: &str, per_page: u32) -> Result<Vec<Event>> {
        self.get_user_events(login, per_page).await
    }

    async fn suggestions(&self, query: &str, limit: u32) -> Result<Vec<UserSuggestion>> {
        self.search_users(query, limit).await
    }

    fn name(&self) -> &str {
        "github"
    }
}

pub(crate) async fn ensure_success(
    response: Response,
    subject: &str,
    rate_limiter: &RateLimiter,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match classify_status(status) {
        Some(StatusClass::NotFound) => Err(Error::UserNotFound(subject.to_string())),
        Some(StatusClass::RateLimited) => Err(Error::RateLimited(rate_limiter.seconds_until_reset().await)),
        None => {
            let body = response.text().await.unwrap_or_default();
            Err(Error::GitHubApi(format!(
                "Request for {} failed: {} - {}",
                subject, status, body
            )))
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum StatusClass {
    NotFound,
    RateLimited,
}

fn classify_status(status: StatusCode) -> Option<StatusClass> {
    match status {
        StatusCode::NOT_FOUND => Some(StatusClass::NotFound),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Some(StatusClass::RateLimited),
        _ => None,
    }
}
