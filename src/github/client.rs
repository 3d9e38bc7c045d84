use async_trait::async_trait;
use futures::future::try_join3;
use reqwest::{header, Client};

use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::rate_limiter::RateLimiter;
use crate::github::source::ActivitySource;
use crate::models::{AccountSnapshot, ContributionSummary, Profile, RawEvent, RepositorySummary};

/// The events feed serves at most 100 items per page.
const EVENTS_PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
    max_events: usize,
}

impl GitHubClient {
    pub fn new(token: &str, max_events: usize) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
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
            header::HeaderValue::from_static("gitpulse/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: "https://api.github.com".to_string(),
            max_events,
        })
    }

    pub async fn get_profile(&self, username: &str) -> Result<Profile> {
        self.rate_limiter.wait().await;
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching profile: {}", username);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.update_from_response(&response);

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch profile {}: {} - {}",
                username, status, body
            )));
        }

        Ok(response.json().await?)
    }

    pub async fn get_events(&self, username: &str) -> Result<Vec<RawEvent>> {
        let url = format!("{}/users/{}/events", self.base_url, username);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching events for: {}", username);
        paginator
            .fetch_limited(&url, EVENTS_PER_PAGE, self.max_events)
            .await
    }

    pub async fn get_repositories(&self, username: &str) -> Result<Vec<RepositorySummary>> {
        let url = format!(
            "{}/users/{}/repos?type=owner&sort=updated",
            self.base_url, username
        );
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching repositories for: {}", username);
        paginator.fetch_all(&url, 100).await
    }
}

#[async_trait]
impl ActivitySource for GitHubClient {
    async fn fetch_snapshot(&self, username: &str) -> Result<AccountSnapshot> {
        let (profile, events, repositories) = try_join3(
            self.get_profile(username),
            self.get_events(username),
            self.get_repositories(username),
        )
        .await?;

        let contributions = ContributionSummary::from_events(&events);

        Ok(AccountSnapshot {
            profile,
            events,
            repositories,
            contributions: Some(contributions),
        })
    }
}
