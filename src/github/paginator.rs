use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::rate_limiter::RateLimiter;

/// Link-header driven page walker with an optional item cap.
pub struct Paginator<'a> {
    client: &'a Client,
    rate_limiter: &'a RateLimiter,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client, rate_limiter: &'a RateLimiter) -> Self {
        Self {
            client,
            rate_limiter,
        }
    }

    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
    ) -> Result<Vec<T>> {
        self.fetch_pages(base_url, per_page, None).await
    }

    pub async fn fetch_limited<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
        max_items: usize,
    ) -> Result<Vec<T>> {
        let mut items = self.fetch_pages(base_url, per_page, Some(max_items)).await?;
        items.truncate(max_items);
        Ok(items)
    }

    async fn fetch_pages<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
        max_items: Option<usize>,
    ) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            self.rate_limiter.wait().await;

            let separator = if base_url.contains('?') { "&" } else { "?" };
            let url = format!("{}{}per_page={}&page={}", base_url, separator, per_page, page);

            tracing::debug!("Fetching: {}", url);
            let response = self.client.get(&url).send().await?;
            self.rate_limiter.update_from_response(&response);

            let has_next = response
                .headers()
                .get("link")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.contains("rel=\"next\""))
                .unwrap_or(false);

            let items: Vec<T> = response.json().await?;
            let page_len = items.len();
            all_items.extend(items);

            let capped = max_items.map(|max| all_items.len() >= max).unwrap_or(false);
            if capped || !has_next || page_len < per_page as usize {
                break;
            }

            page += 1;
        }

        Ok(all_items)
    }
}
