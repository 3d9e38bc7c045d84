use reqwest::Response;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

/// Polite request cadence even when the API budget is healthy.
const SOFT_REQUESTS_PER_MINUTE: u32 = 30;

/// Tracks the API rate-limit headers and blocks callers until a request
/// is safe to send.
pub struct RateLimiter {
    state: Arc<Mutex<LimiterState>>,
}

struct LimiterState {
    remaining: u32,
    reset_at: Option<std::time::Instant>,
    sent_this_minute: u32,
    minute_start: std::time::Instant,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(LimiterState {
                remaining: 5000,
                reset_at: None,
                sent_this_minute: 0,
                minute_start: std::time::Instant::now(),
            })),
        }
    }

    pub async fn wait(&self) {
        let mut state = self.state.lock().await;

        if state.remaining == 0 {
            if let Some(reset_at) = state.reset_at {
                let now = std::time::Instant::now();
                if reset_at > now {
                    let wait_duration = reset_at - now;
                    drop(state);
                    tracing::info!("Rate limited, waiting {:?}", wait_duration);
                    sleep(wait_duration).await;
                    state = self.state.lock().await;
                }
            }
        }

        let minute_elapsed = state.minute_start.elapsed();
        if minute_elapsed < Duration::from_secs(60) {
            if state.sent_this_minute >= SOFT_REQUESTS_PER_MINUTE {
                let wait_time = Duration::from_secs(60) - minute_elapsed;
                drop(state);
                tracing::debug!("Soft rate limiting, waiting {:?}", wait_time);
                sleep(wait_time).await;
                state = self.state.lock().await;
                state.sent_this_minute = 0;
                state.minute_start = std::time::Instant::now();
            }
        } else {
            state.sent_this_minute = 0;
            state.minute_start = std::time::Instant::now();
        }

        state.sent_this_minute += 1;
    }

    pub fn update_from_response(&self, response: &Response) {
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let Some(remaining) = remaining else {
            return;
        };

        let reset = response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let state = self.state.clone();
        tokio::spawn(async move {
            let mut state = state.lock().await;
            state.remaining = remaining;
            if let Some(reset_timestamp) = reset {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(reset_timestamp);
                if reset_timestamp > now {
                    state.reset_at = Some(
                        std::time::Instant::now() + Duration::from_secs(reset_timestamp - now),
                    );
                }
            }
        });
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
