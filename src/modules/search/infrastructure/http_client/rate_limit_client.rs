//! Throttled HTTP client for the movie-search API
//!
//! Every call is a single GET. Responses are returned whatever their status
//! code; only transport failures become errors. Nothing is retried.

use crate::modules::config::HttpSettings;
use crate::modules::search::domain::ApiResponse;
use crate::shared::errors::{AppError, AppResult};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use reqwest::Client;
use std::num::NonZeroU32;

type DirectRateLimiter = GovernorRateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

const USER_AGENT: &str = concat!("movie-search-suite/", env!("CARGO_PKG_VERSION"));

/// HTTP client that paces requests with a client-side rate limiter
pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectRateLimiter,
    provider_name: String,
}

impl RateLimitClient {
    /// Client for the TMDB search API using the suite's HTTP settings
    pub fn for_tmdb(settings: &HttpSettings) -> AppResult<Self> {
        Self::new("TMDB", settings)
    }

    /// Create a custom client
    pub fn new(provider_name: &str, settings: &HttpSettings) -> AppResult<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AppError::InternalError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            rate_limiter: Self::create_rate_limiter(settings.requests_per_second),
            provider_name: provider_name.to_string(),
        })
    }

    /// Create a rate limiter allowing `requests_per_second` with an equal burst
    fn create_rate_limiter(requests_per_second: u32) -> DirectRateLimiter {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        GovernorRateLimiter::direct(Quota::per_second(rate))
    }

    /// Issue one GET request and capture its status and body
    pub async fn get(&self, url: &str) -> AppResult<ApiResponse> {
        self.rate_limiter.until_ready().await;

        let started = std::time::Instant::now();
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            AppError::Transport(format!(
                "Failed to read {} response body: {}",
                self.provider_name, e
            ))
        })?;

        log::debug!(
            "{} API responded {} in {}ms",
            self.provider_name,
            status,
            started.elapsed().as_millis()
        );

        Ok(ApiResponse::new(status, body))
    }

    fn transport_error(&self, err: reqwest::Error) -> AppError {
        log::warn!("{} API request failed: {}", self.provider_name, err);
        match AppError::from(err) {
            AppError::Transport(msg) => {
                AppError::Transport(format!("{} API request failed: {}", self.provider_name, msg))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_creation() {
        let client = RateLimitClient::for_tmdb(&HttpSettings::default()).unwrap();
        assert_eq!(client.provider_name, "TMDB");
        assert!(client.rate_limiter.check().is_ok());
    }

    #[test]
    fn test_burst_is_bounded_by_rate() {
        let settings = HttpSettings {
            timeout: Some(Duration::from_secs(1)),
            requests_per_second: 2,
        };
        let client = RateLimitClient::new("Test", &settings).unwrap();
        assert!(client.rate_limiter.check().is_ok());
        assert!(client.rate_limiter.check().is_ok());
        assert!(client.rate_limiter.check().is_err());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = RateLimitClient::for_tmdb(&HttpSettings {
            timeout: Some(Duration::from_secs(2)),
            requests_per_second: 20,
        })
        .unwrap();

        // Port 9 (discard) on localhost is not expected to be listening
        let err = client.get("http://127.0.0.1:9/search").await.unwrap_err();
        assert!(matches!(err, AppError::Transport(_)), "{:?}", err);
    }
}
