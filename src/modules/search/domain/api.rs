use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::request::SearchRequest;
use crate::modules::search::infrastructure::adapters::tmdb::models::{
    SearchPage, TmdbError, TmdbValidationError,
};
use crate::shared::errors::{AppError, AppResult};

/// Status code and raw body of one completed HTTP exchange.
///
/// Any status is a valid `ApiResponse`; only transport failures are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json<T>(&self) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to parse response: {}. Response: {}",
                e,
                truncate(&self.body, 200)
            ))
        })
    }

    pub fn search_page(&self) -> AppResult<SearchPage> {
        self.json()
    }

    /// Human readable message from an error body, if the API sent one
    pub fn error_message(&self) -> Option<String> {
        if let Ok(error) = serde_json::from_str::<TmdbError>(&self.body) {
            return Some(error.status_message);
        }
        serde_json::from_str::<TmdbValidationError>(&self.body)
            .ok()
            .filter(|e| !e.errors.is_empty())
            .map(|e| e.errors.join("; "))
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

/// The movie-search endpoint as seen by the scenarios
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// GET the configured search url with the request's query parameters
    async fn search(&self, request: &SearchRequest) -> AppResult<ApiResponse>;

    /// GET `{url}/{resource}` with the request's query parameters
    async fn get_resource(&self, resource: &str, request: &SearchRequest)
        -> AppResult<ApiResponse>;
}
