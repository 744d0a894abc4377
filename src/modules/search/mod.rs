pub mod domain;
pub mod infrastructure;
pub mod pagination;

// Re-exports for easy external access
pub use domain::{ApiResponse, SearchApi, SearchRequest};
pub use infrastructure::adapters::tmdb::{MovieResult, SearchPage, TmdbError};
pub use infrastructure::{RateLimitClient, TmdbSearchAdapter};
pub use pagination::pages;
