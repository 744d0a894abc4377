// HTTP boundary to the external movie-search API
pub mod adapters;
pub mod http_client;

pub use adapters::TmdbSearchAdapter;
pub use http_client::RateLimitClient;
