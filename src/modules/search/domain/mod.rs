pub mod api;
pub mod request;

pub use api::{ApiResponse, SearchApi};
pub use request::SearchRequest;

#[cfg(test)]
pub use api::MockSearchApi;
