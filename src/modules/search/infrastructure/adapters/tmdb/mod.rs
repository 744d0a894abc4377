pub mod adapter;
pub mod models;

pub use adapter::TmdbSearchAdapter;
pub use models::{MovieResult, SearchPage, TmdbError};
