pub mod tmdb;

pub use tmdb::TmdbSearchAdapter;
