//! Configuration-driven test suite for a movie-search HTTP endpoint.
//!
//! A [`SuiteConfig`] is loaded once per run by [`ConfigLoader`], then every
//! selected [`ScenarioKind`] is executed in turn by [`SuiteRunner`] against a
//! [`SearchApi`] (normally [`TmdbSearchAdapter`]).

pub mod cli;
pub mod modules;
pub mod shared;

pub use modules::config::{ConfigLoader, SuiteConfig};
pub use modules::harness::{
    ScenarioKind, ScenarioOutcome, Selection, SuiteReport, SuiteRunner,
};
pub use modules::search::{SearchApi, SearchRequest, TmdbSearchAdapter};
pub use shared::errors::{AppError, AppResult};
