use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::modules::search::{ApiResponse, MovieResult, SearchPage};
use crate::shared::errors::AppError;

/// An observed value that differs from the expected one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionFailure {
    pub check: String,
    pub expected: String,
    pub actual: String,
}

impl AssertionFailure {
    pub fn new(
        check: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            check: check.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, actual {}",
            self.check, self.expected, self.actual
        )
    }
}

/// Why a scenario did not pass
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("assertion failed: {0}")]
    Assertion(AssertionFailure),

    /// The request itself failed (connect, timeout, body read)
    #[error("request error: {0}")]
    Errored(AppError),

    #[error("skipped: {0}")]
    Skipped(String),
}

impl From<AssertionFailure> for ScenarioError {
    fn from(failure: AssertionFailure) -> Self {
        ScenarioError::Assertion(failure)
    }
}

impl From<AppError> for ScenarioError {
    fn from(err: AppError) -> Self {
        match err {
            // A 2xx body that is not a search response breaks the API contract
            AppError::SerializationError(msg) => ScenarioError::Assertion(AssertionFailure::new(
                "response body",
                "valid search JSON",
                msg,
            )),
            other => ScenarioError::Errored(other),
        }
    }
}

pub type ScenarioResult = Result<(), ScenarioError>;

/// Final state of one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    Passed,
    Failed(AssertionFailure),
    Errored { message: String },
    Skipped { reason: String },
}

impl ScenarioOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, ScenarioOutcome::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ScenarioOutcome::Failed(_))
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, ScenarioOutcome::Errored { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ScenarioOutcome::Skipped { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioOutcome::Passed => "PASS",
            ScenarioOutcome::Failed(_) => "FAIL",
            ScenarioOutcome::Errored { .. } => "ERROR",
            ScenarioOutcome::Skipped { .. } => "SKIP",
        }
    }
}

impl From<ScenarioResult> for ScenarioOutcome {
    fn from(result: ScenarioResult) -> Self {
        match result {
            Ok(()) => ScenarioOutcome::Passed,
            Err(ScenarioError::Assertion(failure)) => ScenarioOutcome::Failed(failure),
            Err(ScenarioError::Errored(err)) => ScenarioOutcome::Errored {
                message: err.to_string(),
            },
            Err(ScenarioError::Skipped(reason)) => ScenarioOutcome::Skipped { reason },
        }
    }
}

pub fn ensure_eq<T>(check: &str, expected: T, actual: T) -> ScenarioResult
where
    T: PartialEq + fmt::Debug,
{
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionFailure::new(check, format!("{:?}", expected), format!("{:?}", actual)).into())
    }
}

pub fn ensure_status(response: &ApiResponse, expected: u16) -> ScenarioResult {
    if response.status == expected {
        return Ok(());
    }
    let actual = match response.error_message() {
        Some(message) => format!("{} ({})", response.status, message),
        None => response.status.to_string(),
    };
    Err(AssertionFailure::new("status code", expected.to_string(), actual).into())
}

/// Check that every result satisfies `predicate`, reporting the first that doesn't.
///
/// `describe` renders the offending field for the failure message.
pub fn ensure_every_result<D, P>(
    page: &SearchPage,
    check: &str,
    expected: &str,
    describe: D,
    predicate: P,
) -> ScenarioResult
where
    D: Fn(&MovieResult) -> String,
    P: Fn(&MovieResult) -> bool,
{
    match page.results.iter().position(|movie| !predicate(movie)) {
        None => Ok(()),
        Some(index) => {
            let movie = &page.results[index];
            let actual = format!(
                "{} (result {} of {}, id {})",
                describe(movie),
                index + 1,
                page.results.len(),
                movie.id
            );
            Err(AssertionFailure::new(check, expected, actual).into())
        }
    }
}
