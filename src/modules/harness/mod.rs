// Scenario catalog and the sequential runner that executes it
pub mod catalog;
pub mod outcome;
pub mod runner;
pub mod scenario;

pub use outcome::{AssertionFailure, ScenarioError, ScenarioOutcome, ScenarioResult};
pub use runner::{ScenarioReport, Selection, SuiteReport, SuiteRunner};
pub use scenario::{ScenarioContext, ScenarioKind, Stability};
