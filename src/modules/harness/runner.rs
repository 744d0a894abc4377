use std::fmt;
use std::time::Instant;

use serde::Serialize;

use super::outcome::ScenarioOutcome;
use super::scenario::{ScenarioContext, ScenarioKind, Stability};
use crate::modules::config::SuiteConfig;
use crate::modules::search::SearchApi;

/// Which scenarios a run should execute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Explicitly requested scenarios; empty means the whole catalog
    pub scenarios: Vec<ScenarioKind>,
    /// Run unstable scenarios even when they are not named explicitly
    pub include_unstable: bool,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only(scenarios: impl IntoIterator<Item = ScenarioKind>) -> Self {
        Self {
            scenarios: scenarios.into_iter().collect(),
            include_unstable: false,
        }
    }

    pub fn include_unstable(mut self, include: bool) -> Self {
        self.include_unstable = include;
        self
    }

    /// Scenarios to report on, in catalog order
    pub fn resolve(&self) -> Vec<ScenarioKind> {
        if self.scenarios.is_empty() {
            return ScenarioKind::ALL.to_vec();
        }
        ScenarioKind::ALL
            .into_iter()
            .filter(|kind| self.scenarios.contains(kind))
            .collect()
    }

    fn should_execute(&self, kind: ScenarioKind) -> bool {
        kind.stability() == Stability::Stable
            || self.include_unstable
            || self.scenarios.contains(&kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub scenario: ScenarioKind,
    pub outcome: ScenarioOutcome,
    pub elapsed_ms: u64,
}

/// Outcomes of one suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    pub environment: String,
    pub scenarios: Vec<ScenarioReport>,
    pub elapsed_ms: u64,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.count(ScenarioOutcome::is_passed)
    }

    pub fn failed(&self) -> usize {
        self.count(ScenarioOutcome::is_failed)
    }

    pub fn errored(&self) -> usize {
        self.count(ScenarioOutcome::is_errored)
    }

    pub fn skipped(&self) -> usize {
        self.count(ScenarioOutcome::is_skipped)
    }

    /// No scenario failed or errored
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.errored() == 0
    }

    pub fn outcome_of(&self, kind: ScenarioKind) -> Option<&ScenarioOutcome> {
        self.scenarios
            .iter()
            .find(|report| report.scenario == kind)
            .map(|report| &report.outcome)
    }

    fn count(&self, predicate: fn(&ScenarioOutcome) -> bool) -> usize {
        self.scenarios
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.scenarios {
            write!(
                f,
                "{:<5} {} ({}ms)",
                report.outcome.label(),
                report.scenario,
                report.elapsed_ms
            )?;
            match &report.outcome {
                ScenarioOutcome::Passed => {}
                ScenarioOutcome::Failed(failure) => write!(f, "\n      {}", failure)?,
                ScenarioOutcome::Errored { message } => write!(f, "\n      {}", message)?,
                ScenarioOutcome::Skipped { reason } => write!(f, "\n      {}", reason)?,
            }
            writeln!(f)?;
        }
        write!(
            f,
            "[{}] {} scenarios: {} passed, {} failed, {} errored, {} skipped in {}ms",
            self.environment,
            self.scenarios.len(),
            self.passed(),
            self.failed(),
            self.errored(),
            self.skipped(),
            self.elapsed_ms
        )
    }
}

/// Runs catalog scenarios one after another against a single API
pub struct SuiteRunner<'a> {
    config: &'a SuiteConfig,
    api: &'a dyn SearchApi,
}

impl<'a> SuiteRunner<'a> {
    pub fn new(config: &'a SuiteConfig, api: &'a dyn SearchApi) -> Self {
        Self { config, api }
    }

    pub async fn run(&self, selection: &Selection) -> SuiteReport {
        let started = Instant::now();
        let selected = selection.resolve();

        log::info!(
            "Running {} scenarios against '{}' ({})",
            selected.len(),
            self.config.environment,
            self.config.base_url
        );

        let mut scenarios = Vec::with_capacity(selected.len());
        for kind in selected {
            let report = if selection.should_execute(kind) {
                self.run_scenario(kind).await
            } else {
                ScenarioReport {
                    scenario: kind,
                    outcome: ScenarioOutcome::Skipped {
                        reason: "unstable scenario not selected".to_string(),
                    },
                    elapsed_ms: 0,
                }
            };
            scenarios.push(report);
        }

        let report = SuiteReport {
            environment: self.config.environment.clone(),
            scenarios,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        log::info!(
            "Suite finished: {} passed, {} failed, {} errored, {} skipped",
            report.passed(),
            report.failed(),
            report.errored(),
            report.skipped()
        );
        report
    }

    /// Execute a single scenario and record its outcome
    pub async fn run_scenario(&self, kind: ScenarioKind) -> ScenarioReport {
        let ctx = ScenarioContext::new(self.config, self.api);
        let started = Instant::now();

        log::info!("Scenario {}: {}", kind, kind.description());
        let outcome = ScenarioOutcome::from(kind.execute(&ctx).await);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            ScenarioOutcome::Passed => log::info!("Scenario {} passed in {}ms", kind, elapsed_ms),
            ScenarioOutcome::Failed(failure) => log::warn!("Scenario {} failed: {}", kind, failure),
            ScenarioOutcome::Errored { message } => {
                log::error!("Scenario {} errored: {}", kind, message)
            }
            ScenarioOutcome::Skipped { reason } => {
                log::info!("Scenario {} skipped: {}", kind, reason)
            }
        }

        ScenarioReport {
            scenario: kind,
            outcome,
            elapsed_ms,
        }
    }
}
