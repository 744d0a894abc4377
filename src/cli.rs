//! Command-line front end: argument parsing and exit-code mapping.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use crate::modules::config::{
    ConfigLoader, SuiteConfig, DEFAULT_CONFIG_DIR, DEFAULT_ENVIRONMENT,
};
use crate::modules::harness::{ScenarioKind, Selection, SuiteRunner};
use crate::modules::search::TmdbSearchAdapter;

/// CLI / env configuration parsed at process startup.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "movie-search-suite",
    about = "Runs the movie-search API scenarios against a configured environment",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Configuration environment, resolved to <config-dir>/<env>.properties
    #[arg(long, env = "SUITE_ENV", default_value = DEFAULT_ENVIRONMENT)]
    pub env: String,

    /// Directory holding the .properties resources
    #[arg(long, env = "SUITE_CONFIG_DIR", default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    /// API token replacing the resource's `token` key
    #[arg(long, env = "MOVIE_SEARCH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Run only this scenario (repeatable)
    #[arg(long = "scenario", value_name = "ID")]
    pub scenarios: Vec<ScenarioKind>,

    /// Also run scenarios known to be unreliable upstream
    #[arg(long, default_value_t = false)]
    pub include_unstable: bool,

    /// Print the scenario catalog and exit
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// How a run ended, mapped onto the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteExit {
    /// Every selected scenario passed or was skipped
    Success,
    /// At least one scenario failed or errored
    Failures,
    /// Configuration or client setup failed; nothing ran
    SetupError,
}

impl SuiteExit {
    pub fn code(self) -> u8 {
        match self {
            SuiteExit::Success => 0,
            SuiteExit::Failures => 1,
            SuiteExit::SetupError => 2,
        }
    }
}

impl From<SuiteExit> for ExitCode {
    fn from(exit: SuiteExit) -> Self {
        ExitCode::from(exit.code())
    }
}

/// Execute the command described by `cli` and report how it ended
pub async fn run(cli: &Cli) -> SuiteExit {
    if cli.list {
        for kind in ScenarioKind::ALL {
            println!(
                "{:<36} {:?}  {}",
                kind.id(),
                kind.stability(),
                kind.description()
            );
        }
        return SuiteExit::Success;
    }

    let (config, adapter) = match setup(cli) {
        Ok(ready) => ready,
        Err(e) => {
            log::error!("Suite setup failed, no scenarios were run: {:#}", e);
            return SuiteExit::SetupError;
        }
    };

    let selection =
        Selection::only(cli.scenarios.iter().copied()).include_unstable(cli.include_unstable);
    let report = SuiteRunner::new(&config, &adapter).run(&selection).await;

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize report: {}", e);
                return SuiteExit::Failures;
            }
        }
    } else {
        println!("{}", report);
    }

    if report.is_success() {
        SuiteExit::Success
    } else {
        SuiteExit::Failures
    }
}

/// Load the configuration and build the HTTP adapter; any error here is fatal
fn setup(cli: &Cli) -> Result<(SuiteConfig, TmdbSearchAdapter)> {
    let loader = ConfigLoader::new(&cli.config_dir).with_token_override(cli.token.clone());
    let config = loader
        .load(&cli.env)
        .with_context(|| format!("failed to load configuration '{}'", cli.env))?;
    let adapter = TmdbSearchAdapter::new(&config).context("failed to create HTTP client")?;
    Ok((config, adapter))
}
