use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use super::properties::Properties;
use super::settings::SuiteConfig;
use crate::shared::errors::{AppError, AppResult};

pub const DEFAULT_ENVIRONMENT: &str = "input";
pub const DEFAULT_CONFIG_DIR: &str = "config";
const PROPERTIES_EXTENSION: &str = "properties";

/// Reads environment-named configuration resources from a directory.
///
/// The environment `qa` resolves to `<dir>/qa.properties`. Files follow the
/// Java properties format: `key=value` or `key:value` lines, `#`/`!` comments,
/// values taken literally up to the end of the line.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    token_override: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_DIR)
    }
}

impl ConfigLoader {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            token_override: None,
        }
    }

    /// Use this token instead of the resource's `token` key
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        self.token_override = token;
        self
    }

    pub fn resource_path(&self, environment: &str) -> PathBuf {
        self.config_dir
            .join(format!("{}.{}", environment, PROPERTIES_EXTENSION))
    }

    /// Load and validate the configuration for `environment`
    pub fn load(&self, environment: &str) -> AppResult<SuiteConfig> {
        let props = self.load_properties(environment)?;
        let config =
            SuiteConfig::from_properties(environment, &props, self.token_override.clone())?;

        log::info!(
            "Loaded configuration '{}' from {} ({} keys)",
            environment,
            props.source(),
            props.len()
        );
        log::debug!("Configuration: {:?}", config);
        Ok(config)
    }

    /// Read the raw key/value pairs for `environment` without validating them
    pub fn load_properties(&self, environment: &str) -> AppResult<Properties> {
        let environment = environment.trim();
        if environment.is_empty() {
            return Err(AppError::InvalidInput(
                "environment name must not be empty".to_string(),
            ));
        }

        let path = self.resource_path(environment);
        let display = path.display().to_string();

        let file = File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AppError::ConfigNotFound(display.clone()),
            _ => AppError::ConfigUnreadable {
                path: display.clone(),
                reason: e.to_string(),
            },
        })?;

        let entries = java_properties::read(BufReader::new(file)).map_err(|e| {
            AppError::ConfigUnreadable {
                path: display.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut props = Properties::new(display);
        for (key, value) in entries {
            props.insert(key, value);
        }

        Ok(props)
    }
}
