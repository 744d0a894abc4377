use std::fmt;
use std::time::Duration;

use super::properties::Properties;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::mask_secret;

pub const KEY_TOKEN: &str = "token";
pub const KEY_URL: &str = "url";
pub const KEY_MOVIE_NAME: &str = "moviename";
pub const KEY_NONEXISTING_MOVIE_NAME: &str = "Nonexisting_moviename";

const DEFAULT_SINGLE_RESULT_MOVIE_NAME: &str = "Saving the Titanic";
const DEFAULT_INVALID_RESOURCE: &str = "nonexistent_resource";
const DEFAULT_PAGE_SIZE: usize = 20;
const DEFAULT_OUT_OF_RANGE_PAGE: u32 = 999;
const DEFAULT_RELEASE_YEAR: u32 = 2016;
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_REQUESTS_PER_SECOND: u32 = 20;

/// Known inputs that make scenario outcomes deterministic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixtures {
    /// A title expected to exist
    pub movie_name: String,
    /// A title expected to be absent
    pub nonexisting_movie_name: String,
    /// A title expected to match exactly one record
    pub single_result_movie_name: String,
    /// Path segment appended to the base url that must not exist
    pub invalid_resource: String,
    /// Fixed number of results the API returns per full page
    pub page_size: usize,
    pub out_of_range_page: u32,
    pub release_year: u32,
    pub language: String,
    pub pagination_sla: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// `None` keeps the HTTP client's default
    pub timeout: Option<Duration>,
    pub requests_per_second: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: None,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
        }
    }
}

/// Immutable suite configuration, loaded once before any scenario runs and
/// shared by reference afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    pub environment: String,
    pub token: String,
    pub base_url: String,
    pub fixtures: Fixtures,
    pub http: HttpSettings,
}

// Custom Debug implementation to avoid exposing the token
impl fmt::Debug for SuiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteConfig")
            .field("environment", &self.environment)
            .field("token", &mask_secret(&self.token))
            .field("base_url", &self.base_url)
            .field("fixtures", &self.fixtures)
            .field("http", &self.http)
            .finish()
    }
}

impl SuiteConfig {
    /// Build the configuration from raw properties.
    ///
    /// `token_override`, when present, replaces the `token` key so that
    /// credentials can come from the environment instead of the file.
    pub fn from_properties(
        environment: &str,
        props: &Properties,
        token_override: Option<String>,
    ) -> AppResult<Self> {
        let token = match token_override.filter(|t| !t.trim().is_empty()) {
            Some(token) => token,
            None => props.require(KEY_TOKEN)?.to_string(),
        };

        let base_url = props.require(KEY_URL)?.trim().to_string();
        reqwest::Url::parse(&base_url).map_err(|e| AppError::ConfigUnreadable {
            path: props.source().to_string(),
            reason: format!("invalid url '{}': {}", base_url, e),
        })?;

        let page_size = props
            .parse_optional::<usize>("page_size")?
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(AppError::ConfigUnreadable {
                path: props.source().to_string(),
                reason: "page_size must be positive".to_string(),
            });
        }

        let fixtures = Fixtures {
            movie_name: props.require(KEY_MOVIE_NAME)?.to_string(),
            nonexisting_movie_name: props.require(KEY_NONEXISTING_MOVIE_NAME)?.to_string(),
            single_result_movie_name: props
                .get_or("single_result_moviename", DEFAULT_SINGLE_RESULT_MOVIE_NAME)
                .to_string(),
            invalid_resource: props
                .get_or("invalid_resource", DEFAULT_INVALID_RESOURCE)
                .trim_matches('/')
                .to_string(),
            page_size,
            out_of_range_page: props
                .parse_optional::<u32>("out_of_range_page")?
                .unwrap_or(DEFAULT_OUT_OF_RANGE_PAGE),
            release_year: props
                .parse_optional::<u32>("release_year")?
                .unwrap_or(DEFAULT_RELEASE_YEAR),
            language: props.get_or("language", DEFAULT_LANGUAGE).to_string(),
            pagination_sla: props
                .parse_optional::<u64>("pagination_sla_ms")?
                .map(Duration::from_millis),
        };

        let http = HttpSettings {
            timeout: props
                .parse_optional::<u64>("request_timeout_secs")?
                .map(Duration::from_secs),
            requests_per_second: props
                .parse_optional::<u32>("requests_per_second")?
                .unwrap_or(DEFAULT_REQUESTS_PER_SECOND)
                .max(1),
        };

        Ok(Self {
            environment: environment.to_string(),
            token,
            base_url,
            fixtures,
            http,
        })
    }
}
