use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Configuration not found: {0}")]
    ConfigNotFound(String),

    #[error("Configuration unreadable ({path}): {reason}")]
    ConfigUnreadable { path: String, reason: String },

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Setup errors abort the whole suite before any scenario runs.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            AppError::ConfigNotFound(_)
                | AppError::ConfigUnreadable { .. }
                | AppError::MissingConfigKey(_)
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Transport(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            AppError::Transport(format!("Failed to connect to movie-search API: {}", err))
        } else if err.is_builder() {
            AppError::InvalidInput(format!("Invalid request: {}", err))
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
