use log::{debug, info};
use std::sync::Once;
use std::time::{Duration, Instant};

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at startup, before the suite is configured
pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info) // Default level
            .filter_module("reqwest", log::LevelFilter::Warn) // Reduce HTTP noise
            .filter_module("hyper", log::LevelFilter::Warn)
            .parse_env("RUST_LOG")
            .format_timestamp_secs()
            .format_module_path(false)
            .init();

        debug!("Logging system initialized");
    });
}

/// Hide everything but the last four characters of a credential
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", visible)
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish(self) -> Duration {
        let duration = self.start.elapsed();
        info!(
            "Performance: {} took {}ms",
            self.operation,
            duration.as_millis()
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret_keeps_last_four() {
        assert_eq!(mask_secret("14a032abcf1763ff"), "****63ff");
    }

    #[test]
    fn test_mask_short_secret() {
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret(""), "****");
    }

    #[test]
    fn test_timed_operation_measures() {
        let op = TimedOperation::new("noop");
        std::thread::sleep(Duration::from_millis(5));
        assert!(op.finish() >= Duration::from_millis(5));
    }
}
