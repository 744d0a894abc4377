// Suite configuration: environment-named key/value resources
pub mod loader;
pub mod properties;
pub mod settings;

pub use loader::{ConfigLoader, DEFAULT_CONFIG_DIR, DEFAULT_ENVIRONMENT};
pub use properties::Properties;
pub use settings::{Fixtures, HttpSettings, SuiteConfig};
