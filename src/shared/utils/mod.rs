pub mod logger;

pub use logger::{init_logger, mask_secret, TimedOperation};
