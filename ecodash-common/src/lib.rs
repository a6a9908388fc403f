//! Common utilities and types for the Ecodash dashboard

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{EcodashError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
pub use types::{CountryEntry, Indicator, Observation, YearRange};
pub use utils::{parse_year_label, MAX_PLAUSIBLE_YEAR, MIN_PLAUSIBLE_YEAR};
